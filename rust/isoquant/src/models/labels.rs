//! Reporter channel definitions and the per-scan label sets built from them.
#![allow(clippy::excessive_precision)]
use crate::errors::ConfigError;
use serde::{
    Deserialize,
    Serialize,
};

/// Largest plex any supported chemistry can produce.
pub const MAX_CHANNELS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelBrand {
    #[serde(rename = "tmt")]
    Tmt,
    #[serde(rename = "itraq")]
    Itraq,
}

impl LabelBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelBrand::Tmt => "TMT",
            LabelBrand::Itraq => "iTRAQ",
        }
    }

    /// Channel names and reporter m/z for a given plex, in channel order.
    fn definitions(&self, plex: u8) -> Option<&'static [(&'static str, f64)]> {
        match (self, plex) {
            (LabelBrand::Tmt, 6) => Some(&TMT6PLEX),
            (LabelBrand::Tmt, 10) => Some(&TMT16PLEX[0..10]),
            (LabelBrand::Tmt, 11) => Some(&TMT16PLEX[0..11]),
            (LabelBrand::Tmt, 16) => Some(&TMT16PLEX),
            (LabelBrand::Itraq, 4) => Some(&ITRAQ4PLEX),
            (LabelBrand::Itraq, 8) => Some(&ITRAQ8PLEX),
            _ => None,
        }
    }
}

const TMT6PLEX: [(&str, f64); 6] = [
    ("126", 126.127726),
    ("127N", 127.124761),
    ("128C", 128.134436),
    ("129N", 129.131471),
    ("130C", 130.141145),
    ("131", 131.138180),
];

const TMT16PLEX: [(&str, f64); 16] = [
    ("126", 126.127726),
    ("127N", 127.124761),
    ("127C", 127.131081),
    ("128N", 128.128116),
    ("128C", 128.134436),
    ("129N", 129.131471),
    ("129C", 129.137790),
    ("130N", 130.134825),
    ("130C", 130.141145),
    ("131N", 131.138180),
    ("131C", 131.144499),
    ("132N", 132.141535),
    ("132C", 132.147855),
    ("133N", 133.144890),
    ("133C", 133.151210),
    ("134N", 134.148245),
];

const ITRAQ4PLEX: [(&str, f64); 4] = [
    ("114", 114.1112),
    ("115", 115.1082),
    ("116", 116.1116),
    ("117", 117.1149),
];

const ITRAQ8PLEX: [(&str, f64); 8] = [
    ("113", 113.1078),
    ("114", 114.1112),
    ("115", 115.1082),
    ("116", 116.1116),
    ("117", 117.1149),
    ("118", 118.1120),
    ("119", 119.1153),
    ("121", 121.1220),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default)]
    pub custom_name: String,
    pub mz: f64,
    #[serde(default)]
    pub intensity: f64,
}

impl Channel {
    /// Whether `mz` falls inside `self.mz ± self.mz * ppm_precision`.
    #[inline(always)]
    pub fn matches(&self, mz: f64, ppm_precision: f64) -> bool {
        let delta = ppm_precision * self.mz;
        mz >= (self.mz - delta) && mz <= (self.mz + delta)
    }

    /// Keeps the most intense observation; channels never sum peaks.
    #[inline(always)]
    pub fn observe(&mut self, intensity: f64) {
        if intensity > self.intensity {
            self.intensity = intensity;
        }
    }
}

/// Reporter channels observed in (or accumulated for) one piece of evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSet {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub scan: String,
    #[serde(default)]
    pub charge_state: u8,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl LabelSet {
    /// Builds an empty template for a brand/plex combination.
    ///
    /// ```
    /// use isoquant::models::{LabelBrand, LabelSet};
    ///
    /// let labels = LabelSet::new(LabelBrand::Tmt, 10).unwrap();
    /// assert_eq!(labels.channels.len(), 10);
    /// assert_eq!(labels.channels[1].name, "127N");
    /// assert!(LabelSet::new(LabelBrand::Itraq, 10).is_err());
    /// ```
    pub fn new(brand: LabelBrand, plex: u8) -> Result<Self, ConfigError> {
        let defs = brand
            .definitions(plex)
            .ok_or(ConfigError::UnsupportedPlex { brand, plex })?;
        let channels = defs
            .iter()
            .map(|(name, mz)| Channel {
                name: name.to_string(),
                custom_name: String::new(),
                mz: *mz,
                intensity: 0.0,
            })
            .collect();
        Ok(Self {
            channels,
            ..Default::default()
        })
    }

    /// Assigns user-facing sample names to channels, in channel order.
    pub fn with_custom_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        for (channel, name) in self.channels.iter_mut().zip(names.iter()) {
            channel.custom_name = name.as_ref().to_string();
        }
        self
    }

    /// Upper m/z bound of the highest channel under the given precision.
    pub fn max_channel_bound(&self, ppm_precision: f64) -> f64 {
        self.channels
            .iter()
            .map(|c| c.mz + c.mz * ppm_precision)
            .fold(0.0, f64::max)
    }

    /// Copies channel intensities and custom names from an extracted set.
    pub fn assign_from(&mut self, other: &LabelSet) {
        self.index = other.index.clone();
        self.scan = other.scan.clone();
        self.ensure_len(other.channels.len());
        for (mine, theirs) in self.channels.iter_mut().zip(other.channels.iter()) {
            mine.name = theirs.name.clone();
            mine.mz = theirs.mz;
            mine.intensity = theirs.intensity;
            mine.custom_name = theirs.custom_name.clone();
        }
    }

    /// Adds another set's intensities into this one.
    ///
    /// Channel metadata is overwritten by whatever was accumulated last.
    pub fn accumulate(&mut self, other: &LabelSet) {
        self.ensure_len(other.channels.len());
        for (mine, theirs) in self.channels.iter_mut().zip(other.channels.iter()) {
            mine.name.clone_from(&theirs.name);
            mine.custom_name.clone_from(&theirs.custom_name);
            mine.mz = theirs.mz;
            mine.intensity += theirs.intensity;
        }
    }

    pub fn zero_intensities(&mut self) {
        self.channels.iter_mut().for_each(|c| c.intensity = 0.0);
    }

    pub fn total_intensity(&self) -> f64 {
        self.channels.iter().map(|c| c.intensity).sum()
    }

    pub fn intensities(&self) -> Vec<f64> {
        self.channels.iter().map(|c| c.intensity).collect()
    }

    fn ensure_len(&mut self, len: usize) {
        if self.channels.len() < len {
            self.channels.resize_with(len, Channel::default);
        }
    }
}

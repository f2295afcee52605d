use serde::{
    Deserialize,
    Serialize,
};

/// Width that every index/scan identifier is left-padded to.
pub const IDENTIFIER_WIDTH: usize = 5;

/// Isolation half-width used when the acquisition did not report one.
pub const DEFAULT_ISOLATION_OFFSET: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum MsLevel {
    Ms1,
    Ms2,
    Ms3,
    Unrecognized(u8),
}

impl From<u8> for MsLevel {
    fn from(x: u8) -> Self {
        match x {
            1 => MsLevel::Ms1,
            2 => MsLevel::Ms2,
            3 => MsLevel::Ms3,
            other => MsLevel::Unrecognized(other),
        }
    }
}

impl From<MsLevel> for u8 {
    fn from(x: MsLevel) -> Self {
        match x {
            MsLevel::Ms1 => 1,
            MsLevel::Ms2 => 2,
            MsLevel::Ms3 => 3,
            MsLevel::Unrecognized(other) => other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Precursor {
    pub parent_index: String,
    pub parent_scan: String,
    pub target_ion: f64,
    pub charge_state: u8,
    pub isolation_window_lower_offset: f64,
    pub isolation_window_upper_offset: f64,
    #[serde(default)]
    pub target_ion_intensity: f64,
}

impl Precursor {
    /// Substitutes the default window when neither offset was reported.
    pub fn fill_default_isolation_window(&mut self) {
        if self.isolation_window_lower_offset == 0.0 && self.isolation_window_upper_offset == 0.0 {
            self.isolation_window_lower_offset = DEFAULT_ISOLATION_OFFSET;
            self.isolation_window_upper_offset = DEFAULT_ISOLATION_OFFSET;
        }
    }

    pub fn isolation_lower_bound(&self) -> f64 {
        self.target_ion - self.isolation_window_lower_offset
    }

    pub fn isolation_upper_bound(&self) -> f64 {
        self.target_ion + self.isolation_window_upper_offset
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub level: MsLevel,
    pub index: String,
    pub scan: String,
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
    #[serde(default)]
    pub precursor: Option<Precursor>,
}

impl Spectrum {
    /// Rewrites index, scan and parent identifiers into their padded form
    /// and fills the default isolation window.
    pub fn canonicalize(&mut self) {
        pad_in_place(&mut self.index);
        pad_in_place(&mut self.scan);
        if let Some(precursor) = self.precursor.as_mut() {
            pad_in_place(&mut precursor.parent_index);
            pad_in_place(&mut precursor.parent_scan);
            precursor.fill_default_isolation_window();
        }
    }

    /// Iterates over (mz, intensity) pairs.
    pub fn peaks(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mz.iter().copied().zip(self.intensity.iter().copied())
    }
}

/// Left-pads an identifier with zeros up to [`IDENTIFIER_WIDTH`].
///
/// Identifiers that are already as wide (or wider) are returned unchanged.
///
/// ```
/// use isoquant::models::pad_identifier;
///
/// assert_eq!(pad_identifier("42"), "00042");
/// assert_eq!(pad_identifier("123456"), "123456");
/// ```
pub fn pad_identifier(id: &str) -> String {
    format!("{:0>width$}", id, width = IDENTIFIER_WIDTH)
}

fn pad_in_place(id: &mut String) {
    if id.len() < IDENTIFIER_WIDTH {
        *id = pad_identifier(id);
    }
}

/// Returns the `n`-th dot-delimited segment of a spectrum name,
/// e.g. segment 1 of `run.00042.00042.2` is `00042`.
pub fn spectrum_name_segment(name: &str, n: usize) -> Option<&str> {
    name.split('.').nth(n)
}

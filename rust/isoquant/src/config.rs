use crate::errors::ConfigError;
use crate::models::{
    LabelBrand,
    LabelSet,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Which scan the reporter ions are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuantLevel {
    #[default]
    #[serde(rename = "ms2")]
    Ms2,
    /// SPS-MS3: reporters are read from the MS3 scan and credited to its MS2 parent.
    #[serde(rename = "ms3")]
    Ms3,
}

/// Settings for isobaric quantification and evidence synchronization.
///
/// Example:
/// ```
/// use isoquant::QuantConfig;
///
/// let config = QuantConfig::default();
/// assert!(config.validate().is_ok());
/// let template = config.label_template().unwrap();
/// assert_eq!(template.channels.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantConfig {
    pub brand: LabelBrand,
    pub plex: u8,
    /// Reporter matching tolerance in ppm (symmetric).
    pub tolerance_ppm: f64,
    /// Substring that marks decoy protein headers.
    pub decoy_tag: String,
    pub level: QuantLevel,
    /// PSMs under this purity do not contribute to roll-up.
    pub min_purity: f64,
    pub min_probability: f64,
    /// Modification mass deltas that identify a labelled peptide.
    pub reagent_masses: Vec<f64>,
    pub reagent_mass_tolerance: f64,
    /// Sample names assigned to channels, in channel order.
    pub channel_names: Vec<String>,
    pub normalize: bool,
}

impl Default for QuantConfig {
    fn default() -> Self {
        Self {
            brand: LabelBrand::Tmt,
            plex: 10,
            tolerance_ppm: 20.0,
            decoy_tag: "rev_".to_string(),
            level: QuantLevel::Ms2,
            min_purity: 0.5,
            min_probability: 0.7,
            reagent_masses: vec![144.1020, 229.1629],
            reagent_mass_tolerance: 0.01,
            channel_names: Vec::new(),
            normalize: false,
        }
    }
}

impl QuantConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance_ppm.is_finite() && self.tolerance_ppm > 0.0) {
            return Err(ConfigError::InvalidTolerance {
                ppm: self.tolerance_ppm,
            });
        }
        if !(0.0..=1.0).contains(&self.min_purity) {
            return Err(ConfigError::InvalidThreshold {
                field: "min_purity",
                value: self.min_purity,
            });
        }
        if !(0.0..=1.0).contains(&self.min_probability) {
            return Err(ConfigError::InvalidThreshold {
                field: "min_probability",
                value: self.min_probability,
            });
        }
        if self.decoy_tag.is_empty() {
            return Err(ConfigError::EmptyDecoyTag);
        }
        self.label_template()?;
        Ok(())
    }

    /// Empty label set for the configured brand and plex, with custom names applied.
    pub fn label_template(&self) -> Result<LabelSet, ConfigError> {
        Ok(LabelSet::new(self.brand, self.plex)?.with_custom_names(&self.channel_names))
    }

    /// Tolerance expressed as a fraction of the channel m/z.
    pub fn ppm_precision(&self) -> f64 {
        self.tolerance_ppm / 1e6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let conf: QuantConfig =
            serde_json::from_str(r#"{"brand": "itraq", "plex": 4, "level": "ms3"}"#).unwrap();
        assert_eq!(conf.brand, LabelBrand::Itraq);
        assert_eq!(conf.level, QuantLevel::Ms3);
        assert_eq!(conf.decoy_tag, "rev_");
        assert_eq!(conf.tolerance_ppm, 20.0);
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let conf = QuantConfig {
            plex: 7,
            ..Default::default()
        };
        assert!(matches!(
            conf.validate(),
            Err(ConfigError::UnsupportedPlex { plex: 7, .. })
        ));

        let conf = QuantConfig {
            tolerance_ppm: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            conf.validate(),
            Err(ConfigError::InvalidTolerance { .. })
        ));

        let conf = QuantConfig {
            min_purity: 1.5,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_empty_decoy_tag_rejected() {
        let conf = QuantConfig {
            decoy_tag: String::new(),
            ..Default::default()
        };
        assert!(matches!(conf.validate(), Err(ConfigError::EmptyDecoyTag)));

        let conf: QuantConfig = serde_json::from_str(r#"{"decoy_tag": ""}"#).unwrap();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_template_custom_names() {
        let conf = QuantConfig {
            brand: LabelBrand::Itraq,
            plex: 4,
            channel_names: vec!["ctrl".into(), "drug".into()],
            ..Default::default()
        };
        let template = conf.label_template().unwrap();
        assert_eq!(template.channels[0].custom_name, "ctrl");
        assert_eq!(template.channels[3].custom_name, "");
        assert!((conf.ppm_precision() - 2e-5).abs() < 1e-12);
    }
}

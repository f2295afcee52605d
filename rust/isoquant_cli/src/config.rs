use isoquant::QuantConfig;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub quantification: QuantConfig,
    pub output: Option<OutputConfig>,
}

/// JSON documents produced by the upstream stages.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct InputConfig {
    pub spectra: Option<PathBuf>,
    pub evidence: Option<PathBuf>,
    pub database: Option<PathBuf>,
    /// When missing, the decisions stored on the evidence proteins are used.
    #[serde(default)]
    pub inference: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

use crate::models::LabelBrand;

#[derive(Debug)]
pub enum ConfigError {
    UnsupportedPlex {
        brand: LabelBrand,
        plex: u8,
    },
    InvalidTolerance {
        ppm: f64,
    },
    InvalidThreshold {
        field: &'static str,
        value: f64,
    },
    /// An empty tag would match every protein name.
    EmptyDecoyTag,
}

#[derive(Debug)]
pub enum DataProcessingError {
    /// Every channel summed to zero, so no factor can be derived.
    UndefinedNormalization {
        num_proteins: usize,
        context: String,
    },
}

impl DataProcessingError {
    pub fn append_to_context(mut self, context: &str) -> Self {
        match &mut self {
            DataProcessingError::UndefinedNormalization {
                context: owned_context,
                ..
            } => {
                owned_context.push_str(context);
            }
        }
        self
    }
}

#[derive(Debug)]
pub enum IsoQuantError {
    Config(ConfigError),
    DataProcessing(DataProcessingError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnsupportedPlex { brand, plex } => {
                write!(f, "No {} label definition for a {}-plex", brand.as_str(), plex)
            }
            ConfigError::InvalidTolerance { ppm } => {
                write!(f, "Reporter tolerance must be positive, got {} ppm", ppm)
            }
            ConfigError::InvalidThreshold { field, value } => {
                write!(f, "Invalid value {} for {}", value, field)
            }
            ConfigError::EmptyDecoyTag => write!(f, "Decoy tag must not be empty"),
        }
    }
}

impl std::fmt::Display for DataProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataProcessingError::UndefinedNormalization {
                num_proteins,
                context,
            } => write!(
                f,
                "Normalization undefined over {} proteins: {}",
                num_proteins, context
            ),
        }
    }
}

impl std::fmt::Display for IsoQuantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsoQuantError::Config(e) => write!(f, "Configuration error: {}", e),
            IsoQuantError::DataProcessing(e) => write!(f, "Data processing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, IsoQuantError>;

impl From<ConfigError> for IsoQuantError {
    fn from(x: ConfigError) -> Self {
        Self::Config(x)
    }
}

impl From<DataProcessingError> for IsoQuantError {
    fn from(x: DataProcessingError) -> Self {
        Self::DataProcessing(x)
    }
}

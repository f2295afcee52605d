pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod quant;
pub mod sync;
pub mod traits;

pub use config::{
    QuantConfig,
    QuantLevel,
};
pub use errors::{
    ConfigError,
    DataProcessingError,
    IsoQuantError,
    Result,
};
pub use models::{
    Evidence,
    LabelBrand,
    LabelSet,
    ProteinInference,
    SequenceDatabase,
    Spectrum,
};
pub use pipeline::{
    RunSummary,
    run,
};
pub use quant::{
    QuantSummary,
    run_isobaric_quantification,
};
pub use sync::{
    SyncSummary,
    synchronize_evidence,
};

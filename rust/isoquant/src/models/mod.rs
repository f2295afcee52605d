mod database;
mod evidence;
mod inference;
mod labels;
mod spectrum;

pub use database::{
    DatabaseRecord,
    SequenceDatabase,
};
pub use evidence::{
    Evidence,
    IonEvidence,
    Modification,
    PHOSPHO_MASS_DELTA,
    PeptideEvidence,
    PeptideIonEntry,
    ProteinAssignment,
    ProteinEvidence,
    PsmEvidence,
};
pub use inference::{
    InferredPeptideIon,
    ProteinInference,
};
pub use labels::{
    Channel,
    LabelBrand,
    LabelSet,
    MAX_CHANNELS,
};
pub use spectrum::{
    DEFAULT_ISOLATION_OFFSET,
    IDENTIFIER_WIDTH,
    MsLevel,
    Precursor,
    Spectrum,
    pad_identifier,
    spectrum_name_segment,
};

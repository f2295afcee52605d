use crate::config::QuantConfig;
use crate::errors::Result;
use crate::models::{
    Evidence,
    ProteinInference,
    SequenceDatabase,
    Spectrum,
};
use crate::quant::{
    QuantSummary,
    run_isobaric_quantification,
};
use crate::sync::{
    SyncSummary,
    synchronize_evidence,
};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub sync: SyncSummary,
    pub quant: QuantSummary,
}

/// Synchronizes evidence with inference and the database, then quantifies it.
///
/// Synchronization has to come first so that roll-up partitions spectra by
/// the final unique/razor assignments. The configuration is validated before
/// any input is modified.
pub fn run(
    config: &QuantConfig,
    spectra: &mut [Spectrum],
    evidence: &mut Evidence,
    database: &SequenceDatabase,
    inference: &ProteinInference,
) -> Result<RunSummary> {
    config.validate()?;
    let sync = synchronize_evidence(evidence, database, inference, &config.decoy_tag);
    let quant = run_isobaric_quantification(config, spectra, evidence)?;
    Ok(RunSummary { sync, quant })
}

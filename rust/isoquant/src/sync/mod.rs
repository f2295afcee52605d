//! Keeps PSM, ion, peptide and protein evidence consistent with protein
//! inference and the sequence database.

mod counts;
mod database;
mod status;
mod supporting;

pub use counts::{
    update_ion_mod_count,
    update_peptide_mod_count,
};
pub use database::{
    PeptideLocation,
    locate_peptide,
    update_layers_with_database,
};
pub use status::{
    InferenceMaps,
    update_ion_status,
    update_number_of_enzymatic_termini,
};
pub use supporting::{
    sync_psm_to_proteins,
    update_supporting_spectra,
};

use crate::models::{
    Evidence,
    ProteinInference,
    SequenceDatabase,
};
use serde::Serialize;
use std::time::Instant;
use tracing::{
    info,
    warn,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncSummary {
    pub reassigned: usize,
    pub ntt_updated: usize,
    pub annotated: usize,
    pub removed: usize,
}

/// Runs every synchronization step, in the order roll-up depends on.
pub fn synchronize_evidence(
    evidence: &mut Evidence,
    database: &SequenceDatabase,
    inference: &ProteinInference,
    decoy_tag: &str,
) -> SyncSummary {
    let st = Instant::now();
    let mut summary = SyncSummary::default();

    let maps = InferenceMaps::new(inference);
    summary.reassigned = update_ion_status(evidence, &maps, decoy_tag);
    summary.ntt_updated = update_number_of_enzymatic_termini(evidence, inference, decoy_tag);

    let lookup = database.target_lookup();
    summary.annotated = update_layers_with_database(&mut evidence.psms, &lookup, decoy_tag)
        + update_layers_with_database(&mut evidence.ions, &lookup, decoy_tag)
        + update_layers_with_database(&mut evidence.peptides, &lookup, decoy_tag);

    summary.removed = sync_psm_to_proteins(evidence);
    if summary.removed > 0 {
        warn!(
            "Removed {} records not backed by any reported protein",
            summary.removed
        );
    }

    update_supporting_spectra(evidence);
    update_ion_mod_count(evidence);
    update_peptide_mod_count(evidence);

    info!(
        "Synchronized evidence: {} reassigned, {} annotated, took: {:?}",
        summary.reassigned,
        summary.annotated,
        st.elapsed()
    );
    summary
}

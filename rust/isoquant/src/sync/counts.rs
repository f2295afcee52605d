use crate::models::{
    Evidence,
    PsmEvidence,
};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ObservationCounts {
    modified: usize,
    unmodified: usize,
}

fn count_by<'a, F>(psms: &'a [PsmEvidence], key: F) -> HashMap<&'a str, ObservationCounts>
where
    F: Fn(&'a PsmEvidence) -> &'a str,
{
    let mut out: HashMap<&str, ObservationCounts> = HashMap::new();
    for psm in psms {
        let entry = out.entry(key(psm)).or_default();
        if psm.is_unmodified_observation() {
            entry.unmodified += 1;
        } else {
            entry.modified += 1;
        }
    }
    out
}

/// Counts modified and unmodified PSM observations of every ion form.
pub fn update_ion_mod_count(evidence: &mut Evidence) {
    let counts = count_by(&evidence.psms, |p| p.ion_form.as_str());
    for ion in evidence.ions.iter_mut() {
        let c = counts
            .get(ion.ion_form.as_str())
            .copied()
            .unwrap_or_default();
        ion.modified_observations = c.modified;
        ion.unmodified_observations = c.unmodified;
    }
}

/// Counts modified and unmodified PSM observations of every peptide sequence.
pub fn update_peptide_mod_count(evidence: &mut Evidence) {
    let counts = count_by(&evidence.psms, |p| p.peptide.as_str());
    for pep in evidence.peptides.iter_mut() {
        let c = counts
            .get(pep.sequence.as_str())
            .copied()
            .unwrap_or_default();
        pep.modified_observations = c.modified;
        pep.unmodified_observations = c.unmodified;
    }
}

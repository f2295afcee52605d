//! Shared views over the PSM, ion and peptide evidence levels.
//!
//! The three levels carry the same protein assignment block and (for ions and
//! peptides) the same spectra membership set, so the roll-up and
//! synchronization passes are written once against these traits.

use crate::models::{
    IonEvidence,
    LabelSet,
    PeptideEvidence,
    ProteinAssignment,
    PsmEvidence,
};
use std::collections::BTreeSet;

/// Evidence that carries a protein assignment and a peptide sequence.
pub trait AssignedEvidence {
    fn sequence(&self) -> &str;
    fn assignment_mut(&mut self) -> &mut ProteinAssignment;
}

/// Evidence whose label sets are the sum of its member spectra.
pub trait SpectraAggregate {
    /// Borrows (member spectra, working labels, phospho labels) at once.
    fn rollup_parts(&mut self) -> (&BTreeSet<String>, &mut LabelSet, &mut LabelSet);
}

impl AssignedEvidence for PsmEvidence {
    fn sequence(&self) -> &str {
        &self.peptide
    }
    fn assignment_mut(&mut self) -> &mut ProteinAssignment {
        &mut self.assignment
    }
}

impl AssignedEvidence for IonEvidence {
    fn sequence(&self) -> &str {
        &self.sequence
    }
    fn assignment_mut(&mut self) -> &mut ProteinAssignment {
        &mut self.assignment
    }
}

impl AssignedEvidence for PeptideEvidence {
    fn sequence(&self) -> &str {
        &self.sequence
    }
    fn assignment_mut(&mut self) -> &mut ProteinAssignment {
        &mut self.assignment
    }
}

impl SpectraAggregate for IonEvidence {
    fn rollup_parts(&mut self) -> (&BTreeSet<String>, &mut LabelSet, &mut LabelSet) {
        (&self.spectra, &mut self.labels, &mut self.phospho_labels)
    }
}

impl SpectraAggregate for PeptideEvidence {
    fn rollup_parts(&mut self) -> (&BTreeSet<String>, &mut LabelSet, &mut LabelSet) {
        (&self.spectra, &mut self.labels, &mut self.phospho_labels)
    }
}

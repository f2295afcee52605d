use super::labels::LabelSet;
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::{
    BTreeMap,
    BTreeSet,
};

/// Mass delta of a phosphorylation, used to route PSMs into phospho accounting.
pub const PHOSPHO_MASS_DELTA: f64 = 79.96633;
const PHOSPHO_MASS_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub mass_diff: f64,
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub amino_acid: Option<char>,
}

/// Protein-level attributes pushed down onto PSMs, ions and peptides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProteinAssignment {
    /// Part header of the primary protein (the database lookup key).
    pub protein: String,
    pub protein_id: String,
    pub entry_name: String,
    pub gene_name: String,
    pub protein_description: String,
    /// Alternative proteins; never contains the primary protein.
    pub mapped_proteins: BTreeSet<String>,
    pub mapped_genes: BTreeSet<String>,
    pub is_unique: bool,
    pub is_razor: bool,
    pub is_decoy: bool,
    pub prev_aa: Option<char>,
    pub next_aa: Option<char>,
    pub protein_start: Option<usize>,
    pub protein_end: Option<usize>,
}

impl ProteinAssignment {
    /// Makes `new_protein` the primary protein, demoting the current one
    /// to the mapped set.
    pub fn reassign(&mut self, new_protein: &str) {
        let old = std::mem::replace(&mut self.protein, new_protein.to_string());
        if !old.is_empty() {
            self.mapped_proteins.insert(old);
        }
        self.mapped_proteins.remove(new_protein);
    }

    /// Whether any of the primary or mapped proteins is a target.
    pub fn has_target_protein(&self, decoy_tag: &str) -> bool {
        std::iter::once(&self.protein)
            .chain(self.mapped_proteins.iter())
            .any(|p| !p.is_empty() && !p.contains(decoy_tag))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsmEvidence {
    /// Dot-delimited spectrum name, `run.start_scan.end_scan.charge`.
    pub spectrum: String,
    pub peptide: String,
    pub ion_form: String,
    pub charge: u8,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub massdiff: f64,
    #[serde(default)]
    pub modifications: Vec<Modification>,
    #[serde(default)]
    pub number_of_enzymatic_termini: u8,
    /// `None` until purity has been computed for this PSM.
    #[serde(default)]
    pub purity: Option<f64>,
    #[serde(flatten)]
    pub assignment: ProteinAssignment,
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default)]
    pub phospho_labels: LabelSet,
}

impl PsmEvidence {
    pub fn is_phospho(&self) -> bool {
        self.modifications
            .iter()
            .any(|m| (m.mass_diff - PHOSPHO_MASS_DELTA).abs() <= PHOSPHO_MASS_TOLERANCE)
    }

    /// PSMs within a dalton of the unmodified mass count as unmodified.
    pub fn is_unmodified_observation(&self) -> bool {
        self.massdiff >= -0.99 && self.massdiff <= 0.99
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IonEvidence {
    pub ion_form: String,
    pub sequence: String,
    pub charge: u8,
    #[serde(default)]
    pub spectra: BTreeSet<String>,
    #[serde(default)]
    pub modified_observations: usize,
    #[serde(default)]
    pub unmodified_observations: usize,
    #[serde(flatten)]
    pub assignment: ProteinAssignment,
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default)]
    pub phospho_labels: LabelSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeptideEvidence {
    pub sequence: String,
    #[serde(default)]
    pub spectra: BTreeSet<String>,
    #[serde(default)]
    pub modified_observations: usize,
    #[serde(default)]
    pub unmodified_observations: usize,
    #[serde(flatten)]
    pub assignment: ProteinAssignment,
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default)]
    pub phospho_labels: LabelSet,
}

/// A peptide-ion as seen from the protein that claims it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeptideIonEntry {
    pub sequence: String,
    pub ion_form: String,
    pub charge: u8,
    #[serde(default)]
    pub spectra: BTreeSet<String>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_razor: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProteinEvidence {
    pub part_header: String,
    pub protein_id: String,
    #[serde(default)]
    pub is_decoy: bool,
    #[serde(default)]
    pub supporting_spectra: BTreeSet<String>,
    /// Keyed by ion form.
    #[serde(default)]
    pub total_peptide_ions: BTreeMap<String, PeptideIonEntry>,
    #[serde(default)]
    pub total_labels: LabelSet,
    #[serde(default)]
    pub unique_labels: LabelSet,
    #[serde(default)]
    pub urazor_labels: LabelSet,
    #[serde(default)]
    pub phospho_total_labels: LabelSet,
    #[serde(default)]
    pub phospho_unique_labels: LabelSet,
    #[serde(default)]
    pub phospho_urazor_labels: LabelSet,
}

/// All evidence of one experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub psms: Vec<PsmEvidence>,
    #[serde(default)]
    pub ions: Vec<IonEvidence>,
    #[serde(default)]
    pub peptides: Vec<PeptideEvidence>,
    #[serde(default)]
    pub proteins: Vec<ProteinEvidence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reassign_swaps_primary_into_mapped() {
        let mut asg = ProteinAssignment {
            protein: "sp|P1|A".into(),
            mapped_proteins: ["sp|P2|B".to_string(), "sp|P3|C".to_string()].into(),
            ..Default::default()
        };
        asg.reassign("sp|P2|B");
        assert_eq!(asg.protein, "sp|P2|B");
        assert!(asg.mapped_proteins.contains("sp|P1|A"));
        assert!(!asg.mapped_proteins.contains("sp|P2|B"));
        assert!(asg.mapped_proteins.contains("sp|P3|C"));
    }

    #[test]
    fn test_reassign_without_primary() {
        let mut asg = ProteinAssignment::default();
        asg.reassign("sp|P1|A");
        assert_eq!(asg.protein, "sp|P1|A");
        assert!(asg.mapped_proteins.is_empty());
    }

    #[test]
    fn test_has_target_protein() {
        let mut asg = ProteinAssignment {
            protein: "rev_sp|P1|A".into(),
            ..Default::default()
        };
        assert!(!asg.has_target_protein("rev_"));
        asg.mapped_proteins.insert("sp|P2|B".into());
        assert!(asg.has_target_protein("rev_"));
    }

    #[test]
    fn test_phospho_detection() {
        let mut psm = PsmEvidence::default();
        assert!(!psm.is_phospho());
        psm.modifications.push(Modification {
            mass_diff: 229.1629,
            position: 1,
            amino_acid: Some('K'),
        });
        assert!(!psm.is_phospho());
        psm.modifications.push(Modification {
            mass_diff: 79.9663,
            position: 4,
            amino_acid: Some('S'),
        });
        assert!(psm.is_phospho());
    }
}

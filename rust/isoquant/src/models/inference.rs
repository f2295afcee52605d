use super::evidence::ProteinEvidence;
use serde::{
    Deserialize,
    Serialize,
};

/// One peptide-ion as decided by protein inference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferredPeptideIon {
    /// Part header of the protein this decision belongs to.
    pub protein: String,
    pub sequence: String,
    pub ion_form: String,
    #[serde(default)]
    pub number_of_enzymatic_termini: u8,
    #[serde(default)]
    pub is_unique: bool,
    /// When set, `protein` is the razor protein for this ion.
    #[serde(default)]
    pub is_razor: bool,
}

/// Output of the protein inference stage, consumed read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProteinInference {
    pub peptide_ions: Vec<InferredPeptideIon>,
}

impl ProteinInference {
    pub fn new(peptide_ions: Vec<InferredPeptideIon>) -> Self {
        Self { peptide_ions }
    }

    /// Reads the decisions already stored on protein-level peptide-ions.
    ///
    /// Useful when inference ran upstream and only the protein list
    /// survived, which is how reports are usually regenerated.
    pub fn from_proteins(proteins: &[ProteinEvidence]) -> Self {
        let peptide_ions = proteins
            .iter()
            .flat_map(|p| {
                p.total_peptide_ions.values().map(|ion| InferredPeptideIon {
                    protein: p.part_header.clone(),
                    sequence: ion.sequence.clone(),
                    ion_form: ion.ion_form.clone(),
                    number_of_enzymatic_termini: 0,
                    is_unique: ion.is_unique,
                    is_razor: ion.is_razor,
                })
            })
            .collect();
        Self { peptide_ions }
    }
}

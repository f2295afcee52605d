use crate::models::{
    Evidence,
    ProteinInference,
};
use crate::traits::AssignedEvidence;
use std::collections::{
    HashMap,
    HashSet,
};

/// Uniqueness and razor decisions of protein inference, keyed for lookup.
#[derive(Debug, Default)]
pub struct InferenceMaps<'a> {
    pub unique_ions: HashSet<&'a str>,
    /// Ion form -> razor protein.
    pub razor_by_ion: HashMap<&'a str, &'a str>,
    /// Peptide sequence -> razor protein.
    pub razor_by_sequence: HashMap<&'a str, &'a str>,
}

impl<'a> InferenceMaps<'a> {
    pub fn new(inference: &'a ProteinInference) -> Self {
        let mut maps = Self::default();
        for ion in inference.peptide_ions.iter() {
            if ion.is_unique {
                maps.unique_ions.insert(ion.ion_form.as_str());
            }
            if ion.is_razor {
                maps.razor_by_ion
                    .insert(ion.ion_form.as_str(), ion.protein.as_str());
                maps.razor_by_sequence
                    .insert(ion.sequence.as_str(), ion.protein.as_str());
            }
        }
        maps
    }
}

/// Makes `razor_protein` the primary protein of `record`.
///
/// Skipped when the razor protein is a decoy but the record can still be
/// explained by a target protein. Returns whether the record was reassigned.
fn apply_razor<T: AssignedEvidence>(record: &mut T, razor_protein: &str, decoy_tag: &str) -> bool {
    let assignment = record.assignment_mut();
    let razor_is_decoy = razor_protein.contains(decoy_tag);
    if razor_is_decoy && assignment.has_target_protein(decoy_tag) {
        return false;
    }
    assignment.reassign(razor_protein);
    assignment.is_razor = true;
    assignment.is_decoy = razor_is_decoy;
    true
}

/// Pushes inference uniqueness and razor decisions down to PSMs, ions and peptides.
///
/// PSMs look up their razor protein by ion form and fall back to the peptide
/// sequence; ions only use the ion form and peptides only the sequence.
/// Returns the number of reassigned records.
pub fn update_ion_status(evidence: &mut Evidence, maps: &InferenceMaps, decoy_tag: &str) -> usize {
    let mut reassigned = 0;

    for psm in evidence.psms.iter_mut() {
        let razor = maps
            .razor_by_ion
            .get(psm.ion_form.as_str())
            .or_else(|| maps.razor_by_sequence.get(psm.peptide.as_str()));
        if let Some(razor) = razor {
            reassigned += apply_razor(psm, razor, decoy_tag) as usize;
        }
        psm.assignment.is_unique = maps.unique_ions.contains(psm.ion_form.as_str());
    }

    for ion in evidence.ions.iter_mut() {
        if let Some(razor) = maps.razor_by_ion.get(ion.ion_form.as_str()) {
            reassigned += apply_razor(ion, razor, decoy_tag) as usize;
        }
        ion.assignment.is_unique = maps.unique_ions.contains(ion.ion_form.as_str());
    }

    for pep in evidence.peptides.iter_mut() {
        if let Some(razor) = maps.razor_by_sequence.get(pep.sequence.as_str()) {
            reassigned += apply_razor(pep, razor, decoy_tag) as usize;
        }
    }

    reassigned
}

/// Copies the enzymatic termini count of target (sequence, protein) pairs onto PSMs.
pub fn update_number_of_enzymatic_termini(
    evidence: &mut Evidence,
    inference: &ProteinInference,
    decoy_tag: &str,
) -> usize {
    let ntt: HashMap<(&str, &str), u8> = inference
        .peptide_ions
        .iter()
        .filter(|ion| !ion.protein.contains(decoy_tag))
        .map(|ion| {
            (
                (ion.sequence.as_str(), ion.protein.as_str()),
                ion.number_of_enzymatic_termini,
            )
        })
        .collect();

    let mut updated = 0;
    for psm in evidence.psms.iter_mut() {
        let key = (psm.peptide.as_str(), psm.assignment.protein.as_str());
        if let Some(value) = ntt.get(&key) {
            psm.number_of_enzymatic_termini = *value;
            updated += 1;
        }
    }
    updated
}

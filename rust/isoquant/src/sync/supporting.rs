use crate::models::Evidence;
use std::collections::{
    BTreeSet,
    HashMap,
    HashSet,
};

/// Drops PSMs, ions and peptides whose protein id is not in the protein list.
///
/// Relative order of the kept records is preserved. Returns the number of
/// removed records.
pub fn sync_psm_to_proteins(evidence: &mut Evidence) -> usize {
    let protein_ids: HashSet<&str> = evidence
        .proteins
        .iter()
        .map(|p| p.protein_id.as_str())
        .collect();
    let before = evidence.psms.len() + evidence.ions.len() + evidence.peptides.len();

    evidence
        .psms
        .retain(|x| protein_ids.contains(x.assignment.protein_id.as_str()));
    evidence
        .ions
        .retain(|x| protein_ids.contains(x.assignment.protein_id.as_str()));
    evidence
        .peptides
        .retain(|x| protein_ids.contains(x.assignment.protein_id.as_str()));

    before - (evidence.psms.len() + evidence.ions.len() + evidence.peptides.len())
}

fn extend_spectra(set: &mut BTreeSet<String>, spectra: Option<&Vec<&str>>) {
    if let Some(spectra) = spectra {
        set.extend(spectra.iter().map(|s| s.to_string()));
    }
}

/// Recomputes which spectra support each protein and peptide-ion.
///
/// Peptide-ions without spectra are pruned first. Each protein then gains the
/// spectra of the PSMs assigned to it, and each peptide-ion gains the spectra
/// of unique (resp. razor) PSMs of the same ion form when it is itself flagged
/// unique (resp. razor).
pub fn update_supporting_spectra(evidence: &mut Evidence) {
    let mut by_protein: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut unique_by_ion: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut razor_by_ion: HashMap<&str, Vec<&str>> = HashMap::new();

    for psm in evidence.psms.iter() {
        let spectrum = psm.spectrum.as_str();
        by_protein
            .entry(psm.assignment.protein.as_str())
            .or_default()
            .push(spectrum);
        if psm.assignment.is_unique {
            unique_by_ion
                .entry(psm.ion_form.as_str())
                .or_default()
                .push(spectrum);
        }
        if psm.assignment.is_razor {
            razor_by_ion
                .entry(psm.ion_form.as_str())
                .or_default()
                .push(spectrum);
        }
    }

    for protein in evidence.proteins.iter_mut() {
        protein
            .total_peptide_ions
            .retain(|_, ion| !ion.spectra.is_empty());

        extend_spectra(
            &mut protein.supporting_spectra,
            by_protein.get(protein.part_header.as_str()),
        );

        for ion in protein.total_peptide_ions.values_mut() {
            if ion.is_unique {
                extend_spectra(&mut ion.spectra, unique_by_ion.get(ion.ion_form.as_str()));
            }
            if ion.is_razor {
                extend_spectra(&mut ion.spectra, razor_by_ion.get(ion.ion_form.as_str()));
            }
        }
    }
}

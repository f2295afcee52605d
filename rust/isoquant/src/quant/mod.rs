//! Isobaric reporter quantification.
//!
//! Stages run in order: index spectra, estimate precursor purity, extract
//! reporter channels, map them onto PSMs, zero unlabelled PSMs, roll the
//! surviving spectra up to peptides, ions and proteins, and optionally
//! normalize the protein razor channels.

pub mod extraction;
pub mod index;
pub mod normalize;
pub mod purity;
pub mod rollup;
pub mod usage;

pub use extraction::{
    LabelIndex,
    extract_channels,
    prepare_label_structure,
};
pub use index::SpectralIndex;
pub use normalize::normalize_to_total_proteins;
pub use purity::{
    calculate_ion_purity,
    precursor_purity,
};
pub use rollup::{
    roll_up_proteins,
    roll_up_spectra,
};
pub use usage::{
    SpectrumLabels,
    assign_usage,
    build_spectrum_maps,
    correct_unlabelled_spectra,
    map_labeled_spectra,
};

use crate::config::QuantConfig;
use crate::errors::Result;
use crate::models::{
    Evidence,
    LabelSet,
    Spectrum,
};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Counts reported by a quantification run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuantSummary {
    pub psms_with_purity: usize,
    pub label_sets: usize,
    pub psms_labelled: usize,
    pub psms_zeroed: usize,
    pub psms_used: usize,
    pub phospho_spectra: usize,
    /// Factors applied to the URazor channels, when normalization ran.
    pub normalization_factors: Option<Vec<f64>>,
}

fn reset_labels(evidence: &mut Evidence, template: &LabelSet) {
    // PSMs only get channels by mapping; an empty set means "not labelled"
    for psm in evidence.psms.iter_mut() {
        psm.labels = LabelSet::default();
        psm.phospho_labels = LabelSet::default();
    }
    for ion in evidence.ions.iter_mut() {
        ion.labels = template.clone();
        ion.phospho_labels = template.clone();
    }
    for pep in evidence.peptides.iter_mut() {
        pep.labels = template.clone();
        pep.phospho_labels = template.clone();
    }
    for prot in evidence.proteins.iter_mut() {
        prot.total_labels = template.clone();
        prot.unique_labels = template.clone();
        prot.urazor_labels = template.clone();
        prot.phospho_total_labels = template.clone();
        prot.phospho_unique_labels = template.clone();
        prot.phospho_urazor_labels = template.clone();
    }
}

/// Quantifies reporter ions and rolls them up through every evidence level.
///
/// Ion, peptide and protein label sets are rebuilt from the configured
/// template and PSM sets are cleared before mapping, so running twice on the
/// same inputs gives the same result.
///
/// # Errors
/// Fails before touching any input when the configuration is invalid. When
/// normalization is enabled and every razor channel sums to zero, the
/// error is returned after roll-up, with the rolled-up values left unscaled.
pub fn run_isobaric_quantification(
    config: &QuantConfig,
    spectra: &mut [Spectrum],
    evidence: &mut Evidence,
) -> Result<QuantSummary> {
    config.validate()?;
    let template = config.label_template()?;
    let mut summary = QuantSummary::default();

    let st = Instant::now();
    let index = SpectralIndex::build(spectra);
    info!(
        "Indexed {} MS1 and {} MS2 scans, took: {:?}",
        index.ms1.len(),
        index.ms2.len(),
        st.elapsed()
    );

    let st = Instant::now();
    summary.psms_with_purity = calculate_ion_purity(&index, &mut evidence.psms);
    info!(
        "Computed purity for {}/{} PSMs, took: {:?}",
        summary.psms_with_purity,
        evidence.psms.len(),
        st.elapsed()
    );

    let label_index = prepare_label_structure(spectra, &template, config.ppm_precision(), config.level);
    summary.label_sets = label_index.len();

    let st = Instant::now();
    reset_labels(evidence, &template);
    summary.psms_labelled = map_labeled_spectra(&label_index, &mut evidence.psms);
    summary.psms_zeroed = correct_unlabelled_spectra(
        &mut evidence.psms,
        &config.reagent_masses,
        config.reagent_mass_tolerance,
    );
    let (spectrum_map, phospho_map) =
        build_spectrum_maps(&evidence.psms, config.min_purity, config.min_probability);
    summary.psms_used = assign_usage(&mut evidence.psms, &spectrum_map);
    summary.phospho_spectra = phospho_map.len();
    info!(
        "Labelled {} PSMs ({} zeroed, {} used, {} phospho), took: {:?}",
        summary.psms_labelled,
        summary.psms_zeroed,
        summary.psms_used,
        summary.phospho_spectra,
        st.elapsed()
    );

    let st = Instant::now();
    roll_up_spectra(&mut evidence.peptides, &spectrum_map, &phospho_map);
    roll_up_spectra(&mut evidence.ions, &spectrum_map, &phospho_map);
    roll_up_proteins(&mut evidence.proteins, &spectrum_map, &phospho_map);
    info!(
        "Rolled up {} peptides, {} ions and {} proteins, took: {:?}",
        evidence.peptides.len(),
        evidence.ions.len(),
        evidence.proteins.len(),
        st.elapsed()
    );

    if config.normalize {
        let factors = normalize_to_total_proteins(&mut evidence.proteins)
            .map_err(|e| e.append_to_context(" while normalizing protein razor channels"))?;
        info!("Normalization factors: {:?}", factors);
        summary.normalization_factors = Some(factors);
    }

    Ok(summary)
}

use super::extraction::LabelIndex;
use crate::models::{
    LabelSet,
    PsmEvidence,
    spectrum_name_segment,
};
use rayon::prelude::*;
use std::collections::HashMap;

/// Label sets keyed by full spectrum name, as consumed by roll-up.
pub type SpectrumLabels = HashMap<String, LabelSet>;

/// Copies extracted channel intensities onto PSMs, by end scan (third name segment).
///
/// Phosphorylated PSMs also receive the same values in their phospho set.
/// Returns how many PSMs received labels.
pub fn map_labeled_spectra(labels: &LabelIndex, psms: &mut [PsmEvidence]) -> usize {
    psms.par_iter_mut()
        .map(|psm| {
            let Some(found) = spectrum_name_segment(&psm.spectrum, 2).and_then(|s| labels.get(s))
            else {
                return 0;
            };
            psm.labels.assign_from(found);
            if psm.is_phospho() {
                psm.phospho_labels.assign_from(found);
            }
            1
        })
        .sum()
}

fn carries_reagent(psm: &PsmEvidence, reagent_masses: &[f64], tolerance: f64) -> bool {
    psm.modifications.iter().any(|m| {
        reagent_masses
            .iter()
            .any(|r| (m.mass_diff - r).abs() <= tolerance)
    })
}

/// Zeroes the channels of PSMs that cannot carry a reporter signal.
///
/// A PSM qualifies only when one of its modifications matches a labelling
/// reagent mass. Returns how many PSMs were zeroed.
pub fn correct_unlabelled_spectra(
    psms: &mut [PsmEvidence],
    reagent_masses: &[f64],
    tolerance: f64,
) -> usize {
    psms.par_iter_mut()
        .map(|psm| {
            if psm.modifications.is_empty() || !carries_reagent(psm, reagent_masses, tolerance) {
                psm.labels.zero_intensities();
                psm.phospho_labels.zero_intensities();
                1
            } else {
                0
            }
        })
        .sum()
}

/// Builds the primary and phospho spectrum maps from quantified PSMs.
///
/// Only PSMs that received labels and pass both the purity and probability
/// thresholds contribute. A PSM without a computed purity does not pass.
pub fn build_spectrum_maps(
    psms: &[PsmEvidence],
    min_purity: f64,
    min_probability: f64,
) -> (SpectrumLabels, SpectrumLabels) {
    let mut primary = SpectrumLabels::new();
    let mut phospho = SpectrumLabels::new();

    for psm in psms {
        if psm.labels.channels.is_empty() {
            continue;
        }
        let passes_purity = psm.purity.is_some_and(|p| p >= min_purity);
        if !passes_purity || psm.probability < min_probability {
            continue;
        }
        primary.insert(psm.spectrum.clone(), psm.labels.clone());
        if psm.is_phospho() {
            phospho.insert(psm.spectrum.clone(), psm.phospho_labels.clone());
        }
    }
    (primary, phospho)
}

/// Flags PSMs whose spectrum made it into the primary map.
///
/// Phospho accounting does not affect usage.
pub fn assign_usage(psms: &mut [PsmEvidence], spectrum_map: &SpectrumLabels) -> usize {
    let mut used = 0;
    for psm in psms.iter_mut() {
        if spectrum_map.contains_key(&psm.spectrum) {
            psm.labels.is_used = true;
            used += 1;
        }
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        LabelBrand,
        Modification,
        PHOSPHO_MASS_DELTA,
    };

    const REAGENTS: [f64; 2] = [144.1020, 229.1629];

    fn labelled(intensity: f64) -> LabelSet {
        let mut out = LabelSet::new(LabelBrand::Tmt, 16).unwrap();
        out.channels.iter_mut().for_each(|c| c.intensity = intensity);
        out
    }

    fn psm(name: &str, mods: &[f64]) -> PsmEvidence {
        PsmEvidence {
            spectrum: name.into(),
            probability: 0.99,
            purity: Some(0.9),
            modifications: mods
                .iter()
                .map(|m| Modification {
                    mass_diff: *m,
                    ..Default::default()
                })
                .collect(),
            labels: labelled(100.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_unmodified_psm_is_zeroed() {
        let mut psms = vec![psm("run.00001.00001.2", &[])];
        assert_eq!(correct_unlabelled_spectra(&mut psms, &REAGENTS, 0.01), 1);
        assert_eq!(psms[0].labels.channels.len(), 16);
        assert!(psms[0].labels.channels.iter().all(|c| c.intensity == 0.0));
    }

    #[test]
    fn test_only_reagent_modified_psms_keep_signal() {
        let mut psms = vec![
            psm("run.00001.00001.2", &[15.9949]),
            psm("run.00002.00002.2", &[15.9949, 229.1629]),
            psm("run.00003.00003.2", &[144.1021]),
        ];
        assert_eq!(correct_unlabelled_spectra(&mut psms, &REAGENTS, 0.01), 1);
        assert_eq!(psms[0].labels.total_intensity(), 0.0);
        assert_eq!(psms[1].labels.total_intensity(), 1600.0);
        assert_eq!(psms[2].labels.total_intensity(), 1600.0);
    }

    #[test]
    fn test_map_by_end_scan_and_phospho_copy() {
        let mut index = LabelIndex::new();
        index.insert("00005".into(), labelled(3.0));
        let mut psms = vec![
            psm("run.00004.00005.2", &[229.1629, PHOSPHO_MASS_DELTA]),
            psm("run.00005.00004.2", &[229.1629]),
        ];
        psms.iter_mut().for_each(|p| p.labels = LabelSet::default());

        assert_eq!(map_labeled_spectra(&index, &mut psms), 1);
        assert_eq!(psms[0].labels.total_intensity(), 48.0);
        assert_eq!(psms[0].phospho_labels.total_intensity(), 48.0);
        assert!(psms[1].labels.channels.is_empty());
    }

    #[test]
    fn test_spectrum_maps_and_usage() {
        let mut psms = vec![
            psm("run.00001.00001.2", &[229.1629]),
            psm("run.00002.00002.2", &[229.1629, PHOSPHO_MASS_DELTA]),
            psm("run.00003.00003.2", &[229.1629]),
            psm("run.00004.00004.2", &[229.1629]),
        ];
        psms[2].purity = Some(0.2);
        psms[3].purity = None;

        let (primary, phospho) = build_spectrum_maps(&psms, 0.5, 0.7);
        assert_eq!(primary.len(), 2);
        assert_eq!(phospho.len(), 1);
        assert!(phospho.contains_key("run.00002.00002.2"));

        assert_eq!(assign_usage(&mut psms, &primary), 2);
        assert!(psms[0].labels.is_used);
        assert!(psms[1].labels.is_used);
        assert!(!psms[2].labels.is_used);
        assert!(!psms[3].labels.is_used);
    }
}

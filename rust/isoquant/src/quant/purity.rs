use super::index::SpectralIndex;
use crate::models::{
    Precursor,
    PsmEvidence,
    spectrum_name_segment,
};
use rayon::prelude::*;

/// Number of isotope spacings checked around the target ion.
const NUM_ISOTOPES: u8 = 6;
/// Absolute m/z slack when matching a peak to an isotope spacing.
const ISOTOPE_MZ_TOLERANCE: f64 = 0.02;

// Purity is reported truncated, not rounded; the epsilon absorbs binary
// representation error such as 0.84 * 100 = 83.99999...
fn truncate_to_hundredths(x: f64) -> f64 {
    (x * 100.0 + 1e-9).floor() / 100.0
}

fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Expected m/z spacings `k / charge` for k = 1..=6, at 0.01 resolution.
fn isotope_spacings(charge: u8) -> Vec<f64> {
    if charge == 0 {
        return Vec::new();
    }
    (1..=NUM_ISOTOPES)
        .map(|k| round_to_hundredths(k as f64 / charge as f64))
        .collect()
}

/// Purity of the precursor isolated for an MS2 scan.
///
/// The isotope envelope is seeded with the target-ion intensity computed at
/// indexing time; every other window peak sitting at an isotope spacing from
/// the target is added unless its intensity equals the seed.
pub fn precursor_purity(precursor: &Precursor, index: &SpectralIndex) -> f64 {
    let target = precursor.target_ion;
    let half_width = precursor.isolation_window_upper_offset;

    let window: Vec<(f64, f64)> = index
        .ms1
        .get(&precursor.parent_scan)
        .map(|p| p.peaks_within(target - half_width, target + half_width).collect())
        .unwrap_or_default();
    let window_sum: f64 = window.iter().map(|(_, i)| i).sum();

    let spacings = isotope_spacings(precursor.charge_state);
    let mut isotope_sum = precursor.target_ion_intensity;
    for (mz, intensity) in window.iter() {
        let distance = (target - mz).abs();
        let matched = spacings
            .iter()
            .any(|m| distance >= m - ISOTOPE_MZ_TOLERANCE && distance <= m + ISOTOPE_MZ_TOLERANCE);
        if matched && *intensity != precursor.target_ion_intensity {
            isotope_sum += intensity;
        }
    }

    if isotope_sum == 0.0 || window_sum == 0.0 {
        return 0.0;
    }
    truncate_to_hundredths(isotope_sum / window_sum).min(1.0)
}

/// Assigns precursor purity to every PSM whose MS2 scan is indexed.
///
/// The MS2 scan is the second segment of the spectrum name. PSMs whose scan
/// is not indexed keep their previous value.
pub fn calculate_ion_purity(index: &SpectralIndex, psms: &mut [PsmEvidence]) -> usize {
    psms.par_iter_mut()
        .map(|psm| {
            match spectrum_name_segment(&psm.spectrum, 1).and_then(|s| index.ms2.get(s)) {
                Some(precursor) => {
                    psm.purity = Some(precursor_purity(precursor, index));
                    1
                }
                None => 0,
            }
        })
        .sum()
}

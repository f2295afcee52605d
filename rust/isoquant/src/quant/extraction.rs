use crate::config::QuantLevel;
use crate::models::{
    LabelSet,
    MsLevel,
    Spectrum,
    pad_identifier,
};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Reporter ions of the supported chemistries never appear above this m/z.
pub const REPORTER_MZ_CEILING: f64 = 135.0;

/// Extracted label sets keyed by padded MS2 scan.
pub type LabelIndex = HashMap<String, LabelSet>;

/// Fills a copy of `template` with the most intense peak per channel.
///
/// The m/z array is expected in ascending order; scanning stops at the first
/// peak above every channel window.
pub fn extract_channels(spectrum: &Spectrum, template: &LabelSet, ppm_precision: f64) -> LabelSet {
    let mut labels = template.clone();
    let stop_after = template
        .max_channel_bound(ppm_precision)
        .max(REPORTER_MZ_CEILING);

    for (mz, intensity) in spectrum.peaks() {
        for channel in labels.channels.iter_mut() {
            if channel.matches(mz, ppm_precision) {
                channel.observe(intensity);
            }
        }
        if mz > stop_after {
            break;
        }
    }

    labels.index = spectrum.index.clone();
    labels.scan = pad_identifier(&spectrum.scan);
    labels.charge_state = spectrum
        .precursor
        .as_ref()
        .map(|p| p.charge_state)
        .unwrap_or_default();
    labels
}

/// Extracts reporter intensities for every fragment scan of the requested level.
///
/// MS2 sets are keyed by their own scan. MS3 sets are keyed by the parent MS2
/// scan, since that is where the PSM was identified.
pub fn prepare_label_structure(
    spectra: &[Spectrum],
    template: &LabelSet,
    ppm_precision: f64,
    level: QuantLevel,
) -> LabelIndex {
    let st = Instant::now();
    let wanted = match level {
        QuantLevel::Ms2 => MsLevel::Ms2,
        QuantLevel::Ms3 => MsLevel::Ms3,
    };

    let out: LabelIndex = spectra
        .par_iter()
        .filter(|s| s.level == wanted)
        .filter_map(|s| {
            let key = match level {
                QuantLevel::Ms2 => pad_identifier(&s.scan),
                QuantLevel::Ms3 => pad_identifier(&s.precursor.as_ref()?.parent_scan),
            };
            Some((key, extract_channels(s, template, ppm_precision)))
        })
        .collect();

    info!(
        "Extracted {} label sets from {:?} scans, took: {:?}",
        out.len(),
        level,
        st.elapsed()
    );
    out
}

use crate::models::{
    MsLevel,
    Precursor,
    Spectrum,
};
use std::collections::HashMap;
use tracing::debug;

/// Centroided MS1 arrays, kept for precursor purity lookups.
#[derive(Debug, Clone, Default)]
pub struct Ms1Peaks {
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl Ms1Peaks {
    /// Peaks whose m/z lies within `[low, high]` (both inclusive).
    pub fn peaks_within(&self, low: f64, high: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mz
            .iter()
            .copied()
            .zip(self.intensity.iter().copied())
            .filter(move |(mz, _)| *mz >= low && *mz <= high)
    }
}

/// MS1 peaks and MS2 precursors keyed by padded scan number.
#[derive(Debug, Clone, Default)]
pub struct SpectralIndex {
    pub ms1: HashMap<String, Ms1Peaks>,
    pub ms2: HashMap<String, Precursor>,
}

impl SpectralIndex {
    /// Canonicalizes every spectrum in place and indexes MS1/MS2 scans.
    ///
    /// Each MS2 precursor gets its `target_ion_intensity` set to the most
    /// intense parent MS1 peak inside its isolation window. Only the precursor
    /// of an MS2 scan is indexed, and MS2 scans without one are skipped.
    /// Spectra of other levels are canonicalized but not indexed.
    pub fn build(spectra: &mut [Spectrum]) -> Self {
        let mut index = SpectralIndex::default();
        spectra.iter_mut().for_each(Spectrum::canonicalize);

        // MS1 first, so parent lookups do not depend on acquisition order.
        for spec in spectra.iter().filter(|s| s.level == MsLevel::Ms1) {
            index.ms1.insert(
                spec.scan.clone(),
                Ms1Peaks {
                    mz: spec.mz.clone(),
                    intensity: spec.intensity.clone(),
                },
            );
        }

        for spec in spectra.iter_mut().filter(|s| s.level == MsLevel::Ms2) {
            let Some(precursor) = spec.precursor.as_mut() else {
                continue;
            };
            if let Some(parent) = index.ms1.get(&precursor.parent_scan) {
                let low = precursor.isolation_lower_bound();
                let high = precursor.isolation_upper_bound();
                for (_mz, intensity) in parent.peaks_within(low, high) {
                    if intensity > precursor.target_ion_intensity {
                        precursor.target_ion_intensity = intensity;
                    }
                }
            }
            index.ms2.insert(spec.scan.clone(), precursor.clone());
        }

        debug!(
            "Indexed {} MS1 and {} MS2 scans out of {} spectra",
            index.ms1.len(),
            index.ms2.len(),
            spectra.len()
        );
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms1(scan: &str, mz: Vec<f64>, intensity: Vec<f64>) -> Spectrum {
        Spectrum {
            level: MsLevel::Ms1,
            index: scan.into(),
            scan: scan.into(),
            mz,
            intensity,
            precursor: None,
        }
    }

    fn ms2(scan: &str, parent: &str, target: f64) -> Spectrum {
        Spectrum {
            level: MsLevel::Ms2,
            index: scan.into(),
            scan: scan.into(),
            mz: vec![126.0],
            intensity: vec![1.0],
            precursor: Some(Precursor {
                parent_index: parent.into(),
                parent_scan: parent.into(),
                target_ion: target,
                charge_state: 2,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_build_index_and_target_intensity() {
        // MS2 listed before its parent on purpose
        let mut spectra = vec![
            ms2("2", "1", 500.5),
            ms1("1", vec![499.0, 500.0, 500.5, 501.0, 502.0], vec![9e9, 300.0, 200.0, 50.0, 9e9]),
            Spectrum {
                level: MsLevel::Unrecognized(4),
                ..ms1("3", vec![], vec![])
            },
        ];
        let index = SpectralIndex::build(&mut spectra);

        assert_eq!(index.ms1.len(), 1);
        assert_eq!(index.ms2.len(), 1);
        assert!(index.ms1.contains_key("00001"));
        let prec = &index.ms2["00002"];
        assert_eq!(prec.parent_scan, "00001");
        // window 500.0..=501.0, peaks outside are ignored
        assert_eq!(prec.target_ion_intensity, 300.0);
        // the caller's copy is updated too
        assert_eq!(
            spectra[0].precursor.as_ref().unwrap().target_ion_intensity,
            300.0
        );
        // unrecognized level still normalized
        assert_eq!(spectra[2].scan, "00003");
    }

    #[test]
    fn test_missing_parent_leaves_intensity_zero() {
        let mut spectra = vec![ms2("10", "9", 400.0)];
        let index = SpectralIndex::build(&mut spectra);
        assert_eq!(index.ms2["00010"].target_ion_intensity, 0.0);
    }

    #[test]
    fn test_ms2_without_precursor_not_indexed() {
        let mut spectra = vec![
            ms2("2", "1", 500.0),
            Spectrum {
                precursor: None,
                ..ms2("3", "1", 0.0)
            },
        ];
        let index = SpectralIndex::build(&mut spectra);
        assert_eq!(index.ms2.len(), 1);
        assert!(index.ms2.contains_key("00002"));
        assert!(!index.ms2.contains_key("00003"));
        assert_eq!(spectra[1].scan, "00003");
    }
}

use super::usage::SpectrumLabels;
use crate::models::ProteinEvidence;
use crate::traits::SpectraAggregate;
use rayon::prelude::*;

/// Sums the labels of every member spectrum into each peptide or ion.
///
/// Spectra missing from a map contribute nothing to the matching set.
pub fn roll_up_spectra<T: SpectraAggregate + Send>(
    records: &mut [T],
    spectrum_map: &SpectrumLabels,
    phospho_map: &SpectrumLabels,
) {
    records.par_iter_mut().for_each(|record| {
        let (spectra, labels, phospho_labels) = record.rollup_parts();
        for spectrum in spectra.iter() {
            if let Some(found) = spectrum_map.get(spectrum) {
                labels.accumulate(found);
            }
            if let Some(found) = phospho_map.get(spectrum) {
                phospho_labels.accumulate(found);
            }
        }
    });
}

/// Sums spectra into the Total, Unique and URazor sets of each protein.
///
/// Unique and URazor only receive spectra of peptide-ions flagged as such.
/// The phospho counterparts are filled from `phospho_map` with the same gating.
pub fn roll_up_proteins(
    proteins: &mut [ProteinEvidence],
    spectrum_map: &SpectrumLabels,
    phospho_map: &SpectrumLabels,
) {
    proteins.par_iter_mut().for_each(|protein| {
        for ion in protein.total_peptide_ions.values() {
            for spectrum in ion.spectra.iter() {
                if let Some(found) = spectrum_map.get(spectrum) {
                    protein.total_labels.accumulate(found);
                    if ion.is_unique {
                        protein.unique_labels.accumulate(found);
                    }
                    if ion.is_razor {
                        protein.urazor_labels.accumulate(found);
                    }
                }
                if let Some(found) = phospho_map.get(spectrum) {
                    protein.phospho_total_labels.accumulate(found);
                    if ion.is_unique {
                        protein.phospho_unique_labels.accumulate(found);
                    }
                    if ion.is_razor {
                        protein.phospho_urazor_labels.accumulate(found);
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        IonEvidence,
        LabelBrand,
        LabelSet,
        PeptideEvidence,
        PeptideIonEntry,
    };

    fn labels(first_channel: f64) -> LabelSet {
        let mut out = LabelSet::new(LabelBrand::Tmt, 6).unwrap();
        out.channels[0].intensity = first_channel;
        out.channels[5].intensity = 1.0;
        out
    }

    fn entry(ion_form: &str, spectra: &[&str], is_unique: bool, is_razor: bool) -> PeptideIonEntry {
        PeptideIonEntry {
            ion_form: ion_form.into(),
            spectra: spectra.iter().map(|s| s.to_string()).collect(),
            is_unique,
            is_razor,
            ..Default::default()
        }
    }

    #[test]
    fn test_protein_partitions() {
        let mut map = SpectrumLabels::new();
        map.insert("s1".into(), labels(10.0));
        map.insert("s2".into(), labels(20.0));
        map.insert("s3".into(), labels(30.0));

        let mut proteins = vec![ProteinEvidence {
            part_header: "sp|P|PROT".into(),
            total_peptide_ions: [
                ("A#2".to_string(), entry("A#2", &["s1", "s2"], false, false)),
                ("B#2".to_string(), entry("B#2", &["s3"], true, true)),
            ]
            .into(),
            ..Default::default()
        }];
        roll_up_proteins(&mut proteins, &map, &SpectrumLabels::new());

        let p = &proteins[0];
        assert_eq!(p.total_labels.channels[0].intensity, 60.0);
        assert_eq!(p.unique_labels.channels[0].intensity, 30.0);
        assert_eq!(p.urazor_labels.channels[0].intensity, 30.0);
        assert_eq!(p.total_labels.channels[0].name, "126");
        assert!(p.phospho_total_labels.channels.is_empty());
    }

    #[test]
    fn test_unique_and_razor_partitions_are_independent() {
        let mut map = SpectrumLabels::new();
        map.insert("a".into(), labels(10.0));
        map.insert("b".into(), labels(20.0));
        map.insert("c".into(), labels(30.0));

        let mut proteins = vec![ProteinEvidence {
            part_header: "sp|P|PROT".into(),
            total_peptide_ions: [
                ("U#2".to_string(), entry("U#2", &["a", "b"], true, false)),
                ("R#2".to_string(), entry("R#2", &["c"], false, true)),
            ]
            .into(),
            ..Default::default()
        }];
        roll_up_proteins(&mut proteins, &map, &SpectrumLabels::new());

        let p = &proteins[0];
        assert_eq!(p.total_labels.channels[0].intensity, 60.0);
        assert_eq!(p.unique_labels.channels[0].intensity, 30.0);
        assert_eq!(p.urazor_labels.channels[0].intensity, 30.0);
        assert_eq!(p.total_labels.channels[5].intensity, 3.0);
        assert_eq!(p.unique_labels.channels[5].intensity, 2.0);
        assert_eq!(p.urazor_labels.channels[5].intensity, 1.0);
    }

    #[test]
    fn test_razor_without_unique() {
        let mut map = SpectrumLabels::new();
        map.insert("s1".into(), labels(5.0));
        let mut phospho = SpectrumLabels::new();
        phospho.insert("s1".into(), labels(5.0));

        let mut proteins = vec![ProteinEvidence {
            total_peptide_ions: [("A#2".to_string(), entry("A#2", &["s1", "gone"], false, true))].into(),
            ..Default::default()
        }];
        roll_up_proteins(&mut proteins, &map, &phospho);
        let p = &proteins[0];
        assert!(p.unique_labels.channels.is_empty());
        assert_eq!(p.urazor_labels.channels[0].intensity, 5.0);
        assert_eq!(p.phospho_urazor_labels.channels[0].intensity, 5.0);
        assert!(p.phospho_unique_labels.channels.is_empty());
    }

    #[test]
    fn test_peptides_and_ions_order_independent() {
        let mut map = SpectrumLabels::new();
        map.insert("s1".into(), labels(1.5));
        map.insert("s2".into(), labels(2.25));
        map.insert("s3".into(), labels(4.0));

        let mut peptides = vec![PeptideEvidence {
            sequence: "PEPTIDE".into(),
            spectra: ["s3", "s1", "s2", "missing"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }];
        let mut ions = vec![IonEvidence {
            ion_form: "PEPTIDE#2".into(),
            spectra: ["s2", "s1"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }];
        roll_up_spectra(&mut peptides, &map, &SpectrumLabels::new());
        roll_up_spectra(&mut ions, &map, &SpectrumLabels::new());

        let mut reversed = LabelSet::default();
        for name in ["s3", "s2", "s1"] {
            reversed.accumulate(&map[name]);
        }
        assert_eq!(peptides[0].labels.intensities(), reversed.intensities());
        assert_eq!(peptides[0].labels.channels[0].intensity, 7.75);
        assert_eq!(ions[0].labels.channels[0].intensity, 3.75);
        assert_eq!(ions[0].labels.channels[5].intensity, 2.0);
    }
}

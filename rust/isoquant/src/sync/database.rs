use crate::models::{
    DatabaseRecord,
    ProteinAssignment,
};
use crate::traits::AssignedEvidence;
use std::collections::HashMap;

/// Where a peptide sits inside its protein.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeptideLocation {
    /// Zero based offset of the first residue.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    pub prev_aa: char,
    pub next_aa: char,
}

/// Finds `peptide` in `protein_sequence`, treating I and L as equal when the
/// exact sequence is not present.
///
/// At the protein boundaries the flanking residue is the first (N-term) or
/// last (C-term) residue of the protein itself.
///
/// ```
/// use isoquant::sync::locate_peptide;
///
/// let loc = locate_peptide("PEPTLDE", "MKPEPTIDEKR").unwrap();
/// assert_eq!((loc.start, loc.end), (2, 9));
/// assert_eq!((loc.prev_aa, loc.next_aa), ('K', 'K'));
/// ```
pub fn locate_peptide(peptide: &str, protein_sequence: &str) -> Option<PeptideLocation> {
    if peptide.is_empty() || protein_sequence.is_empty() {
        return None;
    }
    let start = protein_sequence.find(peptide).or_else(|| {
        let leucine = |s: &str| s.replace('I', "L");
        leucine(protein_sequence).find(&leucine(peptide))
    })?;
    let end = start + peptide.len();

    let residues = protein_sequence.as_bytes();
    let first = *residues.first()?;
    let last = *residues.last()?;
    let prev_aa = match start {
        0 => first,
        n => residues[n - 1],
    };
    let next_aa = residues.get(end).copied().unwrap_or(last);

    Some(PeptideLocation {
        start,
        end,
        prev_aa: prev_aa as char,
        next_aa: next_aa as char,
    })
}

fn annotate(
    assignment: &mut ProteinAssignment,
    sequence: &str,
    lookup: &HashMap<&str, &DatabaseRecord>,
    decoy_tag: &str,
) -> bool {
    let key = if assignment.is_decoy {
        assignment.protein.replacen(decoy_tag, "", 1)
    } else {
        assignment.protein.clone()
    };
    let record = lookup.get(key.as_str());

    assignment.protein_id = record.map(|r| r.id.clone()).unwrap_or_default();
    assignment.entry_name = record.map(|r| r.entry_name.clone()).unwrap_or_default();
    assignment.gene_name = record.map(|r| r.gene_names.clone()).unwrap_or_default();
    assignment.protein_description = record.map(|r| r.description.clone()).unwrap_or_default();

    for mapped in assignment.mapped_proteins.iter() {
        if mapped.contains(decoy_tag) {
            continue;
        }
        if let Some(gene) = lookup.get(mapped.as_str()).map(|r| r.gene_names.as_str()) {
            if !gene.is_empty() {
                assignment.mapped_genes.insert(gene.to_string());
            }
        }
    }

    let location = record.and_then(|r| locate_peptide(sequence, &r.sequence));
    assignment.protein_start = location.map(|l| l.start);
    assignment.protein_end = location.map(|l| l.end);
    assignment.prev_aa = location.map(|l| l.prev_aa);
    assignment.next_aa = location.map(|l| l.next_aa);
    record.is_some()
}

/// Fills protein and gene attributes of each record from target database entries.
///
/// Decoy records are resolved through their target counterpart (the first
/// occurrence of the decoy tag is stripped). Lookups that miss leave the
/// attributes empty. Returns how many records were found in the database.
pub fn update_layers_with_database<T: AssignedEvidence>(
    records: &mut [T],
    lookup: &HashMap<&str, &DatabaseRecord>,
    decoy_tag: &str,
) -> usize {
    let mut found = 0;
    for record in records.iter_mut() {
        let sequence = record.sequence().to_string();
        if annotate(record.assignment_mut(), &sequence, lookup, decoy_tag) {
            found += 1;
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        PeptideEvidence,
        PsmEvidence,
        SequenceDatabase,
    };

    fn database() -> SequenceDatabase {
        SequenceDatabase::new(vec![
            DatabaseRecord {
                part_header: "sp|P1|ALBU_HUMAN".into(),
                id: "P1".into(),
                entry_name: "ALBU_HUMAN".into(),
                gene_names: "ALB".into(),
                description: "Albumin".into(),
                sequence: "MKWVTFISLLFLFSSAYSR".into(),
                is_decoy: false,
            },
            DatabaseRecord {
                part_header: "sp|P2|TRFE_HUMAN".into(),
                id: "P2".into(),
                gene_names: "TF".into(),
                sequence: "MRLAVGALLVCAVLGLCLA".into(),
                ..Default::default()
            },
            DatabaseRecord {
                part_header: "sp|P3|NOGENE".into(),
                id: "P3".into(),
                sequence: "MAAA".into(),
                ..Default::default()
            },
            DatabaseRecord {
                part_header: "rev_sp|P1|ALBU_HUMAN".into(),
                id: "decoy".into(),
                sequence: "RSYASSFLFLLSIFTVWKM".into(),
                is_decoy: true,
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_locate_peptide() {
        let seq = "MKWVTFISLLFLFSSAYSR";
        let loc = locate_peptide("WVTF", seq).unwrap();
        assert_eq!((loc.start, loc.end, loc.prev_aa, loc.next_aa), (2, 6, 'K', 'I'));

        // protein N-term: flank is the first residue
        let loc = locate_peptide("MKW", seq).unwrap();
        assert_eq!((loc.start, loc.prev_aa), (0, 'M'));

        // protein C-term: flank is the last residue
        let loc = locate_peptide("SAYSR", seq).unwrap();
        assert_eq!((loc.end, loc.next_aa), (19, 'R'));

        // I/L interchangeable
        let loc = locate_peptide("FLSLL", seq).unwrap();
        assert_eq!(loc.start, 5);

        assert!(locate_peptide("GGGG", seq).is_none());
        assert!(locate_peptide("", seq).is_none());
    }

    #[test]
    fn test_annotate_targets_and_decoys() {
        let db = database();
        let lookup = db.target_lookup();
        let mut psms = vec![
            PsmEvidence {
                peptide: "WVTFISLLFLFSSAYSR".into(),
                assignment: ProteinAssignment {
                    protein: "sp|P1|ALBU_HUMAN".into(),
                    mapped_proteins: [
                        "sp|P2|TRFE_HUMAN".to_string(),
                        "sp|P3|NOGENE".to_string(),
                        "rev_sp|P1|ALBU_HUMAN".to_string(),
                    ]
                    .into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            PsmEvidence {
                peptide: "SAYSR".into(),
                assignment: ProteinAssignment {
                    protein: "rev_sp|P1|ALBU_HUMAN".into(),
                    is_decoy: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];
        assert_eq!(update_layers_with_database(&mut psms, &lookup, "rev_"), 2);

        let a = &psms[0].assignment;
        assert_eq!(a.protein_id, "P1");
        assert_eq!(a.entry_name, "ALBU_HUMAN");
        assert_eq!(a.gene_name, "ALB");
        assert_eq!(a.protein_description, "Albumin");
        assert_eq!(a.mapped_genes.iter().collect::<Vec<_>>(), vec!["TF"]);
        assert_eq!(a.protein_start, Some(2));
        assert_eq!(a.prev_aa, Some('K'));
        assert_eq!(a.next_aa, Some('R'));

        // decoys resolve through the target record
        let d = &psms[1].assignment;
        assert_eq!(d.protein_id, "P1");
        assert_eq!(d.protein_start, Some(14));
    }

    #[test]
    fn test_misses_leave_fields_empty() {
        let db = database();
        let lookup = db.target_lookup();
        let mut peptides = vec![PeptideEvidence {
            sequence: "PEPTIDE".into(),
            assignment: ProteinAssignment {
                protein: "sp|Q9|MISSING".into(),
                protein_id: "stale".into(),
                prev_aa: Some('K'),
                ..Default::default()
            },
            ..Default::default()
        }];
        assert_eq!(update_layers_with_database(&mut peptides, &lookup, "rev_"), 0);
        let a = &peptides[0].assignment;
        assert!(a.protein_id.is_empty());
        assert!(a.gene_name.is_empty());
        assert_eq!(a.prev_aa, None);
        assert_eq!(a.protein_start, None);
    }
}

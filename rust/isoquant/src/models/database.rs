use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRecord {
    pub part_header: String,
    pub id: String,
    #[serde(default)]
    pub entry_name: String,
    #[serde(default)]
    pub gene_names: String,
    #[serde(default)]
    pub description: String,
    pub sequence: String,
    #[serde(default)]
    pub is_decoy: bool,
}

/// Read-only protein sequence database, as loaded by the FASTA stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceDatabase {
    pub records: Vec<DatabaseRecord>,
}

impl SequenceDatabase {
    pub fn new(records: Vec<DatabaseRecord>) -> Self {
        Self { records }
    }

    /// Target records keyed by part header. Decoy records are skipped since
    /// decoy evidence is looked up through its target counterpart.
    pub fn target_lookup(&self) -> HashMap<&str, &DatabaseRecord> {
        self.records
            .iter()
            .filter(|r| !r.is_decoy)
            .map(|r| (r.part_header.as_str(), r))
            .collect()
    }
}

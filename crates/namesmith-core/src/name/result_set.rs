//! Result list and merge rules.

use std::collections::HashSet;

use super::model::NameRecord;

/// How a freshly generated batch is folded into the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Fresh "generate": the incoming batch becomes the whole list.
    Replace,
    /// "Load more": the incoming batch goes after the existing records.
    Append,
}

/// Merges a generated batch into the existing records.
///
/// `Append` keeps the relative order of both inputs and does not drop
/// duplicate transliterations. No re-ranking happens in either mode.
pub fn merge_results(
    existing: Vec<NameRecord>,
    incoming: Vec<NameRecord>,
    mode: MergeMode,
) -> Vec<NameRecord> {
    match mode {
        MergeMode::Replace => incoming,
        MergeMode::Append => {
            let mut merged = existing;
            merged.extend(incoming);
            merged
        }
    }
}

/// Ordered records produced by the most recent generation call(s).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<NameRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<NameRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at a zero-based position.
    pub fn get(&self, index: usize) -> Option<&NameRecord> {
        self.records.get(index)
    }

    /// Folds a batch into the list in place.
    pub fn merge(&mut self, incoming: Vec<NameRecord>, mode: MergeMode) {
        let existing = std::mem::take(&mut self.records);
        self.records = merge_results(existing, incoming, mode);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Drops every record whose transliteration already appeared earlier.
    ///
    /// Returns the number of records removed.
    pub fn dedup_by_identity(&mut self) -> usize {
        let before = self.records.len();
        let mut seen = HashSet::new();
        self.records
            .retain(|record| seen.insert(record.transliteration.clone()));
        before - self.records.len()
    }
}

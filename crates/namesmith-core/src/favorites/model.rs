//! Favorites domain model.

use serde::{Deserialize, Serialize};

use crate::name::NameRecord;

/// Result of toggling a record's favorite state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Ordered list of starred names.
///
/// Membership is decided by transliteration alone. Serializes as a plain JSON
/// array of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    records: Vec<NameRecord>,
}

impl FavoritesSet {
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

    pub fn contains(&self, transliteration: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.transliteration == transliteration)
    }

    /// Removes a favorite matching `record`'s transliteration, or appends it.
    pub fn toggle(&mut self, record: NameRecord) -> FavoriteToggle {
        if self.remove(&record.transliteration) {
            FavoriteToggle::Removed
        } else {
            self.records.push(record);
            FavoriteToggle::Added
        }
    }

    /// Removes every favorite with this transliteration.
    ///
    /// Returns true if anything was removed.
    pub fn remove(&mut self, transliteration: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.transliteration != transliteration);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Gender;

    fn ahmad() -> NameRecord {
        NameRecord::new("أحمد", "Ahmad", "Highly praised", "Arabic", Gender::Boy)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = FavoritesSet::new();

        assert_eq!(favorites.toggle(ahmad()), FavoriteToggle::Added);
        assert!(favorites.contains("Ahmad"));

        assert_eq!(favorites.toggle(ahmad()), FavoriteToggle::Removed);
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let layla = NameRecord::new("ليلى", "Layla", "Night", "Arabic", Gender::Girl);
        let mut favorites = FavoritesSet::from_records(vec![layla.clone(), ahmad()]);
        let before = favorites.clone();

        let zaid = NameRecord::new("زيد", "Zaid", "Growth", "Arabic", Gender::Boy);
        favorites.toggle(zaid.clone());
        favorites.toggle(zaid);

        assert_eq!(favorites, before);
    }

    #[test]
    fn test_toggle_matches_on_transliteration_only() {
        let mut favorites = FavoritesSet::from_records(vec![ahmad()]);
        let variant = NameRecord::new("احمد", "Ahmad", "Other", "Persian", Gender::Unisex)
            .with_significance("variant spelling");

        assert_eq!(favorites.toggle(variant), FavoriteToggle::Removed);
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let favorites = FavoritesSet::from_records(vec![ahmad()]);
        let json = serde_json::to_value(&favorites).unwrap();
        assert!(json.is_array());

        let back: FavoritesSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, favorites);
    }
}

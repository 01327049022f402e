//! Name record domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Gender attached to a single generated name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Boy,
    Girl,
    Unisex,
}

impl Gender {
    /// Every value accepted in the generation response schema, in schema order.
    pub const ALL: [Gender; 3] = [Gender::Boy, Gender::Girl, Gender::Unisex];
}

/// One generated name.
///
/// `transliteration` is the identity key used for favoriting, dedup and list
/// keys. Nothing enforces its uniqueness inside a result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Name in its original script (e.g. Arabic letters).
    pub script: String,
    /// Latin-script rendering; the identity key.
    pub transliteration: String,
    pub meaning: String,
    /// Linguistic family or region the name comes from.
    pub origin: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance: Option<String>,
}

impl NameRecord {
    /// Creates a record without significance.
    pub fn new(
        script: impl Into<String>,
        transliteration: impl Into<String>,
        meaning: impl Into<String>,
        origin: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            script: script.into(),
            transliteration: transliteration.into(),
            meaning: meaning.into(),
            origin: origin.into(),
            gender,
            significance: None,
        }
    }

    /// Attaches a significance note.
    pub fn with_significance(mut self, significance: impl Into<String>) -> Self {
        self.significance = Some(significance.into());
        self
    }

    /// Returns true when both records share the identity key.
    pub fn same_identity(&self, other: &NameRecord) -> bool {
        self.transliteration == other.transliteration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_significance() {
        let json = r#"{
            "script": "سارة",
            "transliteration": "Sara",
            "meaning": "Princess",
            "origin": "Hebrew",
            "gender": "Girl"
        }"#;

        let record: NameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.transliteration, "Sara");
        assert_eq!(record.gender, Gender::Girl);
        assert!(record.significance.is_none());
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let json = r#"{
            "script": "x",
            "transliteration": "X",
            "meaning": "m",
            "origin": "o",
            "gender": "Other"
        }"#;

        assert!(serde_json::from_str::<NameRecord>(json).is_err());
    }

    #[test]
    fn test_same_identity_ignores_other_fields() {
        let a = NameRecord::new("أحمد", "Ahmad", "Praised", "Arabic", Gender::Boy);
        let b = NameRecord::new("احمد", "Ahmad", "Most praised", "Persian", Gender::Unisex);
        assert!(a.same_identity(&b));
    }

    #[test]
    fn test_gender_parses_case_insensitively() {
        assert_eq!("unisex".parse::<Gender>().unwrap(), Gender::Unisex);
        assert_eq!(Gender::Boy.to_string(), "Boy");
    }
}

//! Preference domain models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{NamesmithError, Result};
use crate::name::Gender;

/// Gender restriction applied to a generation request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum GenderFilter {
    Boy,
    Girl,
    /// No restriction; the gender clause is left out of the instruction.
    #[default]
    Both,
}

impl GenderFilter {
    /// The single gender requested, or `None` for `Both`.
    pub fn as_gender(self) -> Option<Gender> {
        match self {
            GenderFilter::Boy => Some(Gender::Boy),
            GenderFilter::Girl => Some(Gender::Girl),
            GenderFilter::Both => None,
        }
    }
}

/// Number of names requested per generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BatchSize(u32);

impl BatchSize {
    /// Batch sizes offered to the user.
    pub const ALLOWED: [u32; 4] = [5, 10, 15, 20];

    pub fn new(value: u32) -> Result<Self> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(NamesmithError::validation(format!(
                "batch size must be one of {:?}, got {}",
                Self::ALLOWED,
                value
            )))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u32> for BatchSize {
    type Error = NamesmithError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BatchSize> for u32 {
    fn from(size: BatchSize) -> Self {
        size.0
    }
}

/// Current request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceState {
    gender_filter: GenderFilter,
    starting_letter: Option<char>,
    theme_text: String,
    batch_size: BatchSize,
}

impl PreferenceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gender_filter(&self) -> GenderFilter {
        self.gender_filter
    }

    pub fn starting_letter(&self) -> Option<char> {
        self.starting_letter
    }

    pub fn theme_text(&self) -> &str {
        &self.theme_text
    }

    /// Theme text with surrounding whitespace removed, or `None` when blank.
    pub fn theme(&self) -> Option<&str> {
        let trimmed = self.theme_text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }

    pub fn set_gender_filter(&mut self, filter: GenderFilter) {
        self.gender_filter = filter;
    }

    /// Stores the first character of `input`, uppercased.
    ///
    /// Any character is accepted; non-alphabetic input is forwarded verbatim.
    /// An empty string clears the letter.
    pub fn set_starting_letter(&mut self, input: &str) {
        self.starting_letter = input
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c));
    }

    pub fn set_theme_text(&mut self, theme: impl Into<String>) {
        self.theme_text = theme.into();
    }

    pub fn set_batch_size(&mut self, size: BatchSize) {
        self.batch_size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = PreferenceState::new();
        assert_eq!(prefs.gender_filter(), GenderFilter::Both);
        assert_eq!(prefs.starting_letter(), None);
        assert_eq!(prefs.theme(), None);
        assert_eq!(prefs.batch_size().get(), 10);
    }

    #[test]
    fn test_starting_letter_is_uppercased_and_truncated() {
        let mut prefs = PreferenceState::new();

        prefs.set_starting_letter("a");
        assert_eq!(prefs.starting_letter(), Some('A'));

        prefs.set_starting_letter("zaid");
        assert_eq!(prefs.starting_letter(), Some('Z'));

        prefs.set_starting_letter("7");
        assert_eq!(prefs.starting_letter(), Some('7'));

        prefs.set_starting_letter("");
        assert_eq!(prefs.starting_letter(), None);
    }

    #[test]
    fn test_blank_theme_counts_as_empty() {
        let mut prefs = PreferenceState::new();
        prefs.set_theme_text("   ");
        assert_eq!(prefs.theme(), None);

        prefs.set_theme_text("  light  ");
        assert_eq!(prefs.theme(), Some("light"));
    }

    #[test]
    fn test_batch_size_rejects_unlisted_values() {
        assert!(BatchSize::new(15).is_ok());
        let err = BatchSize::new(7).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_gender_filter_parsing() {
        assert_eq!("both".parse::<GenderFilter>().unwrap(), GenderFilter::Both);
        assert_eq!("GIRL".parse::<GenderFilter>().unwrap(), GenderFilter::Girl);
        assert!("other".parse::<GenderFilter>().is_err());
        assert_eq!(GenderFilter::Boy.as_gender(), Some(Gender::Boy));
        assert_eq!(GenderFilter::Both.as_gender(), None);
    }
}

//! CSV export and copy-to-clipboard text.

use std::path::{Path, PathBuf};

use namesmith_core::NamesmithError;
use namesmith_core::error::Result;
use namesmith_core::name::NameRecord;

/// Header row of exported CSV files.
pub const CSV_HEADER: [&str; 6] = [
    "Name",
    "Transliteration",
    "Meaning",
    "Origin",
    "Gender",
    "Significance",
];

/// Renders records as CSV.
///
/// Every value is quoted with embedded quotes doubled. A missing significance
/// is an empty quoted field.
pub fn to_csv(records: &[NameRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for record in records {
        let gender = record.gender.to_string();
        let fields = [
            record.script.as_str(),
            record.transliteration.as_str(),
            record.meaning.as_str(),
            record.origin.as_str(),
            gender.as_str(),
            record.significance.as_deref().unwrap_or(""),
        ];
        lines.push(
            fields
                .iter()
                .map(|value| quote(value))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// `<app>_names_<count>.csv`
pub fn export_filename(app_name: &str, count: usize) -> String {
    format!("{}_names_{}.csv", app_name, count)
}

/// Writes `records` as CSV into `dir` and returns the file path.
pub async fn export_to_csv(records: &[NameRecord], dir: &Path, app_name: &str) -> Result<PathBuf> {
    let path = dir.join(export_filename(app_name, records.len()));

    tokio::fs::write(&path, to_csv(records))
        .await
        .map_err(|e| NamesmithError::io(format!("Failed to write {:?}: {}", path, e)))?;

    tracing::info!("[Export] Wrote {} names to {:?}", records.len(), path);
    Ok(path)
}

/// Plain-text card used by the copy action.
pub fn copy_text(record: &NameRecord) -> String {
    let mut text = format!(
        "{} ({})\nMeaning: {}\nOrigin: {}\nGender: {}",
        record.script, record.transliteration, record.meaning, record.origin, record.gender
    );
    if let Some(significance) = record.significance.as_deref().filter(|s| !s.is_empty()) {
        text.push_str("\nSignificance: ");
        text.push_str(significance);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use namesmith_core::name::Gender;
    use tempfile::TempDir;

    fn ahmad() -> NameRecord {
        NameRecord::new(
            "أحمد",
            "Ahmad",
            "Highly \"praised\"",
            "Arabic",
            Gender::Boy,
        )
        .with_significance("")
    }

    #[test]
    fn test_csv_quotes_and_escapes() {
        let csv = to_csv(&[ahmad()]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Name,Transliteration,Meaning,Origin,Gender,Significance"
        );
        assert_eq!(
            lines[1],
            r#""أحمد","Ahmad","Highly ""praised""","Arabic","Boy","""#
        );
    }

    #[test]
    fn test_csv_missing_significance_is_empty_field() {
        let record = NameRecord::new("ليلى", "Layla", "Night", "Arabic", Gender::Girl);
        let csv = to_csv(&[record]);
        assert!(csv.ends_with(r#""Girl","""#));
    }

    #[test]
    fn test_csv_of_nothing_is_header_only() {
        assert_eq!(to_csv(&[]), CSV_HEADER.join(","));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("namesmith", 12), "namesmith_names_12.csv");
    }

    #[tokio::test]
    async fn test_export_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let records = vec![ahmad(), ahmad()];

        let path = export_to_csv(&records, temp_dir.path(), "namesmith")
            .await
            .unwrap();

        assert_eq!(path, temp_dir.path().join("namesmith_names_2.csv"));
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn test_copy_text() {
        let record = NameRecord::new("نور", "Noor", "Light", "Arabic", Gender::Unisex)
            .with_significance("Appears in Surah An-Nur");
        assert_eq!(
            copy_text(&record),
            "نور (Noor)\nMeaning: Light\nOrigin: Arabic\nGender: Unisex\nSignificance: Appears in Surah An-Nur"
        );
        assert!(!copy_text(&ahmad()).contains("Significance"));
    }
}

//! Terminal rendering of names and outcomes.

use anyhow::Result;
use colored::Colorize;
use namesmith_application::{GenerationOutcome, LinkOpener, ShareOutcome};
use namesmith_core::generation::GenerationErrorKind;
use namesmith_core::name::NameRecord;
use url::Url;

/// Prints a numbered name card. `index` is zero-based.
pub fn print_record(index: usize, record: &NameRecord, favorite: bool) {
    let star = if favorite { "★".bright_yellow() } else { "☆".bright_black() };
    println!(
        "{} {} {}  {}",
        format!("{:>3}.", index + 1).bright_black(),
        star,
        record.script.bright_white().bold(),
        record.transliteration.bright_cyan()
    );
    println!("      {}", record.meaning);
    println!(
        "      {}",
        format!("{} · {}", record.origin, record.gender).bright_black()
    );
    if let Some(significance) = record.significance.as_deref().filter(|s| !s.is_empty()) {
        println!("      {}", significance.italic());
    }
}

pub fn print_records(records: &[NameRecord], favorites: &[NameRecord]) {
    if records.is_empty() {
        println!("{}", "No names yet.".bright_black());
        return;
    }
    for (index, record) in records.iter().enumerate() {
        let favorite = favorites.iter().any(|f| f.same_identity(record));
        print_record(index, record, favorite);
    }
}

/// One-line notice for a finished generation call.
pub fn outcome_line(outcome: &GenerationOutcome) -> String {
    match outcome {
        GenerationOutcome::Applied { received, total } => {
            format!("Received {} names ({} shown).", received, total)
                .green()
                .to_string()
        }
        GenerationOutcome::Failed(GenerationErrorKind::MissingCredential) => {
            "No API key configured. Set GEMINI_API_KEY or add it to secret.json."
                .yellow()
                .to_string()
        }
        GenerationOutcome::Failed(_) => "No new names arrived. Try again."
            .yellow()
            .to_string(),
        GenerationOutcome::Busy => "Still waiting for the previous request."
            .yellow()
            .to_string(),
    }
}

pub fn share_line(outcome: &ShareOutcome) -> String {
    match outcome {
        ShareOutcome::Native => "Shared.".green().to_string(),
        ShareOutcome::FallbackLink(_) => "Share link ready.".green().to_string(),
        ShareOutcome::Failed => "Sharing is unavailable right now.".yellow().to_string(),
    }
}

/// Terminal stand-in for opening a link: prints it for the user to follow.
pub struct PrintLinkOpener;

impl LinkOpener for PrintLinkOpener {
    fn open(&self, url: &Url) -> Result<()> {
        println!("{}", url.as_str().underline());
        Ok(())
    }
}

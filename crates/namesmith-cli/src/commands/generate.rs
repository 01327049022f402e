//! One-shot generation.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use namesmith_application::export::export_to_csv;
use namesmith_application::{AppBootstrap, GenerationOutcome};
use namesmith_core::preference::GenderFilter;

use crate::render;

#[derive(Args)]
pub struct GenerateArgs {
    /// Boy, Girl or Both
    #[arg(short, long, default_value = "Both")]
    gender: GenderFilter,

    /// Starting letter (first character is used)
    #[arg(short, long)]
    letter: Option<String>,

    /// Theme or meaning to aim for
    #[arg(short, long)]
    theme: Option<String>,

    /// Names per batch (5, 10, 15 or 20)
    #[arg(short, long)]
    count: Option<u32>,

    /// Extra "load more" batches appended after the first
    #[arg(long, default_value_t = 0)]
    more: u32,

    /// Also write the result list as CSV into this directory
    #[arg(long)]
    export: Option<PathBuf>,
}

pub async fn run(bootstrap: &AppBootstrap, args: GenerateArgs) -> Result<()> {
    let orchestrator = &bootstrap.orchestrator;

    orchestrator.set_gender_filter(args.gender);
    if let Some(letter) = &args.letter {
        orchestrator.set_starting_letter(letter);
    }
    if let Some(theme) = args.theme {
        orchestrator.set_theme(theme);
    }
    if let Some(count) = args.count {
        orchestrator.set_batch_size(count)?;
    }

    let outcome = orchestrator.generate().await;
    eprintln!("{}", render::outcome_line(&outcome));
    if let GenerationOutcome::Failed(kind) = outcome {
        bail!("generation failed ({kind})");
    }

    for _ in 0..args.more {
        let outcome = orchestrator.load_more().await;
        eprintln!("{}", render::outcome_line(&outcome));
    }

    let results = orchestrator.results();
    render::print_records(&results, &orchestrator.favorites().await);

    if let Some(dir) = args.export {
        let path = export_to_csv(&results, &dir, &bootstrap.config.app_name).await?;
        eprintln!("{}", format!("Exported to {}", path.display()).green());
    }

    Ok(())
}

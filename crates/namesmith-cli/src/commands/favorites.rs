//! Favorites subcommands.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use namesmith_application::AppBootstrap;
use namesmith_application::export::export_to_csv;

use crate::render;

pub async fn list(bootstrap: &AppBootstrap) {
    let favorites = bootstrap.orchestrator.favorites().await;
    if favorites.is_empty() {
        println!("{}", "No favorites saved.".bright_black());
        return;
    }
    for (index, record) in favorites.iter().enumerate() {
        render::print_record(index, record, true);
    }
}

pub async fn export(bootstrap: &AppBootstrap, dir: &Path) -> Result<()> {
    let favorites = bootstrap.orchestrator.favorites().await;
    let path = export_to_csv(&favorites, dir, &bootstrap.config.app_name).await?;
    println!("{}", format!("Exported {} favorites to {}", favorites.len(), path.display()).green());
    Ok(())
}

pub async fn clear(bootstrap: &AppBootstrap) {
    bootstrap.orchestrator.clear_favorites().await;
    println!("{}", "Favorites cleared.".green());
}

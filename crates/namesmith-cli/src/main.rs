use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use namesmith_application::{AppBootstrap, BootstrapOptions};

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "namesmith")]
#[command(about = "Namesmith - discover meaningful names with generative AI", long_about = None)]
struct Cli {
    /// Directory holding config.toml, secret.json and favorites.json
    #[arg(long, global = true, env = "NAMESMITH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Keep favorites in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Repl,
    /// Generate one batch of names and print it
    Generate(commands::generate::GenerateArgs),
    /// Inspect or export saved favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Print all favorites
    List,
    /// Write favorites to <app>_names_<count>.csv
    Export {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Remove every favorite
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let bootstrap = AppBootstrap::initialize(&BootstrapOptions {
        config_dir: cli.config_dir,
        ephemeral: cli.ephemeral,
    })
    .await?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(bootstrap).await?,
        Commands::Generate(args) => commands::generate::run(&bootstrap, args).await?,
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&bootstrap).await,
            FavoritesAction::Export { dir } => commands::favorites::export(&bootstrap, &dir).await?,
            FavoritesAction::Clear => commands::favorites::clear(&bootstrap).await,
        },
    }

    Ok(())
}

//! Interactive session.
//!
//! Generation requests run as background tasks so the prompt stays usable;
//! their outcomes are printed by a separate handler as they complete.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;

use namesmith_application::export::{copy_text, export_to_csv};
use namesmith_application::{AppBootstrap, GenerationOutcome, NameRequestOrchestrator, ShareService};
use namesmith_core::favorites::FavoriteToggle;
use namesmith_core::preference::GenderFilter;

use crate::render::{self, PrintLinkOpener};

const COMMANDS: &[&str] = &[
    "/gender", "/letter", "/theme", "/count", "/prefs", "/generate", "/more", "/list", "/dedup",
    "/clear", "/fav", "/favs", "/unfav", "/copy", "/share", "/share-app", "/export", "/help",
];

/// Values offered after a command that takes a fixed set of arguments.
fn argument_values(command: &str) -> &'static [&'static str] {
    match command {
        "/gender" => &["boy", "girl", "both"],
        "/count" => &["5", "10", "15", "20"],
        "/export" => &["favorites"],
        _ => &[],
    }
}

/// Completes slash commands, then their fixed arguments.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Returns the byte offset the candidates replace from, and the
    /// candidates for the word being typed.
    fn suggestions(&self, line: &str) -> (usize, Vec<String>) {
        if !line.starts_with('/') {
            return (0, Vec::new());
        }

        match line.split_once(' ') {
            None => (
                0,
                self.commands
                    .iter()
                    .filter(|cmd| cmd.starts_with(line))
                    .cloned()
                    .collect(),
            ),
            Some((command, partial)) if !partial.contains(' ') => {
                let partial_lower = partial.to_lowercase();
                let candidates = argument_values(command)
                    .iter()
                    .filter(|value| value.starts_with(&partial_lower))
                    .map(|value| value.to_string())
                    .collect();
                (command.len() + 1, candidates)
            }
            Some(_) => (0, Vec::new()),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.suggestions(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }
        match line.split_once(' ') {
            Some((command, rest)) => Owned(format!("{} {}", command.bright_cyan(), rest)),
            None => Owned(line.bright_cyan().to_string()),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, candidates) = self.suggestions(line);
        let typed = line.len() - start;

        candidates.iter().find_map(|candidate| {
            candidate
                .get(typed..)
                .filter(|rest| !rest.is_empty())
                .map(str::to_string)
        })
    }
}

impl Validator for CliHelper {}

/// A parsed REPL line. Positions are one-based as typed by the user.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Gender(GenderFilter),
    Letter(String),
    Theme(String),
    Count(u32),
    Prefs,
    Generate,
    More,
    List,
    Dedup,
    Clear,
    Favorite(usize),
    Favorites,
    Unfavorite(String),
    Copy(usize),
    Share(usize),
    ShareApp,
    Export { favorites: bool, dir: PathBuf },
    Help,
    Quit,
}

fn parse_position(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("expected a name number, got '{}'", arg)),
    }
}

fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "quit" | "exit" | "/quit" => Ok(ReplCommand::Quit),
        "/gender" => arg
            .parse::<GenderFilter>()
            .map(ReplCommand::Gender)
            .map_err(|_| "usage: /gender boy|girl|both".to_string()),
        "/letter" => Ok(ReplCommand::Letter(arg.to_string())),
        "/theme" => Ok(ReplCommand::Theme(arg.to_string())),
        "/count" => arg
            .parse::<u32>()
            .map(ReplCommand::Count)
            .map_err(|_| "usage: /count 5|10|15|20".to_string()),
        "/prefs" => Ok(ReplCommand::Prefs),
        "/generate" | "/g" => Ok(ReplCommand::Generate),
        "/more" => Ok(ReplCommand::More),
        "/list" => Ok(ReplCommand::List),
        "/dedup" => Ok(ReplCommand::Dedup),
        "/clear" => Ok(ReplCommand::Clear),
        "/fav" => parse_position(arg).map(ReplCommand::Favorite),
        "/favs" => Ok(ReplCommand::Favorites),
        "/unfav" if !arg.is_empty() => Ok(ReplCommand::Unfavorite(arg.to_string())),
        "/unfav" => Err("usage: /unfav <transliteration>".to_string()),
        "/copy" => parse_position(arg).map(ReplCommand::Copy),
        "/share" => parse_position(arg).map(ReplCommand::Share),
        "/share-app" => Ok(ReplCommand::ShareApp),
        "/export" => {
            let (first, rest) = match arg.split_once(char::is_whitespace) {
                Some((first, rest)) => (first, rest.trim()),
                None => (arg, ""),
            };
            let (favorites, rest) = if first == "favorites" {
                (true, rest)
            } else {
                (false, arg)
            };
            let dir = if rest.is_empty() { "." } else { rest };
            Ok(ReplCommand::Export {
                favorites,
                dir: PathBuf::from(dir),
            })
        }
        "/help" | "help" => Ok(ReplCommand::Help),
        other => Err(format!("unknown command '{}', try /help", other)),
    }
}

fn print_help() {
    let lines = [
        ("/gender boy|girl|both", "restrict gender"),
        ("/letter [X]", "starting letter (empty clears)"),
        ("/theme [text]", "theme or meaning (empty clears)"),
        ("/count 5|10|15|20", "names per batch"),
        ("/prefs", "show current preferences"),
        ("/generate, /g", "new batch, replacing the list"),
        ("/more", "append another batch"),
        ("/list", "show the current list"),
        ("/dedup", "drop repeated names from the list"),
        ("/clear", "empty the list"),
        ("/fav N", "star or unstar name N"),
        ("/favs", "show favorites"),
        ("/unfav NAME", "unstar by transliteration"),
        ("/copy N", "print name N as text"),
        ("/share N, /share-app", "share a name or the app"),
        ("/export [favorites] [DIR]", "write CSV"),
        ("quit", "leave"),
    ];
    for (command, description) in lines {
        println!("  {:<28}{}", command.bright_cyan(), description.bright_black());
    }
}

fn print_preferences(orchestrator: &NameRequestOrchestrator) {
    let prefs = orchestrator.preferences();
    println!(
        "{}",
        format!(
            "gender: {} | letter: {} | theme: {} | count: {}",
            prefs.gender_filter(),
            prefs
                .starting_letter()
                .map(String::from)
                .unwrap_or_else(|| "-".to_string()),
            prefs.theme().unwrap_or("-"),
            prefs.batch_size().get()
        )
        .bright_black()
    );
}

async fn handle(
    command: ReplCommand,
    orchestrator: &NameRequestOrchestrator,
    share: &ShareService,
    app_name: &str,
    outcome_tx: &mpsc::Sender<GenerationOutcome>,
) -> Result<()> {
    match command {
        ReplCommand::Gender(filter) => {
            orchestrator.set_gender_filter(filter);
            print_preferences(orchestrator);
        }
        ReplCommand::Letter(letter) => {
            orchestrator.set_starting_letter(&letter);
            print_preferences(orchestrator);
        }
        ReplCommand::Theme(theme) => {
            orchestrator.set_theme(theme);
            print_preferences(orchestrator);
        }
        ReplCommand::Count(count) => match orchestrator.set_batch_size(count) {
            Ok(()) => print_preferences(orchestrator),
            Err(e) => println!("{}", e.to_string().yellow()),
        },
        ReplCommand::Prefs => print_preferences(orchestrator),
        ReplCommand::Generate | ReplCommand::More => {
            let append = matches!(command, ReplCommand::More);
            let orchestrator = orchestrator.clone();
            let tx = outcome_tx.clone();
            println!("{}", "Generating...".bright_black());
            tracing::debug!("[Repl] Spawning generation task (append: {})", append);
            tokio::spawn(async move {
                let outcome = if append {
                    orchestrator.load_more().await
                } else {
                    orchestrator.generate().await
                };
                let _ = tx.send(outcome).await;
            });
        }
        ReplCommand::List => {
            render::print_records(&orchestrator.results(), &orchestrator.favorites().await);
        }
        ReplCommand::Dedup => {
            let removed = orchestrator.dedup_results();
            println!("{}", format!("Removed {} repeated names.", removed).green());
        }
        ReplCommand::Clear => {
            orchestrator.clear_results();
            println!("{}", "List cleared.".green());
        }
        ReplCommand::Favorite(position) => match orchestrator.toggle_favorite_at(position - 1).await {
            Some((record, FavoriteToggle::Added)) => {
                println!("{}", format!("★ {}", record.transliteration).bright_yellow());
            }
            Some((record, FavoriteToggle::Removed)) => {
                println!("{}", format!("☆ {}", record.transliteration).bright_black());
            }
            None => println!("{}", format!("No name #{}", position).yellow()),
        },
        ReplCommand::Favorites => {
            let favorites = orchestrator.favorites().await;
            render::print_records(&favorites, &favorites);
        }
        ReplCommand::Unfavorite(transliteration) => {
            if orchestrator.remove_favorite(&transliteration).await {
                println!("{}", format!("☆ {}", transliteration).bright_black());
            } else {
                println!("{}", format!("'{}' is not a favorite", transliteration).yellow());
            }
        }
        ReplCommand::Copy(position) => match orchestrator.result(position - 1) {
            Some(record) => println!("{}", copy_text(&record)),
            None => println!("{}", format!("No name #{}", position).yellow()),
        },
        ReplCommand::Share(position) => match orchestrator.result(position - 1) {
            Some(record) => println!("{}", render::share_line(&share.share_record(&record).await)),
            None => println!("{}", format!("No name #{}", position).yellow()),
        },
        ReplCommand::ShareApp => {
            println!("{}", render::share_line(&share.share_app().await));
        }
        ReplCommand::Export { favorites, dir } => {
            let records = if favorites {
                orchestrator.favorites().await
            } else {
                orchestrator.results()
            };
            let path = export_to_csv(&records, &dir, app_name).await?;
            println!("{}", format!("Exported to {}", path.display()).green());
        }
        ReplCommand::Help => print_help(),
        ReplCommand::Quit => {}
    }
    Ok(())
}

pub async fn run(bootstrap: AppBootstrap) -> Result<()> {
    let orchestrator = bootstrap.orchestrator;
    let app_name = bootstrap.config.app_name;
    let share = ShareService::new(Arc::new(PrintLinkOpener), app_name.clone());

    // Outcomes of background generation tasks
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<GenerationOutcome>(16);
    let printer = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move {
            while let Some(outcome) = outcome_rx.recv().await {
                println!("{}", render::outcome_line(&outcome));
                if matches!(outcome, GenerationOutcome::Applied { .. }) {
                    render::print_records(&orchestrator.results(), &orchestrator.favorites().await);
                }
            }
        })
    };

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", format!("=== {} ===", app_name).bright_magenta().bold());
    if !bootstrap.credential_available {
        println!(
            "{}",
            "No API key found: set GEMINI_API_KEY to generate names.".yellow()
        );
    }
    println!("{}", "Type /help for commands, /generate to start, or 'quit' to exit.".bright_black());
    print_preferences(&orchestrator);
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match parse_command(trimmed) {
                    Ok(ReplCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => {
                        if let Err(e) =
                            handle(command, &orchestrator, &share, &app_name, &outcome_tx).await
                        {
                            eprintln!("{}", format!("Error: {:#}", e).red());
                        }
                    }
                    Err(message) => println!("{}", message.yellow()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Pending generation tasks hold sender clones; don't wait for them.
    drop(outcome_tx);
    printer.abort();
    tracing::debug!(
        "[Repl] Session ended with {} in-flight requests",
        orchestrator.in_flight()
    );

    Ok(())
}

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pokepistemic_cli::config::SessionConfig;
use pokepistemic_cli::logging::init_logging;
use pokepistemic_cli::repl::Repl;
use pokepistemic_cli::telemetry::summarise_telemetry;
use pokepistemic_core::AppInfo;
use pokepistemic_core::catalog::SetCatalog;

/// Track what is known about opposing Pokemon sets as a battle unfolds.
#[derive(Debug, Parser)]
#[command(
    name = "pokepistemic",
    author,
    version,
    about = "Epistemic set tracker for Pokemon battles"
)]
struct Cli {
    /// Path to the YAML configuration file (defaults to pokepistemic.yaml when present).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the JSON catalog of candidate sets.
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Override the session identifier (substitutes {session_id} templates).
    #[arg(long, value_name = "ID")]
    session_id: Option<String>,

    /// Read commands from a file instead of stdin.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Exit after validating the configuration and loading the catalog.
    #[arg(long)]
    validate_only: bool,

    /// Enable structured JSON logging regardless of config.
    #[arg(long)]
    log_structured: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SessionConfig::load(cli.config.as_deref())?;

    if let Some(session_id) = cli.session_id {
        config.session_id = session_id;
    }

    if let Some(catalog) = cli.catalog {
        config.catalog.path = Some(catalog);
    }

    if cli.log_structured {
        config.logging.enable_structured = true;
    }

    config.validate()?;

    let catalog = match config.catalog.path.as_ref() {
        Some(path) => SetCatalog::from_path(path)?,
        None => SetCatalog::fallback(),
    };

    println!(
        "{} {} ({})",
        AppInfo::name(),
        AppInfo::version(),
        AppInfo::codename()
    );
    println!(
        "Session '{}': {} species, {} candidate sets{}",
        config.session_id,
        catalog.len(),
        catalog.total_sets(),
        if config.catalog.path.is_none() {
            " (built-in fallback)"
        } else {
            ""
        }
    );

    if cli.validate_only {
        println!("Validation-only mode: session not started.");
        return Ok(());
    }

    let log_dir = config.resolved_log_dir();
    let logging_guard = init_logging(&config.logging, &log_dir)?;
    let telemetry_path = logging_guard
        .as_ref()
        .map(|guard| guard.telemetry_path.clone());

    let mut repl = Repl::new(catalog, config.display.clone());
    let mut stdout = io::stdout();
    match cli.script.as_ref() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script at {}", path.display()))?;
            repl.run(BufReader::new(file), &mut stdout, false)?;
        }
        None => {
            println!("Type 'help' for commands.");
            let prompt = io::stdin().is_terminal();
            repl.run(io::stdin().lock(), &mut stdout, prompt)?;
        }
    }

    // Flush pending log lines before reading them back.
    drop(logging_guard);

    if let Some(path) = telemetry_path {
        let summary = summarise_telemetry(&path)?;
        println!("{}", summary.line());
        println!("Telemetry log: {}", path.display());
    }

    Ok(())
}

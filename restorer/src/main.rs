//! Restores a document mangled by emoji and typographic placeholders.
//!
//! With no arguments, reads `tests/e2e/stage-gather-scrape.test.ts.broken` and
//! writes `tests/e2e/stage-gather-scrape.test.ts`. Paths can be changed via
//! `restorer.toml` or `--source`/`--dest`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use restorer::core::table::default_table;
use restorer::error::RestoreError;
use restorer::exit_codes;
use restorer::io::config::{DEFAULT_CONFIG_PATH, RestorerConfig, load_config, write_config};
use restorer::restore::{CONFIRMATION, restore};
use restorer::rules::{render_json, render_text};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "restorer",
    version,
    about = "Restore text whose characters were replaced by emoji and curly quotes",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    restore: RestoreArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Restore the source document into the destination (default).
    Restore(RestoreArgs),
    /// Print the substitution table in application order.
    Rules {
        /// Print as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Write a `restorer.toml` with the default paths.
    Init {
        /// Path of the config file to write.
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
struct RestoreArgs {
    /// Corrupted input document (overrides config).
    #[arg(long)]
    source: Option<PathBuf>,
    /// Output document, overwritten if present (overrides config).
    #[arg(long = "dest")]
    destination: Option<PathBuf>,
    /// Config file; missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() {
    restorer::logging::init();
    if let Err(err) = run() {
        if let Some(restore_err) = err.downcast_ref::<RestoreError>() {
            debug!(path = %restore_err.path().display(), "restore failed");
        }
        eprintln!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        None => cmd_restore(&cli.restore),
        Some(Command::Restore(args)) => cmd_restore(&args),
        Some(Command::Rules { json }) => cmd_rules(json),
        Some(Command::Init { config, force }) => cmd_init(&config, force),
    }
}

fn cmd_restore(args: &RestoreArgs) -> Result<()> {
    let cfg = resolve_config(args)?;
    debug!(
        source = %cfg.source.display(),
        destination = %cfg.destination.display(),
        "resolved paths"
    );
    restore(&cfg.source, &cfg.destination)?;
    println!("{CONFIRMATION}");
    Ok(())
}

fn cmd_rules(json: bool) -> Result<()> {
    let table = default_table();
    if json {
        print!("{}", render_json(table)?);
    } else {
        print!("{}", render_text(table));
    }
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        debug!(path = %path.display(), "config exists; leaving as is");
        return Ok(());
    }
    write_config(path, &RestorerConfig::default())
        .with_context(|| format!("write {}", path.display()))
}

fn resolve_config(args: &RestoreArgs) -> Result<RestorerConfig> {
    let cfg = load_config(&args.config)
        .context("load config")?
        .with_overrides(args.source.clone(), args.destination.clone());
    cfg.validate()?;
    Ok(cfg)
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RestoreError>() {
        Some(RestoreError::ResourceNotFound { .. }) => exit_codes::NOT_FOUND,
        Some(RestoreError::ResourceWrite { .. }) => exit_codes::WRITE_FAILED,
        None => exit_codes::INVALID,
    }
}

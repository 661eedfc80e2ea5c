use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand};
use anyhow::{Context, Result};

use cmake_meta_version::services::version_codec::VersionCodec;
use cmake_meta_version::services::version_file::{Outcome, VersionFile};
use cmake_meta_version::utils::bump::Bump;
use cmake_meta_version::utils::config::Config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Build file to operate on (overrides the configuration)
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current version
    Get,

    /// Write an explicit version
    Set {
        /// New version as MAJOR.MINOR.PATCH
        version: String,

        /// Report the change without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Increment one component and write the result
    Bump {
        #[arg(value_enum)]
        kind: Bump,

        /// Report the change without writing it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // stdout carries the version, so logs stay on stderr
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    let path = cli.file.unwrap_or_else(|| PathBuf::from(&config.file));
    let codec = VersionCodec::new(config.layout())?;

    log::debug!("Using build file {} with prefix {}", path.display(), config.prefix);

    match cli.command {
        Command::Get => {
            let file = open(&path, codec)?;
            println!("{}", file.current()?);
        }
        Command::Set { version, dry_run } => {
            let mut file = open(&path, codec)?.dry_run(dry_run);
            report(file.set(&version)?);
        }
        Command::Bump { kind, dry_run } => {
            let mut file = open(&path, codec)?.dry_run(dry_run);
            report(file.bump(kind)?);
        }
    }

    Ok(())
}

fn open(path: &Path, codec: VersionCodec) -> Result<VersionFile> {
    VersionFile::open(path, codec).with_context(|| format!("Failed to read {}", path.display()))
}

fn report(outcome: Outcome) {
    if outcome.changed {
        log::debug!("{} -> {}", outcome.previous, outcome.next);
    }
    println!("{}", outcome.next);
}

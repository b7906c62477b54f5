//! `profile-nexus`: terminal front end for the in-memory profile directory.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Args, Parser, Subcommand};
use nexus_directory::NexusConfig;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

mod list;
mod style;
mod ui;

#[derive(Parser)]
#[command(name = "profile-nexus")]
#[command(version)]
#[command(about = "Browse, search and edit a directory of profiles in the terminal")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive directory console
    Ui(SourceArgs),
    /// Print the profiles matching a search
    List {
        #[command(flatten)]
        source: SourceArgs,
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Validate the config and data file
    Check(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Profile data file (JSON array); overrides data.path from the config
    #[arg(long)]
    data: Option<PathBuf>,
    /// Config file (defaults to ./nexus.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn resolve(&self) -> anyhow::Result<NexusConfig> {
        let mut config = NexusConfig::discover(self.config.as_deref())?;
        if let Some(data) = &self.data {
            config.data_path.clone_from(data);
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", style::error("Error:"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Ui(source) => {
            let config = source.resolve()?;
            init_logging(cli.verbose, &config, true)?;
            ui::run_ui(&config)
        }
        Command::List { source, search } => {
            let config = source.resolve()?;
            init_logging(cli.verbose, &config, false)?;
            list::run_list(&config.data_path, &search)
        }
        Command::Check(source) => {
            let config = source.resolve()?;
            init_logging(cli.verbose, &config, false)?;
            list::run_check(&config.data_path)
        }
    }
}

/// The interactive console owns the terminal, so its logs only go to
/// `log.file` when one is configured.
fn init_logging(verbose: u8, config: &NexusConfig, interactive: bool) -> anyhow::Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.log_level.as_str()))?,
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let writer = match (&config.log_file, interactive) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        (None, true) => BoxMakeWriter::new(std::io::sink),
        (None, false) => BoxMakeWriter::new(std::io::stderr),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(config.log_file.is_none() && !interactive)
        .with_writer(writer)
        .init();
    Ok(())
}

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process;

mod commands;
mod config;
mod error;
mod logging;
mod report;

use config::{LogMode, TallyConfig};
use error::{CliError, CliResult};
use report::Reporter;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Tally - validate and aggregate line-oriented data files")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log file (overrides the configuration)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Append to the log file instead of overwriting it
    #[arg(long, global = true)]
    append_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total and average salary from a `name,salary` file
    Salary {
        /// Salary data file
        path: PathBuf,

        /// Write accepted records to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Validate an `id,name,age` cats inventory file
    Cats {
        /// Cats data file
        path: PathBuf,

        /// Write accepted records to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[ERROR] {}", err);
            process::exit(1);
        }
    };

    let mut reporter = match Reporter::from_config(&config) {
        Ok(reporter) => reporter,
        Err(err) => {
            eprintln!(
                "[ERROR] Cannot open log file {}: {}",
                config.log_file.display(),
                err
            );
            process::exit(1);
        }
    };

    if let Err(err) = reporter
        .log_file()
        .map_err(CliError::from)
        .and_then(|log| logging::init(log, config.log_level))
    {
        eprintln!("[ERROR] {}", err);
        process::exit(1);
    }

    if let Err(err) = run(cli.command, &mut reporter) {
        for line in report_fatal(&mut reporter, &err.to_string()) {
            eprintln!("{}", line);
        }
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> CliResult<TallyConfig> {
    let mut config = TallyConfig::load(cli.config.as_deref())?;

    if let Some(log_file) = &cli.log_file {
        config.log_file = log_file.clone();
    }
    if cli.append_log {
        config.log_mode = LogMode::Append;
    }

    Ok(config)
}

fn run<C: Write, L: Write>(command: Commands, reporter: &mut Reporter<C, L>) -> CliResult<()> {
    match command {
        Commands::Salary { path, export } => commands::salary::execute(path, export, reporter),
        Commands::Cats { path, export } => commands::cats::execute(path, export, reporter),
    }
}

/// Report a run-ending error; returns what still has to reach stderr when the
/// reporter's own sinks fail.
fn report_fatal<C: Write, L: Write>(reporter: &mut Reporter<C, L>, message: &str) -> Vec<String> {
    match reporter.error(message) {
        Ok(()) => Vec::new(),
        Err(err) => vec![
            format!("[ERROR] {}", message),
            format!("[ERROR] Cannot write to the log: {}", err),
        ],
    }
}

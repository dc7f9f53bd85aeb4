//! CLI entry point for the dumpclean tool.
//! Provides clap-based command routing for the dump, data and all
//! subcommands, and exit code mapping based on error type.

mod output;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use dumpclean_core::config::{CliOverrides, DumpCleanConfig};
use dumpclean_core::{DumpClean, DumpCleanError, SanitizeReport};

/// Top-level CLI definition with global flags and subcommand dispatch.
#[derive(Parser)]
#[command(
    name = "dumpclean",
    about = "Strip D1 migration bookkeeping from SQL dumps before re-import",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file path (default: dumpclean.toml if present)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Report what would be removed without writing any file
    #[arg(long, global = true)]
    dry_run: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable verbose/debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// All available dumpclean subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Remove the d1_migrations table and its rows from a full dump
    Dump {
        /// Dump to read (default: backup.sql)
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// File to write (default: backup_clean.sql)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Remove d1_migrations rows from a data dump and prepend DELETE statements
    Data {
        /// Dump to read (default: backup_data.sql)
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// File to write (default: backup_data_clean.sql)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Run dump then data with their configured paths
    All,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging (suppress when JSON output is requested)
    let filter = if cli.json {
        "error"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    env_logger::Builder::new()
        .parse_env(env_logger::Env::default().default_filter_or(filter))
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        print_error(&e);
        process::exit(exit_code(&e));
    }
}

/// Map error types to differentiated exit codes.
fn exit_code(error: &DumpCleanError) -> i32 {
    match error {
        DumpCleanError::ConfigError(_) => 2,
        DumpCleanError::SamePath { .. } => 2,
        DumpCleanError::ReadFailed { .. } => 3,
        DumpCleanError::WriteFailed { .. } => 4,
    }
}

/// Build configuration and dispatch the chosen subcommand.
fn run(cli: Cli) -> Result<(), DumpCleanError> {
    let mut overrides = CliOverrides::default();
    match &cli.command {
        Commands::Dump { input, output } => {
            overrides.dump_input = input.clone();
            overrides.dump_output = output.clone();
        }
        Commands::Data { input, output } => {
            overrides.data_input = input.clone();
            overrides.data_output = output.clone();
        }
        Commands::All => {}
    }

    let config = DumpCleanConfig::load(cli.config.as_deref(), &overrides)?;
    let dc = DumpClean::new(config);

    let reports = match &cli.command {
        Commands::Dump { .. } => vec![dc.clean_dump(cli.dry_run)?],
        Commands::Data { .. } => vec![dc.clean_data(cli.dry_run)?],
        Commands::All => dc.clean_all(cli.dry_run)?,
    };

    print_reports(&reports, cli.json, cli.quiet);
    Ok(())
}

fn print_reports(reports: &[SanitizeReport], json_output: bool, quiet: bool) {
    if json_output {
        match serde_json::to_string_pretty(reports) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize report: {}", e),
        }
    } else if !quiet {
        output::print_sanitize_reports(reports);
    }
}

/// Print a formatted error message with actionable hints to stderr.
fn print_error(error: &DumpCleanError) {
    eprintln!("{} {}", "ERROR:".red().bold(), error);

    match error {
        DumpCleanError::ConfigError(_) => {
            eprintln!(
                "{}",
                "Hint: Check your dumpclean.toml; only [dump] and [data] with input/output keys are accepted."
                    .dimmed()
            );
        }
        DumpCleanError::ReadFailed { .. } => {
            eprintln!(
                "{}",
                "Hint: Export the dump first, e.g. 'wrangler d1 export <db> --remote --output backup.sql', or pass --input."
                    .dimmed()
            );
        }
        DumpCleanError::WriteFailed { .. } => {
            eprintln!(
                "{}",
                "Hint: Check that the output directory exists and is writable, or pass --output."
                    .dimmed()
            );
        }
        DumpCleanError::SamePath { .. } => {
            eprintln!(
                "{}",
                "Hint: Pick a different --output; the input dump is kept as the backup of record."
                    .dimmed()
            );
        }
    }
}

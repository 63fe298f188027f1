use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod calendar_cmd;
mod config;
mod statement_cmd;

use calendar_cmd::{CsvToIcalArgs, run_csv_to_ical};
use statement_cmd::{StatementArgs, run_statement};

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")"),
    about = "Statement-line extraction and CSV-to-iCalendar conversion"
)]
struct Cli {
    /// Optional TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract cashback transactions from statement text and print one JSON record per line
    Statement(StatementArgs),

    /// Convert a CSV of calendar events to an iCalendar (.ics) file
    CsvToIcal(CsvToIcalArgs),
}

/// `RUST_LOG` sets the filter (default: warn). Each `-v` adds a global level on top.
fn log_filter(verbose: u8) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();

    match verbose {
        0 => filter,
        1 => filter.add_directive(Level::INFO.into()),
        2 => filter.add_directive(Level::DEBUG.into()),
        _ => filter.add_directive(Level::TRACE.into()),
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Statement(args) => run_statement(&args, &cfg)?,
        Command::CsvToIcal(args) => run_csv_to_ical(&args, &cfg)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // one line: "Error: <context>: <cause>"
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tally_calendar::{BuildOptions, build_calendar, default_output_path, read_events};

use crate::config::{Config, parse_timezone};

#[derive(Args, Debug)]
pub struct CsvToIcalArgs {
    /// Path to the input CSV file containing calendar events
    pub input_csv: PathBuf,

    /// Output .ics path (default: INPUT_CSV with an .ics extension)
    pub output_ics: Option<PathBuf>,

    /// IANA timezone for event times, e.g. America/New_York (default: config, else floating)
    #[arg(long)]
    pub timezone: Option<String>,

    /// PRODID written to the calendar (default: config value)
    #[arg(long)]
    pub prodid: Option<String>,
}

pub fn run_csv_to_ical(args: &CsvToIcalArgs, cfg: &Config) -> Result<()> {
    let output = args
        .output_ics
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input_csv));

    let timezone = args
        .timezone
        .as_deref()
        .or(cfg.calendar.timezone.as_deref())
        .map(parse_timezone)
        .transpose()?;

    let events = read_events(&args.input_csv)?;
    if events.is_empty() {
        println!("No events found in the CSV file.");
        return Ok(());
    }

    let opts = BuildOptions {
        prodid: args
            .prodid
            .clone()
            .unwrap_or_else(|| cfg.calendar.prodid.clone()),
        timezone,
        generated_at: Utc::now(),
    };
    let build = build_calendar(&events, &opts);

    for s in &build.skipped {
        eprintln!("Error parsing dates for event '{}': {}", s.subject, s.reason);
    }

    fs::write(&output, build.calendar.to_ics())
        .with_context(|| format!("Error writing to '{}'", output.display()))?;
    println!("iCalendar file has been created at '{}'", output.display());

    Ok(())
}

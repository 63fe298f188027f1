use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use tally_ingest::{DateStyle, TransactionRecord, aggregate_statement_files};
use tracing::info;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct StatementArgs {
    /// Statement text file
    #[arg(required_unless_present = "files")]
    pub file: Option<PathBuf>,

    /// One or more statement text files (repeatable); read after FILE, in order
    #[arg(long, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Keep dates as MM/DD/YYYY instead of rewriting to YYYY-MM-DD
    #[arg(long, default_value_t = false)]
    pub keep_dates: bool,
}

impl StatementArgs {
    /// Positional file first, then every `--files` value.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.file.iter().chain(self.files.iter()).cloned().collect()
    }

    pub fn date_style(&self, cfg: &Config) -> DateStyle {
        if self.keep_dates {
            DateStyle::AsWritten
        } else {
            cfg.statement.date_style()
        }
    }
}

pub fn run_statement(args: &StatementArgs, cfg: &Config) -> Result<()> {
    let paths = args.paths();
    let txns = aggregate_statement_files(&paths, args.date_style(cfg))?;
    info!(files = paths.len(), records = txns.len(), "statement parse complete");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_records(&mut out, &txns)?;
    out.flush()?;
    Ok(())
}

/// One JSON object per line.
pub fn write_records<W: Write>(out: &mut W, txns: &[TransactionRecord]) -> Result<()> {
    for t in txns {
        serde_json::to_writer(&mut *out, t)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

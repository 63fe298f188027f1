//! Multi-file statement aggregation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::parsers::cashback::CashbackStatementParser;
use crate::types::{DateStyle, TransactionRecord};

/// Parse each statement file in order and concatenate the records.
///
/// The first unreadable path aborts the whole run; files after it are not read
/// and nothing parsed so far is returned.
pub fn aggregate_statement_files<P: AsRef<Path>>(
    paths: &[P],
    date_style: DateStyle,
) -> Result<Vec<TransactionRecord>> {
    let parser = CashbackStatementParser::new(date_style)?;
    let mut out = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading '{}'", path.display()))?;

        let txns = parser.parse_text(&text);
        debug!(path = %path.display(), records = txns.len(), "parsed statement file");
        out.extend(txns);
    }

    Ok(out)
}

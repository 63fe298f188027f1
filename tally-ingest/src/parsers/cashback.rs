//! Cashback credit-card statement parser (text)
//!
//! Expected rows, one transaction per line:
//!   04/07/2021  COFFEE SHOP              5%    $1.25    $25.00
//!   04/09/2021  REFUND GROCERY STORE    -2%   $-0.80   $-40.00
//!
//! Columns are DATE, DESCRIPTION, CASHBACK %, $CASHBACK, $TOTAL. Lines that do
//! not match from their first character (headers, page footers, blanks) are
//! dropped without error.

use anyhow::Result;
use regex::{Captures, Regex};
use tracing::trace;

use crate::dates::normalize_statement_date;
use crate::types::{DateStyle, TransactionRecord};

/// Compiled line grammar plus the date style applied to each match.
#[derive(Debug, Clone)]
pub struct CashbackStatementParser {
    txn_re: Regex,
    date_style: DateStyle,
}

impl CashbackStatementParser {
    pub fn new(date_style: DateStyle) -> Result<Self> {
        // DATE DESCRIPTION PCT $CASHBACK $TOTAL, anchored at start only.
        let txn_re = Regex::new(concat!(
            r"^(?P<date>\d{2}/\d{2}/\d{4})\s+",
            r"(?P<description>.+?)\s+",
            r"(?P<cashback_percentage>-?\d+%)\s+",
            r"\$(?P<cashback_amount>-?[\d.]+)\s+",
            r"\$(?P<total>-?[\d.]+)"
        ))?;

        Ok(Self { txn_re, date_style })
    }

    /// Match a single line. `None` means the line is not a transaction row.
    pub fn parse_line(&self, line: &str) -> Option<TransactionRecord> {
        let caps = self.txn_re.captures(line)?;
        Some(self.record_from(&caps))
    }

    /// Extract every matching line of `text`, in line order.
    pub fn parse_text(&self, text: &str) -> Vec<TransactionRecord> {
        text.trim()
            .split('\n')
            .filter_map(|line| {
                let rec = self.parse_line(line);
                if rec.is_none() {
                    trace!(line, "skipping non-transaction line");
                }
                rec
            })
            .collect()
    }

    fn record_from(&self, caps: &Captures<'_>) -> TransactionRecord {
        let date = match self.date_style {
            DateStyle::AsWritten => caps["date"].to_string(),
            DateStyle::Iso => normalize_statement_date(&caps["date"]),
        };

        TransactionRecord {
            date,
            description: caps["description"].to_string(),
            cashback_percentage: caps["cashback_percentage"].to_string(),
            cashback_amount: caps["cashback_amount"].to_string(),
            total: caps["total"].to_string(),
        }
    }
}

/// Parse extracted statement text into cashback transactions.
pub fn parse_cashback_statement_text(
    text: &str,
    date_style: DateStyle,
) -> Result<Vec<TransactionRecord>> {
    let parser = CashbackStatementParser::new(date_style)?;
    Ok(parser.parse_text(text))
}

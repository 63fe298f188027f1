//! tally-ingest: statement-text extraction, date normalization and multi-file aggregation.

pub mod aggregate;
pub mod dates;
pub mod parsers;
pub mod types;

pub use aggregate::aggregate_statement_files;
pub use dates::normalize_statement_date;
pub use parsers::cashback::{CashbackStatementParser, parse_cashback_statement_text};
pub use types::{DateStyle, TransactionRecord};

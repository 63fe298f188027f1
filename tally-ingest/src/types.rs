use serde::{Deserialize, Serialize};

/// How a matched statement date is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// Keep the statement's `MM/DD/YYYY` text.
    AsWritten,
    /// Rewrite to `YYYY-MM-DD` (no calendar validation).
    #[default]
    Iso,
}

/// One statement row captured by the cashback grammar.
///
/// All fields hold the literal text of the line; amounts keep their sign but
/// drop the `$`, the percentage keeps its `%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub description: String,
    pub cashback_percentage: String,
    pub cashback_amount: String,
    pub total: String,
}

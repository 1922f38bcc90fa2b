//! The fund record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One mutual fund holding.
///
/// The record's `fund_id` doubles as its key in the ledger. Field order and
/// the `rename` attributes fix the persisted JSON layout; changing either
/// breaks compatibility with data already on the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    /// Identifier, also the ledger key.
    #[serde(rename = "fundId")]
    pub fund_id: String,

    /// Fund name.
    pub name: String,

    /// Name of the investor holding the fund.
    pub investor: String,

    /// Invested amount.
    #[serde(serialize_with = "crate::codec::serialize_ledger_float")]
    pub amount: f64,

    /// Expected return rate, in percent.
    #[serde(rename = "returnRate", serialize_with = "crate::codec::serialize_ledger_float")]
    pub return_rate: f64,

    /// Holding period in months.
    pub duration: i64,
}

impl FundRecord {
    /// Create a record from its six fields.
    pub fn new(
        fund_id: impl Into<String>,
        name: impl Into<String>,
        investor: impl Into<String>,
        amount: f64,
        return_rate: f64,
        duration: i64,
    ) -> Self {
        Self {
            fund_id: fund_id.into(),
            name: name.into(),
            investor: investor.into(),
            amount,
            return_rate,
            duration,
        }
    }

    /// The ledger key this record is stored under.
    pub fn key(&self) -> &str {
        &self.fund_id
    }
}

impl fmt::Display for FundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}): {} at {}% for {} months",
            self.fund_id, self.name, self.investor, self.amount, self.return_rate, self.duration
        )
    }
}

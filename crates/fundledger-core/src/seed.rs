//! Sample records used to initialize an empty ledger.

use crate::record::FundRecord;

/// The three sample funds written by the seed operation, in write order.
pub fn seed_records() -> Vec<FundRecord> {
    vec![
        FundRecord::new("FUND1", "Equity Growth Fund", "Alice", 10000.00, 12.5, 12),
        FundRecord::new("FUND2", "Debt Income Fund", "Bob", 5000.00, 8.0, 24),
        FundRecord::new("FUND3", "Balanced Fund", "Charlie", 20000.00, 10.0, 18),
    ]
}

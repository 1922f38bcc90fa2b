//! Transaction context handed to every contract call.

use fundledger_store::Ledger;

/// Access to the ledger for the duration of one transaction.
///
/// The caller owns the transaction: it decides which ledger view the
/// contract sees and when the writes become durable. The contract only
/// reads and writes through [`TxContext::ledger`].
pub struct TxContext<'a> {
    tx_id: String,
    ledger: &'a dyn Ledger,
}

impl<'a> TxContext<'a> {
    /// Create a context for transaction `tx_id` over `ledger`.
    pub fn new(tx_id: impl Into<String>, ledger: &'a dyn Ledger) -> Self {
        Self {
            tx_id: tx_id.into(),
            ledger,
        }
    }

    /// The transaction identifier, used for log correlation.
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// The ledger view for this transaction.
    pub fn ledger(&self) -> &'a dyn Ledger {
        self.ledger
    }
}

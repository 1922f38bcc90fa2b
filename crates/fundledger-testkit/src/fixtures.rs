//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use fundledger::{ContractConfig, FundContract, TxContext};
use fundledger_core::FundRecord;
use fundledger_store::MemoryLedger;

/// A test fixture with an in-memory ledger and a contract.
pub struct ContractFixture {
    pub ledger: MemoryLedger,
    pub contract: FundContract,
    next_tx: AtomicU64,
}

impl ContractFixture {
    /// Create a fixture with an empty ledger and the default configuration.
    pub fn new() -> Self {
        Self::with_config(ContractConfig::default())
    }

    /// Create a fixture with an empty ledger and the given configuration.
    pub fn with_config(config: ContractConfig) -> Self {
        Self {
            ledger: MemoryLedger::new(),
            contract: FundContract::new(config),
            next_tx: AtomicU64::new(1),
        }
    }

    /// Create a fixture whose ledger already holds the sample funds.
    pub async fn seeded() -> Self {
        let fixture = Self::new();
        if let Err(e) = fixture.contract.seed(&fixture.ctx()).await {
            panic!("seeding an in-memory ledger failed: {}", e);
        }
        fixture
    }

    /// A fresh transaction context over the fixture's ledger.
    ///
    /// Each call gets its own transaction id.
    pub fn ctx(&self) -> TxContext<'_> {
        let n = self.next_tx.fetch_add(1, Ordering::Relaxed);
        TxContext::new(format!("tx-{}", n), &self.ledger)
    }
}

impl Default for ContractFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A plausible record numbered `n`.
pub fn sample_fund(n: u32) -> FundRecord {
    FundRecord::new(
        format!("FUND{}", n),
        format!("Sample Fund {}", n),
        format!("Investor {}", n),
        1000.0 * f64::from(n) + 0.25,
        5.0 + f64::from(n % 10),
        12 * i64::from(n % 5 + 1),
    )
}

//! The fund contract: record operations over a ledger.
//!
//! Each operation is a single request against the ledger inside the
//! caller's transaction. The contract keeps no state between calls beyond
//! its configuration.

use bytes::Bytes;

use fundledger_core::{decode_record, encode_record, seed_records, FundRecord};
use fundledger_store::{prefix_range, ScanGuard};

use crate::context::TxContext;
use crate::error::{ContractError, LedgerOp, Result};

/// Configuration for the contract.
#[derive(Debug, Clone, Default)]
pub struct ContractConfig {
    /// Restrict `list_all` to keys starting with this prefix.
    ///
    /// Empty scans the whole ledger.
    pub scan_prefix: String,
    /// Skip values that fail to decode during `list_all` instead of failing.
    pub skip_undecodable: bool,
}

impl ContractConfig {
    /// Set the key prefix `list_all` scans.
    pub fn with_scan_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scan_prefix = prefix.into();
        self
    }

    /// Set whether `list_all` skips undecodable values.
    pub fn with_skip_undecodable(mut self, skip: bool) -> Self {
        self.skip_undecodable = skip;
        self
    }
}

/// The mutual fund contract.
///
/// Provides:
/// - Seeding an empty ledger with sample funds
/// - Create, read, update and delete of single records
/// - Listing every record in key order
///
/// Records are stored as JSON under their own `fund_id`.
#[derive(Debug, Clone, Default)]
pub struct FundContract {
    config: ContractConfig,
}

impl FundContract {
    /// Create a contract with the given configuration.
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Write the sample funds.
    ///
    /// Stops at the first failure. Records written before it stay written.
    pub async fn seed(&self, ctx: &TxContext<'_>) -> Result<()> {
        for (i, record) in seed_records().iter().enumerate() {
            self.store(ctx, record)
                .await
                .map_err(|e| ContractError::Seed {
                    index: i + 1,
                    source: Box::new(e),
                })?;
        }

        tracing::info!(tx_id = ctx.tx_id(), "seeded ledger with sample funds");
        Ok(())
    }

    /// Store a record under its id, replacing whatever is there.
    pub async fn create(&self, ctx: &TxContext<'_>, record: &FundRecord) -> Result<()> {
        self.store(ctx, record).await?;
        tracing::debug!(tx_id = ctx.tx_id(), fund_id = %record.fund_id, "created fund");
        Ok(())
    }

    /// Fetch the record stored under `id`.
    pub async fn read(&self, ctx: &TxContext<'_>, id: &str) -> Result<FundRecord> {
        let bytes = self.fetch_existing(ctx, id).await?;
        decode_record(&bytes).map_err(|source| ContractError::Decode {
            key: id.to_string(),
            source,
        })
    }

    /// Replace an existing record.
    ///
    /// Fails with `NotFound` if nothing is stored under the record's id.
    pub async fn update(&self, ctx: &TxContext<'_>, record: &FundRecord) -> Result<()> {
        self.fetch_existing(ctx, record.key()).await?;
        self.store(ctx, record).await?;
        tracing::debug!(tx_id = ctx.tx_id(), fund_id = %record.fund_id, "updated fund");
        Ok(())
    }

    /// Remove the record stored under `id`. Absent ids are not an error.
    pub async fn delete(&self, ctx: &TxContext<'_>, id: &str) -> Result<()> {
        ctx.ledger()
            .del_state(id)
            .await
            .map_err(|source| ContractError::Store {
                op: LedgerOp::Delete,
                key: id.to_string(),
                source,
            })?;

        tracing::debug!(tx_id = ctx.tx_id(), fund_id = id, "deleted fund");
        Ok(())
    }

    /// Every record in the scanned range, in ledger key order.
    pub async fn list_all(&self, ctx: &TxContext<'_>) -> Result<Vec<FundRecord>> {
        let prefix = &self.config.scan_prefix;
        let (start, end) = prefix_range(prefix);

        let iter = ctx
            .ledger()
            .get_state_by_range(&start, &end)
            .await
            .map_err(|source| ContractError::Store {
                op: LedgerOp::Scan,
                key: prefix.clone(),
                source,
            })?;

        // Early returns below close the scan when `scan` drops.
        let mut scan = ScanGuard::new(iter);
        let mut funds = Vec::new();

        while scan.iter().has_next() {
            let entry = scan.iter().next().map_err(|source| ContractError::Store {
                op: LedgerOp::Scan,
                key: prefix.clone(),
                source,
            })?;

            match decode_record(&entry.value) {
                Ok(record) => funds.push(record),
                Err(e) if self.config.skip_undecodable => {
                    tracing::warn!(tx_id = ctx.tx_id(), key = %entry.key, "skipping undecodable value: {}", e);
                }
                Err(source) => {
                    return Err(ContractError::Decode {
                        key: entry.key,
                        source,
                    })
                }
            }
        }

        scan.finish().map_err(|source| ContractError::Store {
            op: LedgerOp::Close,
            key: prefix.clone(),
            source,
        })?;

        tracing::debug!(tx_id = ctx.tx_id(), count = funds.len(), "listed funds");
        Ok(funds)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the raw value under `id`, treating absent and empty alike.
    async fn fetch_existing(&self, ctx: &TxContext<'_>, id: &str) -> Result<Bytes> {
        let value = ctx
            .ledger()
            .get_state(id)
            .await
            .map_err(|source| ContractError::Store {
                op: LedgerOp::Read,
                key: id.to_string(),
                source,
            })?;

        match value {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(ContractError::NotFound { id: id.to_string() }),
        }
    }

    /// Encode and write a record under its own id.
    async fn store(&self, ctx: &TxContext<'_>, record: &FundRecord) -> Result<()> {
        let bytes = encode_record(record).map_err(|source| ContractError::Encode {
            id: record.fund_id.clone(),
            source,
        })?;

        ctx.ledger()
            .put_state(record.key(), bytes)
            .await
            .map_err(|source| ContractError::Store {
                op: LedgerOp::Write,
                key: record.fund_id.clone(),
                source,
            })
    }
}

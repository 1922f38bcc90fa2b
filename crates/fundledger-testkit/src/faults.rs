//! A ledger wrapper that fails on demand.
//!
//! Wraps any [`Ledger`] and turns selected calls into
//! [`LedgerError::Unavailable`], so error paths can be exercised without a
//! misbehaving backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use fundledger_store::{KeyValue, Ledger, LedgerError, Result, StateIterator};

/// Which calls should fail.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    /// Fail every `get_state`.
    pub fail_get: bool,
    /// Fail the n-th `put_state` call (1-based) and every one after it.
    pub fail_put_from: Option<usize>,
    /// Fail every `del_state`.
    pub fail_delete: bool,
    /// Fail every `get_state_by_range`.
    pub fail_scan_open: bool,
    /// Fail the n-th `next()` (1-based) on each opened iterator.
    pub fail_next_at: Option<usize>,
    /// Report an error from `close()` after closing the inner iterator.
    pub fail_close: bool,
}

/// Ledger wrapper that injects failures described by a [`FaultPlan`].
pub struct FaultyLedger<L> {
    inner: L,
    plan: FaultPlan,
    puts: AtomicUsize,
}

impl<L: Ledger> FaultyLedger<L> {
    /// Wrap `inner` with no faults.
    pub fn new(inner: L) -> Self {
        Self::with_plan(inner, FaultPlan::default())
    }

    /// Wrap `inner` with the given fault plan.
    pub fn with_plan(inner: L, plan: FaultPlan) -> Self {
        Self {
            inner,
            plan,
            puts: AtomicUsize::new(0),
        }
    }

    pub fn fail_get(mut self) -> Self {
        self.plan.fail_get = true;
        self
    }

    pub fn fail_put_from(mut self, n: usize) -> Self {
        self.plan.fail_put_from = Some(n);
        self
    }

    pub fn fail_delete(mut self) -> Self {
        self.plan.fail_delete = true;
        self
    }

    pub fn fail_scan_open(mut self) -> Self {
        self.plan.fail_scan_open = true;
        self
    }

    pub fn fail_next_at(mut self, n: usize) -> Self {
        self.plan.fail_next_at = Some(n);
        self
    }

    pub fn fail_close(mut self) -> Self {
        self.plan.fail_close = true;
        self
    }

    /// The wrapped ledger.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Number of `put_state` calls seen, including failed ones.
    pub fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

fn injected(what: &str) -> LedgerError {
    LedgerError::Unavailable(format!("injected {} failure", what))
}

#[async_trait]
impl<L: Ledger> Ledger for FaultyLedger<L> {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        if self.plan.fail_get {
            return Err(injected("get"));
        }
        self.inner.get_state(key).await
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        let call = self.puts.fetch_add(1, Ordering::SeqCst) + 1;
        if matches!(self.plan.fail_put_from, Some(n) if call >= n) {
            return Err(injected("put"));
        }
        self.inner.put_state(key, value).await
    }

    async fn del_state(&self, key: &str) -> Result<()> {
        if self.plan.fail_delete {
            return Err(injected("delete"));
        }
        self.inner.del_state(key).await
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator>> {
        if self.plan.fail_scan_open {
            return Err(injected("scan"));
        }
        let inner = self.inner.get_state_by_range(start_key, end_key).await?;
        Ok(Box::new(FaultyIterator {
            inner,
            fail_next_at: self.plan.fail_next_at,
            fail_close: self.plan.fail_close,
            taken: 0,
        }))
    }
}

struct FaultyIterator {
    inner: Box<dyn StateIterator>,
    fail_next_at: Option<usize>,
    fail_close: bool,
    taken: usize,
}

impl StateIterator for FaultyIterator {
    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    fn next(&mut self) -> Result<KeyValue> {
        self.taken += 1;
        if self.fail_next_at == Some(self.taken) {
            return Err(injected("next"));
        }
        self.inner.next()
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()?;
        if self.fail_close {
            return Err(injected("close"));
        }
        Ok(())
    }
}

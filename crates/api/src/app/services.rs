use std::sync::Arc;

use shoplite_core::{AggregateRoot, ExpectedVersion, LedgerError, LedgerResult, OwnerId};
use shoplite_infra::{OwnerStore, StoreError};
use shoplite_ledger::{InvoiceLedger, Owner};

/// Failure of one API operation: either the domain said no, or persistence
/// did.
#[derive(Debug)]
pub enum OpError {
    Domain(LedgerError),
    Store(StoreError),
}

impl From<LedgerError> for OpError {
    fn from(err: LedgerError) -> Self {
        Self::Domain(err)
    }
}

impl From<StoreError> for OpError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Store wiring shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn OwnerStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn OwnerStore>) -> Self {
        Self { store }
    }

    /// Read-only snapshot of one owner's aggregate.
    pub fn read_owner(&self, owner_id: OwnerId) -> Result<Owner, OpError> {
        Ok(self.store.load(owner_id)?)
    }

    /// Load the aggregate, run one ledger operation against it, and persist
    /// the result at the loaded version.
    ///
    /// A domain error aborts before persist (the snapshot is discarded), so
    /// the stored aggregate never sees a failed operation. A persist conflict
    /// means a concurrent request won the write; the caller gets the conflict
    /// and may retry.
    pub fn with_owner<T>(
        &self,
        owner_id: OwnerId,
        op: impl FnOnce(&mut InvoiceLedger<'_>) -> LedgerResult<T>,
    ) -> Result<T, OpError> {
        let mut owner = self.store.load(owner_id)?;
        let loaded_version = owner.version();

        let out = {
            let mut ledger = InvoiceLedger::new(&mut owner);
            op(&mut ledger)?
        };

        if let Err(err) = self
            .store
            .persist(owner, ExpectedVersion::Exact(loaded_version))
        {
            tracing::warn!(owner_id = %owner_id, error = %err, "persist failed after ledger operation");
            return Err(err.into());
        }

        Ok(out)
    }
}

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use shoplite_core::{AggregateRoot, ExpectedVersion, OwnerId};
use shoplite_ledger::Owner;

/// Persistence failures around the owner aggregate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("owner not found: {0}")]
    OwnerNotFound(OwnerId),

    /// Another write landed between load and persist.
    #[error("concurrent write conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Owner aggregate store.
///
/// `load` hands out a snapshot; `persist` writes a whole aggregate back and
/// must reject the write when the stored version no longer matches
/// `expected` (the version the caller loaded at). That check is the only
/// serialization between concurrent requests for the same owner; requests for
/// different owners share no state.
pub trait OwnerStore: Send + Sync {
    fn load(&self, owner_id: OwnerId) -> Result<Owner, StoreError>;
    fn persist(&self, owner: Owner, expected: ExpectedVersion) -> Result<(), StoreError>;
}

impl<S> OwnerStore for Arc<S>
where
    S: OwnerStore + ?Sized,
{
    fn load(&self, owner_id: OwnerId) -> Result<Owner, StoreError> {
        (**self).load(owner_id)
    }

    fn persist(&self, owner: Owner, expected: ExpectedVersion) -> Result<(), StoreError> {
        (**self).persist(owner, expected)
    }
}

/// In-memory owner store for tests/dev.
///
/// Clone-out/clone-in semantics: callers mutate their own snapshot and write
/// it back, so no request ever observes a half-updated aggregate.
#[derive(Debug, Default)]
pub struct InMemoryOwnerStore {
    owners: RwLock<HashMap<OwnerId, Owner>>,
}

impl InMemoryOwnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fresh owner aggregate. Creating accounts is the (external)
    /// auth collaborator's job in production; tests and the dev binary use
    /// this directly.
    pub fn register_owner(&self, owner_id: OwnerId) -> Result<Owner, StoreError> {
        let mut owners = self
            .owners
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        if owners.contains_key(&owner_id) {
            return Err(StoreError::Conflict(format!(
                "owner already registered: {owner_id}"
            )));
        }

        let owner = Owner::new(owner_id);
        owners.insert(owner_id, owner.clone());
        tracing::debug!(owner_id = %owner_id, "registered owner");
        Ok(owner)
    }
}

impl OwnerStore for InMemoryOwnerStore {
    fn load(&self, owner_id: OwnerId) -> Result<Owner, StoreError> {
        let owners = self
            .owners
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        owners
            .get(&owner_id)
            .cloned()
            .ok_or(StoreError::OwnerNotFound(owner_id))
    }

    fn persist(&self, owner: Owner, expected: ExpectedVersion) -> Result<(), StoreError> {
        let mut owners = self
            .owners
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let owner_id = owner.owner_id();
        let Some(stored) = owners.get(&owner_id) else {
            return Err(StoreError::OwnerNotFound(owner_id));
        };

        if !expected.matches(stored.version()) {
            return Err(StoreError::Conflict(format!(
                "expected {expected:?}, found {}",
                stored.version()
            )));
        }

        owners.insert(owner_id, owner);
        Ok(())
    }
}

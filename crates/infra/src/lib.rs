//! Infrastructure: owner aggregate persistence.
//!
//! The domain only ever sees whole aggregates. [`store::OwnerStore`] is the
//! collaborator boundary (load / persist with an optimistic version check),
//! and [`store::InMemoryOwnerStore`] is the in-tree implementation. Durable
//! backends live behind the same trait, outside this repository.

pub mod store;

pub use store::{InMemoryOwnerStore, OwnerStore, StoreError};

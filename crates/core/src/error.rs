//! Ledger error taxonomy.
//!
//! Every variant is a recoverable, request-local failure: the operation that
//! produced it performed no partial mutation, and the boundary layer decides
//! presentation. Infrastructure failures live elsewhere.

use thiserror::Error;

use crate::id::StockItemId;

/// Result type used across the domain layer.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Domain-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An owner-scoped entity lookup failed.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A per-owner uniqueness constraint was violated
    /// (duplicate invoice number / sku / phone number).
    #[error("duplicate {field}: {value}")]
    Conflict { field: &'static str, value: String },

    /// An invoice line asked for more units than the stock item holds.
    #[error("insufficient stock for item {item_id}: available {available}, required {required}")]
    InsufficientStock {
        item_id: StockItemId,
        available: i64,
        required: i64,
    },

    /// A quantity adjustment would have driven the quantity below zero.
    #[error("quantity cannot go negative (attempted {attempted})")]
    InvalidQuantity { attempted: i64 },

    /// A field failed validation (blank name, empty line list, ...).
    #[error("validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(field: &'static str, value: impl Into<String>) -> Self {
        Self::Conflict {
            field,
            value: value.into(),
        }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn insufficient_stock(item_id: StockItemId, available: i64, required: i64) -> Self {
        Self::InsufficientStock {
            item_id,
            available,
            required,
        }
    }
}

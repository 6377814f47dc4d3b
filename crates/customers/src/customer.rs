use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_core::{CustomerId, Entity, LedgerError, LedgerResult};

/// A customer of the owning account.
///
/// `balance` is the amount currently owed to the business in minor currency
/// units. A pending invoice contributes exactly its total amount; paid and
/// cancelled invoices contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    pub phone_number: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a customer with a validated name and phone number.
    ///
    /// Phone uniqueness is an owner-level constraint checked by the ledger,
    /// not here.
    pub fn new(
        id: CustomerId,
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        balance: i64,
    ) -> LedgerResult<Self> {
        let full_name = full_name.into();
        let phone_number = phone_number.into();

        if full_name.trim().is_empty() {
            return Err(LedgerError::validation("full_name", "cannot be empty"));
        }
        if phone_number.trim().is_empty() {
            return Err(LedgerError::validation("phone_number", "cannot be empty"));
        }

        Ok(Self {
            id,
            full_name,
            phone_number,
            balance,
            created_at: Utc::now(),
        })
    }

    /// Apply a partial update. Validates every present field before assigning
    /// any of them, so a failed patch leaves the customer untouched.
    pub fn apply_patch(&mut self, patch: &CustomerPatch) -> LedgerResult<()> {
        if let Some(full_name) = &patch.full_name {
            if full_name.trim().is_empty() {
                return Err(LedgerError::validation("full_name", "cannot be empty"));
            }
        }
        if let Some(phone_number) = &patch.phone_number {
            if phone_number.trim().is_empty() {
                return Err(LedgerError::validation("phone_number", "cannot be empty"));
            }
        }

        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(phone_number) = &patch.phone_number {
            self.phone_number = phone_number.clone();
        }
        if let Some(balance) = patch.balance {
            self.balance = balance;
        }

        Ok(())
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const KIND: &'static str = "customer";

    fn id(&self) -> CustomerId {
        self.id
    }
}

/// Partial update of a customer. Absent fields keep their current value;
/// `balance: Some(0)` is an explicit write, not an absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone_number.is_none() && self.balance.is_none()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_core::{
    CustomerId, Entity, InvoiceId, LedgerError, LedgerResult, StockItemId, ValueObject,
};

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    /// Balance delta applied to the invoice's customer when moving from
    /// `self` to `next`.
    ///
    /// The balance tracks what the customer currently owes, so only
    /// transitions into or out of `Pending` move money. `Paid` and
    /// `Cancelled` are both "not owed" states: switching between them is a
    /// no-op, as is re-asserting the current status.
    ///
    /// | previous → new      | delta         |
    /// |---------------------|---------------|
    /// | pending → paid      | −total_amount |
    /// | pending → cancelled | −total_amount |
    /// | paid → pending      | +total_amount |
    /// | cancelled → pending | +total_amount |
    /// | paid ↔ cancelled    | 0             |
    /// | X → X               | 0             |
    pub fn balance_delta(self, next: InvoiceStatus, total_amount: i64) -> i64 {
        use InvoiceStatus::*;

        match (self, next) {
            (Pending, Paid) | (Pending, Cancelled) => -total_amount,
            (Paid, Pending) | (Cancelled, Pending) => total_amount,
            _ => 0,
        }
    }

    pub fn is_pending(self) -> bool {
        self == InvoiceStatus::Pending
    }
}

/// One invoice line: a stock item reference plus a snapshot of its name and
/// the price/quantity billed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: StockItemId,
    pub name: String,
    pub quantity: i64,
    pub price: i64,
}

impl ValueObject for LineItem {}

/// An invoice issued by one owner to one of their customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Unique per owner.
    pub invoice_number: String,
    pub customer_id: CustomerId,
    pub items: Vec<LineItem>,
    /// Total billed amount in minor units. Supplied by the caller, not
    /// recomputed from the lines.
    pub total_amount: i64,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(
        id: InvoiceId,
        invoice_number: impl Into<String>,
        customer_id: CustomerId,
        items: Vec<LineItem>,
        total_amount: i64,
        status: InvoiceStatus,
    ) -> LedgerResult<Self> {
        let invoice_number = invoice_number.into();
        if invoice_number.trim().is_empty() {
            return Err(LedgerError::validation("invoice_number", "cannot be empty"));
        }
        validate_items(&items)?;
        if total_amount < 0 {
            return Err(LedgerError::validation("total_amount", "cannot be negative"));
        }

        Ok(Self {
            id,
            invoice_number,
            customer_id,
            items,
            total_amount,
            status,
            created_at: Utc::now(),
        })
    }

    /// Apply a partial update as plain field replacement.
    ///
    /// This deliberately does NOT touch stock quantities or the customer
    /// balance, and a `status` present in the patch is written raw; the
    /// transition table only runs through the dedicated status-change
    /// operation. Referential checks (duplicate number, customer existence)
    /// are owner-level and happen in the ledger before this is called.
    pub fn apply_patch(&mut self, patch: &InvoicePatch) -> LedgerResult<()> {
        if let Some(invoice_number) = &patch.invoice_number {
            if invoice_number.trim().is_empty() {
                return Err(LedgerError::validation("invoice_number", "cannot be empty"));
            }
        }
        if let Some(items) = &patch.items {
            validate_items(items)?;
        }
        if let Some(total_amount) = patch.total_amount {
            if total_amount < 0 {
                return Err(LedgerError::validation("total_amount", "cannot be negative"));
            }
        }

        if let Some(invoice_number) = &patch.invoice_number {
            self.invoice_number = invoice_number.clone();
        }
        if let Some(customer_id) = patch.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(items) = &patch.items {
            self.items = items.clone();
        }
        if let Some(total_amount) = patch.total_amount {
            self.total_amount = total_amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }

        Ok(())
    }
}

fn validate_items(items: &[LineItem]) -> LedgerResult<()> {
    if items.is_empty() {
        return Err(LedgerError::validation("items", "must contain at least one line"));
    }
    for line in items {
        if line.name.trim().is_empty() {
            return Err(LedgerError::validation("items", "line name cannot be empty"));
        }
        if line.quantity <= 0 {
            return Err(LedgerError::validation(
                "items",
                "line quantity must be positive",
            ));
        }
        if line.price < 0 {
            return Err(LedgerError::validation("items", "line price cannot be negative"));
        }
    }
    Ok(())
}

impl Entity for Invoice {
    type Id = InvoiceId;

    const KIND: &'static str = "invoice";

    fn id(&self) -> InvoiceId {
        self.id
    }
}

/// Partial update of an invoice (plain field replacement, see
/// [`Invoice::apply_patch`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
}

impl InvoicePatch {
    pub fn is_empty(&self) -> bool {
        self.invoice_number.is_none()
            && self.customer_id.is_none()
            && self.items.is_none()
            && self.total_amount.is_none()
            && self.status.is_none()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_core::{Entity, LedgerError, LedgerResult, StockItemId};

/// How an explicit quantity adjustment interprets its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityOperation {
    Set,
    Add,
    Subtract,
}

/// A stock item owned by one account.
///
/// Invariant: `quantity >= 0` at all times. Price and quantity are plain
/// integers (minor currency units / whole units).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: StockItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unique per owner when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StockItem {
    pub fn new(
        id: StockItemId,
        name: impl Into<String>,
        price: i64,
        quantity: i64,
        description: Option<String>,
        category: Option<String>,
        sku: Option<String>,
    ) -> LedgerResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::validation("name", "cannot be empty"));
        }
        if price < 0 {
            return Err(LedgerError::validation("price", "cannot be negative"));
        }
        if quantity < 0 {
            return Err(LedgerError::InvalidQuantity {
                attempted: quantity,
            });
        }

        Ok(Self {
            id,
            name,
            description,
            price,
            quantity,
            category,
            sku,
            created_at: Utc::now(),
        })
    }

    /// Apply a set/add/subtract adjustment.
    ///
    /// Returns the prior quantity for add/subtract (`None` for set, which
    /// does not report one). Rejects any result below zero without mutating.
    pub fn adjust_quantity(
        &mut self,
        amount: i64,
        operation: QuantityOperation,
    ) -> LedgerResult<Option<i64>> {
        let new_quantity = match operation {
            QuantityOperation::Set => amount,
            QuantityOperation::Add => self
                .quantity
                .checked_add(amount)
                .ok_or_else(|| LedgerError::validation("quantity", "adjustment overflow"))?,
            QuantityOperation::Subtract => self
                .quantity
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::validation("quantity", "adjustment overflow"))?,
        };

        if new_quantity < 0 {
            return Err(LedgerError::InvalidQuantity {
                attempted: new_quantity,
            });
        }

        let previous = match operation {
            QuantityOperation::Set => None,
            QuantityOperation::Add | QuantityOperation::Subtract => Some(self.quantity),
        };
        self.quantity = new_quantity;
        Ok(previous)
    }

    /// Apply a partial update. Validates every present field before assigning
    /// any of them, so a failed patch leaves the item untouched.
    pub fn apply_patch(&mut self, patch: &StockItemPatch) -> LedgerResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(LedgerError::validation("name", "cannot be empty"));
            }
        }
        if let Some(price) = patch.price {
            if price < 0 {
                return Err(LedgerError::validation("price", "cannot be negative"));
            }
        }
        if let Some(quantity) = patch.quantity {
            if quantity < 0 {
                return Err(LedgerError::InvalidQuantity {
                    attempted: quantity,
                });
            }
        }

        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(sku) = &patch.sku {
            self.sku = sku.clone();
        }

        Ok(())
    }
}

impl Entity for StockItem {
    type Id = StockItemId;

    const KIND: &'static str = "stock item";

    fn id(&self) -> StockItemId {
        self.id
    }
}

/// Partial update of a stock item.
///
/// Text fields that are optional on the item use a double `Option`: absent
/// keeps the current value, explicit null clears it, a value replaces it.
/// `quantity: Some(0)` and `price: Some(0)` are explicit writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "shoplite_core::patch::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "shoplite_core::patch::double_option"
    )]
    pub category: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "shoplite_core::patch::double_option"
    )]
    pub sku: Option<Option<String>>,
}

impl StockItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.sku.is_none()
    }

    /// The sku value this patch would leave on the item, if it touches sku.
    pub fn new_sku(&self) -> Option<Option<&str>> {
        self.sku.as_ref().map(|inner| inner.as_deref())
    }
}

use std::collections::BTreeMap;

use shoplite_core::{
    AggregateRoot, CustomerId, Entity, InvoiceId, LedgerError, LedgerResult, OwnerId, StockItemId,
};
use shoplite_customers::Customer;
use shoplite_inventory::StockItem;
use shoplite_invoicing::{Invoice, InvoiceStatus};

/// Aggregate root: one account and everything it owns.
///
/// Collections are keyed by entity id; invoices reference customers and stock
/// items by id rather than embedding them. UUIDv7 keys keep `BTreeMap`
/// iteration in creation order. All uniqueness constraints (phone number,
/// sku, invoice number) are scoped to this aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    id: OwnerId,
    pub(crate) customers: BTreeMap<CustomerId, Customer>,
    pub(crate) stock_items: BTreeMap<StockItemId, StockItem>,
    pub(crate) invoices: BTreeMap<InvoiceId, Invoice>,
    version: u64,
}

impl Owner {
    pub fn new(id: OwnerId) -> Self {
        Self {
            id,
            customers: BTreeMap::new(),
            stock_items: BTreeMap::new(),
            invoices: BTreeMap::new(),
            version: 0,
        }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.id
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn stock_item(&self, id: StockItemId) -> Option<&StockItem> {
        self.stock_items.get(&id)
    }

    pub fn stock_items(&self) -> impl Iterator<Item = &StockItem> {
        self.stock_items.values()
    }

    pub fn invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.get(&id)
    }

    pub fn invoices(&self) -> impl Iterator<Item = &Invoice> {
        self.invoices.values()
    }

    /// Invoices matching the given filters, in creation order.
    pub fn invoices_filtered(
        &self,
        status: Option<InvoiceStatus>,
        customer_id: Option<CustomerId>,
    ) -> Vec<&Invoice> {
        self.invoices
            .values()
            .filter(|inv| status.is_none_or(|s| inv.status == s))
            .filter(|inv| customer_id.is_none_or(|c| inv.customer_id == c))
            .collect()
    }

    /// Record one completed mutating operation.
    pub(crate) fn touch(&mut self) {
        self.version += 1;
    }

    /// Owner-scoped lookup that reports the entity kind on failure.
    pub(crate) fn fetch<E: Entity>(map: &BTreeMap<E::Id, E>, id: E::Id) -> LedgerResult<&E> {
        map.get(&id)
            .ok_or_else(|| LedgerError::not_found(E::KIND, id))
    }

    pub(crate) fn fetch_mut<E: Entity>(
        map: &mut BTreeMap<E::Id, E>,
        id: E::Id,
    ) -> LedgerResult<&mut E> {
        map.get_mut(&id)
            .ok_or_else(|| LedgerError::not_found(E::KIND, id))
    }
}

impl AggregateRoot for Owner {
    type Id = OwnerId;

    fn id(&self) -> OwnerId {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

//! Ledger domain module: the owner aggregate and the invoice ledger service.
//!
//! [`owner::Owner`] is the consistency boundary: one account's customers,
//! stock items and invoices in id-keyed collections. [`ledger::InvoiceLedger`]
//! is the only write path over it: every operation validates fully against the
//! loaded aggregate before mutating anything, so a returned error always means
//! "nothing changed".

pub mod ledger;
pub mod owner;

pub use ledger::{
    AddStockItem, CreateInvoice, InvoiceCreated, InvoiceDeleted, InvoiceLedger, QuantityAdjusted,
    RegisterCustomer, StatusChanged,
};
pub use owner::Owner;

//! Invoicing domain module.
//!
//! Invoices reference one customer and a list of stock items by id; line
//! items snapshot the item name and price at creation time. The status
//! lifecycle (pending / paid / cancelled) drives customer balance deltas
//! through a fixed transition table; see [`invoice::InvoiceStatus::balance_delta`].

pub mod invoice;

pub use invoice::{Invoice, InvoicePatch, InvoiceStatus, LineItem};

//! Inventory domain module.
//!
//! Stock items carry a single non-negative quantity. Quantities move through
//! invoice creation/deletion and through explicit adjustments
//! (set / add / subtract); no path may drive a quantity below zero.

pub mod item;

pub use item::{QuantityOperation, StockItem, StockItemPatch};

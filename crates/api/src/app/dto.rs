use serde::Deserialize;

use shoplite_customers::Customer;
use shoplite_inventory::{QuantityOperation, StockItem};
use shoplite_invoicing::{Invoice, InvoiceStatus};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterCustomerRequest {
    pub full_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub balance: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AddStockItemRequest {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    pub quantity: i64,
    /// Defaults to `set` when absent.
    #[serde(default)]
    pub operation: Option<QuantityOperation>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_id: String,
    pub invoice_number: String,
    pub items: Vec<LineItemRequest>,
    pub total_amount: i64,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn customer_to_json(customer: &Customer) -> serde_json::Value {
    serde_json::json!({
        "id": customer.id.to_string(),
        "full_name": customer.full_name,
        "phone_number": customer.phone_number,
        "balance": customer.balance,
        "created_at": customer.created_at.to_rfc3339(),
    })
}

pub fn stock_item_to_json(item: &StockItem) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.to_string(),
        "name": item.name,
        "description": item.description,
        "price": item.price,
        "quantity": item.quantity,
        "category": item.category,
        "sku": item.sku,
        "created_at": item.created_at.to_rfc3339(),
    })
}

pub fn invoice_to_json(invoice: &Invoice) -> serde_json::Value {
    serde_json::json!({
        "id": invoice.id.to_string(),
        "invoice_number": invoice.invoice_number,
        "customer_id": invoice.customer_id.to_string(),
        "items": invoice.items.iter().map(|l| serde_json::json!({
            "item_id": l.item_id.to_string(),
            "name": l.name,
            "quantity": l.quantity,
            "price": l.price,
        })).collect::<Vec<_>>(),
        "total_amount": invoice.total_amount,
        "status": invoice.status,
        "created_at": invoice.created_at.to_rfc3339(),
    })
}

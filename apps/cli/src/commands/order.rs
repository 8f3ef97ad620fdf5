//! # Order Commands
//!
//! The orders list with totals, and placing a new order.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders create --partner P --item A=3 --item B=2                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  partner exists?  ── no ──► NOT_FOUND                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderDraft::from_products(catalogue)                                  │
//! │  for each --item: set_selected(true), set_quantity(qty) → total        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  into_new_order()  ── nothing ordered ──► BUSINESS_LOGIC              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRepository::create()  (one transaction)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppError;
use partner_core::{CoreError, Money, NewOrderItem, Order, OrderDraft, OrderSummary};
use partner_db::Database;

/// One `--item PRODUCT_ID=QTY` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub product_id: String,
    pub quantity: i64,
}

/// Parses `PRODUCT_ID=QTY`; used as a clap value parser.
pub fn parse_item_arg(raw: &str) -> Result<ItemArg, String> {
    let (product_id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PRODUCT_ID=QTY, got '{}'", raw))?;

    let product_id = product_id.trim();
    if product_id.is_empty() {
        return Err(format!("missing product id in '{}'", raw));
    }

    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("quantity must be a whole number in '{}'", raw))?;

    Ok(ItemArg {
        product_id: product_id.to_string(),
        quantity,
    })
}

/// A freshly stored order.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedOrder {
    pub order: Order,
    pub items: Vec<NewOrderItem>,
    pub total: Money,
}

/// Every order with its partner name and total, newest first.
pub async fn list_orders(db: &Database) -> Result<Vec<OrderSummary>, AppError> {
    Ok(db.orders().list_summaries().await?)
}

/// Places an order for a partner.
///
/// Items repeating a product overwrite the earlier quantity. Lines with a
/// quantity of zero or less are dropped; if nothing remains the order is
/// refused.
pub async fn create_order(
    db: &Database,
    partner_id: &str,
    items: &[ItemArg],
) -> Result<CreatedOrder, AppError> {
    debug!(partner_id = %partner_id, items = items.len(), "create_order command");

    if db.partners().get_by_id(partner_id).await?.is_none() {
        return Err(CoreError::PartnerNotFound(partner_id.to_string()).into());
    }

    let products = db.products().list().await?;
    let mut draft = OrderDraft::from_products(&products);

    for item in items {
        draft.set_selected(&item.product_id, true)?;
        let running = draft.set_quantity(&item.product_id, item.quantity)?;
        debug!(product_id = %item.product_id, total = %running, "Draft updated");
    }

    let total = draft.total();
    let new_order = draft.into_new_order(partner_id)?;
    let order = db.orders().create(&new_order).await?;

    info!(order_id = %order.id, total = %total, "Order placed");

    Ok(CreatedOrder {
        order,
        items: new_order.items,
        total,
    })
}

pub fn render_orders(orders: &[OrderSummary], currency: &str) -> String {
    if orders.is_empty() {
        return "No orders yet\n".to_string();
    }

    let mut out = String::new();
    for summary in orders {
        out.push_str(&format!(
            "{}  {}  {:<11}  {:>12} {}  {}\n",
            summary.order.id,
            summary.order.order_date.format("%Y-%m-%d"),
            summary.order.status.as_str(),
            summary.total.to_string(),
            currency,
            summary.partner_name
        ));
    }
    out
}

pub fn render_created(created: &CreatedOrder, currency: &str) -> String {
    let mut out = format!("Order {} created\n", created.order.id);
    for item in &created.items {
        out.push_str(&format!(
            "  {} x {} @ {}\n",
            item.quantity, item.product_id, item.unit_price
        ));
    }
    out.push_str(&format!("Total: {} {}\n", created.total, currency));
    out
}

//! # Orders
//!
//! Order totals and the order draft behind the order-entry screen.
//!
//! ## Order Total
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       calculate_order_total                             │
//! │                                                                         │
//! │  lines: [{3, 10.005}, {0, 99.00}, {2, -5.00}]                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keep quantity > 0 AND unit_price >= 0   → [{3, 10.005}]                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sum quantity × unit_price               → 30.015                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round to 2 dp (half to even)            → 30.02                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clamp at 0.00                           → 30.02                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Draft
//! The draft replaces change notifications with explicit recomputation:
//! every mutation returns the fresh total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{NewOrder, NewOrderItem, OrderItem, Product};
use crate::validation::{validate_order_lines, validate_required_id};

// =============================================================================
// Order Total
// =============================================================================

/// A quantity and unit price pair contributing to an order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl OrderLineItem {
    pub fn new(quantity: i64, unit_price: Decimal) -> Self {
        OrderLineItem {
            quantity,
            unit_price,
        }
    }

    /// Whether this line counts towards a total.
    #[inline]
    pub fn contributes(&self) -> bool {
        self.quantity > 0 && !self.unit_price.is_sign_negative()
    }

    /// Unrounded `quantity × unit_price`.
    pub fn line_total(&self) -> Money {
        Money::from_decimal(self.unit_price).multiply_quantity(self.quantity)
    }
}

impl From<&OrderItem> for OrderLineItem {
    fn from(item: &OrderItem) -> Self {
        OrderLineItem::new(item.quantity, item.unit_price)
    }
}

/// Calculates the monetary total of an order.
///
/// Lines with a non-positive quantity or a negative unit price are skipped.
/// The sum is rounded to two decimals and never negative.
///
/// ## Example
/// ```rust
/// use partner_core::order::{calculate_order_total, OrderLineItem};
/// use rust_decimal::Decimal;
///
/// let total = calculate_order_total(&[OrderLineItem::new(3, Decimal::new(10005, 3))]);
/// assert_eq!(total.to_string(), "30.02");
/// ```
pub fn calculate_order_total<'a, I>(lines: I) -> Money
where
    I: IntoIterator<Item = &'a OrderLineItem>,
{
    let sum: Money = lines
        .into_iter()
        .filter(|line| line.contributes())
        .map(OrderLineItem::line_total)
        .sum();

    sum.round_to_cents().clamp_non_negative()
}

/// Same as [`calculate_order_total`] for an optional collection.
///
/// An absent collection totals `0.00`.
pub fn calculate_optional_order_total(lines: Option<&[OrderLineItem]>) -> Money {
    match lines {
        Some(lines) => calculate_order_total(lines),
        None => Money::zero(),
    }
}

/// Totals persisted order items.
pub fn calculate_items_total(items: &[OrderItem]) -> Money {
    let lines: Vec<OrderLineItem> = items.iter().map(OrderLineItem::from).collect();
    calculate_order_total(&lines)
}

// =============================================================================
// Order Draft
// =============================================================================

/// One catalogue product on the order-entry screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftLine {
    pub product_id: String,
    pub article: String,
    pub name: String,
    /// Minimum partner price at the time the draft was opened.
    pub unit_price: Decimal,
    pub quantity: i64,
    pub selected: bool,
}

impl DraftLine {
    fn from_product(product: &Product) -> Self {
        DraftLine {
            product_id: product.id.clone(),
            article: product.article.clone(),
            name: product.name.clone(),
            unit_price: product.min_partner_price,
            quantity: 0,
            selected: false,
        }
    }

    /// Whether the line will be saved with the order.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.selected && self.quantity > 0
    }
}

/// An order being assembled from the product catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    lines: Vec<DraftLine>,
}

impl OrderDraft {
    /// Opens a draft with every product unselected at quantity zero.
    pub fn from_products(products: &[Product]) -> Self {
        OrderDraft {
            lines: products.iter().map(DraftLine::from_product).collect(),
        }
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Sets a line's quantity and returns the recomputed total.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<Money> {
        self.line_mut(product_id)?.quantity = quantity;
        Ok(self.total())
    }

    /// Selects or deselects a line and returns the recomputed total.
    pub fn set_selected(&mut self, product_id: &str, selected: bool) -> CoreResult<Money> {
        self.line_mut(product_id)?.selected = selected;
        Ok(self.total())
    }

    /// Total of selected lines with a positive quantity.
    pub fn total(&self) -> Money {
        let lines: Vec<OrderLineItem> = self
            .selected_lines()
            .map(|line| OrderLineItem::new(line.quantity, line.unit_price))
            .collect();
        calculate_order_total(&lines)
    }

    /// Lines that will be saved with the order.
    pub fn selected_lines(&self) -> impl Iterator<Item = &DraftLine> {
        self.lines.iter().filter(|line| line.is_ordered())
    }

    /// Validates the draft and turns it into an order ready to persist.
    ///
    /// ## Errors
    /// - `Validation` when no partner is chosen
    /// - `EmptyOrder` when no selected line has a positive quantity
    pub fn into_new_order(self, partner_id: &str) -> CoreResult<NewOrder> {
        validate_required_id("partner", partner_id)?;

        let quantities: Vec<i64> = self
            .lines
            .iter()
            .filter(|line| line.selected)
            .map(|line| line.quantity)
            .collect();
        if validate_order_lines(&quantities).is_err() {
            return Err(CoreError::EmptyOrder);
        }

        let items = self
            .lines
            .into_iter()
            .filter(DraftLine::is_ordered)
            .map(|line| NewOrderItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Ok(NewOrder {
            partner_id: partner_id.trim().to_string(),
            items,
        })
    }

    fn line_mut(&mut self, product_id: &str) -> CoreResult<&mut DraftLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

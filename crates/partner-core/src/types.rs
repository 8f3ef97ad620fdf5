//! # Domain Types
//!
//! Core domain types used throughout Partner Orders.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PartnerType    │◄──│    Partner      │◄──│     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │   │  inn (10 digit) │   │  status         │       │
//! │  └─────────────────┘   │  rating 0..=10  │   │  order_date     │       │
//! │                        └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ 1..n           │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────▼────────┐       │
//! │  │  ProductType    │◄──│    Product      │◄──│   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  coefficient    │   │  article        │   │  quantity       │       │
//! │  └─────────────────┘   │  min price      │   │  unit_price     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │  ┌─────────────────┐                                                    │
//! │  │  MaterialType   │   (looked up by the material calculator)          │
//! │  │  defect %       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is keyed by a UUID v4 string. Prices, coefficients and
//! defect percentages are `Decimal`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Partners
// =============================================================================

/// Kind of partner (wholesale, retail, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerType {
    pub id: String,
    pub name: String,
}

/// A company that places orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub partner_type_id: String,
    pub name: String,
    pub director: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub legal_address: Option<String>,
    /// Taxpayer number, exactly 10 digits.
    pub inn: String,
    /// 0..=10
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

/// Validated input for registering a partner.
///
/// Built by [`crate::validation::validate_new_partner`], never by hand from
/// raw form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPartner {
    pub partner_type_id: String,
    pub name: String,
    pub director: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub legal_address: Option<String>,
    pub inn: String,
    pub rating: i32,
}

// =============================================================================
// Catalogue
// =============================================================================

/// Product category carrying the material consumption coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: String,
    pub name: String,
    pub coefficient: Decimal,
}

/// Raw material category carrying its defect percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialType {
    pub id: String,
    pub name: String,
    /// Percent, e.g. `10` means 10% of material is lost to defects.
    pub defect_percentage: Decimal,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub product_type_id: String,
    /// Business identifier printed on documents.
    pub article: String,
    pub name: String,
    /// Lowest price a partner may be charged; becomes the order unit price.
    pub min_partner_price: Decimal,
}

impl Product {
    #[inline]
    pub fn min_price(&self) -> Money {
        Money::from_decimal(self.min_partner_price)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Just placed, nothing done yet.
    #[default]
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown order status '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// An order header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub partner_id: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub prepayment_received: bool,
}

/// A product line of an order.
///
/// `unit_price` is frozen from the product's minimum partner price when the
/// order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

/// An order with its partner name, items and computed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order: Order,
    pub partner_name: String,
    pub items: Vec<OrderItem>,
    pub total: Money,
}

/// Line of an order about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

/// An order about to be persisted. Status and prepayment are assigned on
/// insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub partner_id: String,
    pub items: Vec<NewOrderItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_status_default_is_new() {
        assert_eq!(OrderStatus::default(), OrderStatus::New);
    }

    #[test]
    fn test_order_status_text_form() {
        for status in [
            OrderStatus::New,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_product_min_price() {
        let product = Product {
            id: "p".to_string(),
            product_type_id: "t".to_string(),
            article: "A-1".to_string(),
            name: "Panel".to_string(),
            min_partner_price: dec!(1250.5),
        };
        assert_eq!(product.min_price().to_string(), "1250.50");
    }
}

//! # Repository Module
//!
//! Database repository implementations for Partner Orders.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.orders().list_summaries()                                  │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── SELECT ... → OrderRecord  (sqlx::FromRow, raw column types)       │
//! │  └── OrderRecord::into_domain() → Order (Decimal, OrderStatus)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are checked at runtime (`sqlx::query_as::<_, Record>`), so the
//! workspace builds without a live database.
//!
//! ## Available Repositories
//!
//! - [`partner::PartnerRepository`] - Partners and partner types
//! - [`product::ProductRepository`] - Catalogue products
//! - [`catalog::CatalogRepository`] - Product types and material types
//! - [`order::OrderRepository`] - Orders and order items

use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

pub mod catalog;
pub mod order;
pub mod partner;
pub mod product;

/// Generates a new entity ID (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a decimal stored as TEXT.
pub(crate) fn parse_decimal(column: &str, raw: &str) -> DbResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| DbError::invalid_value(column, raw))
}

/// Formats a decimal for a TEXT column.
///
/// Trailing zeros are dropped so equal amounts store identically.
pub(crate) fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

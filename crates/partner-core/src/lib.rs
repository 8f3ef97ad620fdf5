//! # partner-core: Pure Business Logic for Partner Orders
//!
//! Everything the partner ordering system decides lives here as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Partner Orders Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      CLI (apps/cli)                             │   │
//! │  │    orders list ─ orders create ─ partners add ─ material calc   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ partner-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ material  │  │   order   │  │   types   │  │ validation│  │   │
//! │  │   │ required  │  │  totals   │  │  Partner  │  │  INN,     │  │   │
//! │  │   │ material  │  │  draft    │  │  Order    │  │  rating   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 partner-db (Database Layer)                     │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`material`] - Raw material requirement calculator
//! - [`order`] - Order totals and the order draft
//! - [`money`] - Decimal-backed `Money`
//! - [`types`] - Domain entities (Partner, Product, Order, ...)
//! - [`validation`] - Form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use partner_core::material::{calculate_required_material, MaterialRequirement};
//! use rust_decimal::Decimal;
//!
//! let outcome = calculate_required_material(
//!     Some(Decimal::from(2)),  // product type coefficient
//!     Some(Decimal::from(10)), // material defect, percent
//!     100,                     // required
//!     40,                      // in stock
//!     1.5,
//!     2.0,
//! );
//! assert_eq!(outcome, MaterialRequirement::Required(396));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod material;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use material::{
    calculate_required_material, InvalidMaterialInput, MaterialBreakdown, MaterialRequest,
    MaterialRequirement,
};
pub use money::Money;
pub use order::{calculate_order_total, OrderDraft, OrderLineItem};
pub use types::*;

//! # Command Handlers
//!
//! One module per window of the ordering workflow. Handlers take the
//! [`Database`](partner_db::Database) and plain arguments, return
//! `Result<T, AppError>` and never print; rendering lives next to each
//! handler as a `render_*` function.
//!
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here
//! ├── order.rs     ◄─── orders list / orders create
//! ├── partner.rs   ◄─── partners add / list / types
//! ├── product.rs   ◄─── products list
//! └── material.rs  ◄─── material calc / types
//! ```

pub mod material;
pub mod order;
pub mod partner;
pub mod product;

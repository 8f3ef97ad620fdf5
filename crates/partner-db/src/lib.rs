//! # partner-db: Database Layer for Partner Orders
//!
//! SQLite storage for partners, the product catalogue and orders, built on
//! async sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Partner Orders Data Flow                            │
//! │                                                                         │
//! │  CLI command (orders list)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    partner-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ PartnerRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_initial  │  │   │
//! │  │   │               │    │ CatalogRepo   │    │ _schema.sql  │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file in the platform data directory (or --db)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use partner_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("partner_orders.db")).await?;
//! let summaries = db.orders().list_summaries().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::order::OrderRepository;
pub use repository::partner::PartnerRepository;
pub use repository::product::{NewProduct, ProductRepository};

//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Startup                                   │
//! │                                                                         │
//! │  AppConfig (env / --db)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path).max_connections(n)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       ├── open / create file   (WAL, synchronous=NORMAL, FKs on)       │
//! │       ├── build SqlitePool                                             │
//! │       └── run embedded migrations                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.partners() / db.products() / db.catalog() / db.orders()            │
//! │  (each repository holds a cheap clone of the pool)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::catalog::CatalogRepository;
use crate::repository::order::OrderRepository;
use crate::repository::partner::PartnerRepository;
use crate::repository::product::ProductRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the orders database lives and how many connections the CLI keeps.
///
/// A single CLI invocation runs one command at a time, so the pool stays
/// small; the file is created with the schema on first use.
///
/// ```rust
/// use partner_db::DbConfig;
///
/// let config = DbConfig::new("./partner_orders.db").max_connections(2);
/// assert_eq!(config.max_connections, 2);
/// assert!(!config.is_in_memory());
/// assert!(DbConfig::in_memory().is_in_memory());
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
    /// `PARTNER_ORDERS_MAX_CONNECTIONS` ends up here (5 unless set)
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a command waits for a free connection
    pub acquire_timeout: Duration,
    /// Idle connections are dropped after this long
    pub idle_timeout: Duration,
    /// Apply `migrations/sqlite` when the pool opens
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed database with five connections, a 30 s acquire timeout
    /// and migrations on.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Skips the schema step, for tooling that inspects a database as is.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Throwaway database for repository and command tests. Every pool
    /// gets its own empty schema.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            // The data disappears with the last connection
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database, builds the pool and (by default) migrates.
    ///
    /// ## Errors
    /// * `ConnectionFailed` - Bad path or the file cannot be created
    /// * `MigrationFailed` - An embedded migration did not apply
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let mut connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .synchronous(SqliteSynchronous::Normal)
            // Off by default in SQLite
            .foreign_keys(true)
            .create_if_missing(true);

        if !config.is_in_memory() {
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        }

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Raw pool access for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn partners(&self) -> PartnerRepository {
        PartnerRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the product type / material type repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let summaries = db.orders().list_summaries().await?;
    /// ```
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Closes the pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Whether the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_closed_pool_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.run_migrations().await.unwrap();
        assert_eq!(db.partners().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_migrations_can_be_skipped() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        assert!(db.health_check().await);
        assert!(db.partners().count().await.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/partner_orders.db")
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(3))
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}

//! # Database Migrations
//!
//! SQL files under `migrations/sqlite/` at the workspace root are embedded
//! into the binary at compile time and applied in filename order on startup.
//! Applied versions are tracked in `_sqlx_migrations`.
//!
//! New schema changes go into a new `NNN_description.sql` file. Existing
//! migrations are never edited: their checksums are recorded.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(
        embedded = MIGRATOR.migrations.len(),
        "Checking for pending migrations"
    );

    MIGRATOR.run(pool).await?;

    info!("All migrations applied");
    Ok(())
}

/// Returns `(embedded, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(pool)
        .await?;

    Ok((total, usize::try_from(applied).unwrap_or(0)))
}

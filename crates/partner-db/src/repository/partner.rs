//! # Partner Repository
//!
//! Database operations for partners and partner types.
//!
//! ## Registration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  partners add --type T --name N --inn 7701234567 --rating 7            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_new_partner()   (partner-core: trims, INN, rating)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PartnerRepository::insert()  ← THIS FILE                              │
//! │       │   id = UUID v4, created_at = now                               │
//! │       ▼                                                                 │
//! │  partners table (FK → partner_types, CHECK inn/rating)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::DbResult;
use partner_core::{NewPartner, Partner, PartnerType};

#[derive(Debug, sqlx::FromRow)]
struct PartnerRecord {
    id: String,
    partner_type_id: String,
    name: String,
    director: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    legal_address: Option<String>,
    inn: String,
    rating: i32,
    created_at: DateTime<Utc>,
}

impl From<PartnerRecord> for Partner {
    fn from(r: PartnerRecord) -> Self {
        Partner {
            id: r.id,
            partner_type_id: r.partner_type_id,
            name: r.name,
            director: r.director,
            email: r.email,
            phone: r.phone,
            legal_address: r.legal_address,
            inn: r.inn,
            rating: r.rating,
            created_at: r.created_at,
        }
    }
}

const PARTNER_COLUMNS: &str = r#"
    id, partner_type_id, name, director, email, phone,
    legal_address, inn, rating, created_at
"#;

/// Repository for partner database operations.
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    pool: SqlitePool,
}

impl PartnerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PartnerRepository { pool }
    }

    /// Lists all partners by name.
    pub async fn list(&self) -> DbResult<Vec<Partner>> {
        let sql = format!("SELECT {} FROM partners ORDER BY name", PARTNER_COLUMNS);
        let records = sqlx::query_as::<_, PartnerRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "Listed partners");
        Ok(records.into_iter().map(Partner::from).collect())
    }

    /// Gets a partner by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Partner))` - Partner found
    /// * `Ok(None)` - Partner not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Partner>> {
        let sql = format!("SELECT {} FROM partners WHERE id = ?1", PARTNER_COLUMNS);
        let record = sqlx::query_as::<_, PartnerRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Partner::from))
    }

    /// Inserts a validated partner.
    ///
    /// ## Returns
    /// * `Ok(Partner)` - Stored partner with generated id and timestamp
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown partner type
    /// * `Err(DbError::CheckViolation)` - INN or rating out of shape
    pub async fn insert(&self, new: &NewPartner) -> DbResult<Partner> {
        debug!(name = %new.name, inn = %new.inn, "Inserting partner");

        let partner = Partner {
            id: generate_id(),
            partner_type_id: new.partner_type_id.clone(),
            name: new.name.clone(),
            director: new.director.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            legal_address: new.legal_address.clone(),
            inn: new.inn.clone(),
            rating: new.rating,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO partners (
                id, partner_type_id, name, director, email, phone,
                legal_address, inn, rating, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&partner.id)
        .bind(&partner.partner_type_id)
        .bind(&partner.name)
        .bind(&partner.director)
        .bind(&partner.email)
        .bind(&partner.phone)
        .bind(&partner.legal_address)
        .bind(&partner.inn)
        .bind(partner.rating)
        .bind(partner.created_at)
        .execute(&self.pool)
        .await?;

        Ok(partner)
    }

    /// Counts partners (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM partners")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Partner Types
    // =========================================================================

    pub async fn list_types(&self) -> DbResult<Vec<PartnerType>> {
        let types = sqlx::query_as::<_, (String, String)>(
            "SELECT id, name FROM partner_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types
            .into_iter()
            .map(|(id, name)| PartnerType { id, name })
            .collect())
    }

    pub async fn insert_type(&self, name: &str) -> DbResult<PartnerType> {
        debug!(name = %name, "Inserting partner type");

        let partner_type = PartnerType {
            id: generate_id(),
            name: name.trim().to_string(),
        };

        sqlx::query("INSERT INTO partner_types (id, name) VALUES (?1, ?2)")
            .bind(&partner_type.id)
            .bind(&partner_type.name)
            .execute(&self.pool)
            .await?;

        Ok(partner_type)
    }
}

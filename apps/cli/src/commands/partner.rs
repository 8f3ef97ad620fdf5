//! # Partner Commands
//!
//! Registering partners and listing them.
//!
//! ```text
//! partners add --type T --name N --inn 1234567890 --rating 7
//!       │
//!       ▼
//! validate_new_partner()   type → name → inn → rating → email
//!       │                  first failure is reported
//!       ▼
//! PartnerRepository::insert()
//! ```

use tracing::{debug, info};

use crate::error::AppError;
use partner_core::validation::validate_new_partner;
use partner_core::{NewPartner, Partner, PartnerType};
use partner_db::Database;

/// Registers a new partner.
pub async fn add_partner(db: &Database, input: NewPartner) -> Result<Partner, AppError> {
    debug!(name = %input.name, "add_partner command");

    let partner = validate_new_partner(&input)?;
    let created = db.partners().insert(&partner).await?;

    info!(partner_id = %created.id, "Partner registered");
    Ok(created)
}

pub async fn list_partners(db: &Database) -> Result<Vec<Partner>, AppError> {
    Ok(db.partners().list().await?)
}

pub async fn list_partner_types(db: &Database) -> Result<Vec<PartnerType>, AppError> {
    Ok(db.partners().list_types().await?)
}

pub fn render_partners(partners: &[Partner]) -> String {
    if partners.is_empty() {
        return "No partners registered\n".to_string();
    }

    let mut out = String::new();
    for p in partners {
        out.push_str(&format!(
            "{}  {}  INN {}  rating {}\n",
            p.id, p.name, p.inn, p.rating
        ));
        if let Some(director) = &p.director {
            out.push_str(&format!("    director: {}\n", director));
        }
    }
    out
}

pub fn render_partner_types(types: &[PartnerType]) -> String {
    types
        .iter()
        .map(|t| format!("{}  {}\n", t.id, t.name))
        .collect()
}

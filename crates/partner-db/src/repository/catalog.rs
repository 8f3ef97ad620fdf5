//! # Catalog Repository
//!
//! Product types and material types: the two lookup tables the material
//! calculator resolves before computing.

use sqlx::SqlitePool;
use tracing::debug;

use super::{format_decimal, generate_id, parse_decimal};
use crate::error::DbResult;
use partner_core::{MaterialType, ProductType};
use rust_decimal::Decimal;

#[derive(Debug, sqlx::FromRow)]
struct ProductTypeRecord {
    id: String,
    name: String,
    coefficient: String,
}

impl ProductTypeRecord {
    fn into_domain(self) -> DbResult<ProductType> {
        Ok(ProductType {
            coefficient: parse_decimal("product_types.coefficient", &self.coefficient)?,
            id: self.id,
            name: self.name,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MaterialTypeRecord {
    id: String,
    name: String,
    defect_percentage: String,
}

impl MaterialTypeRecord {
    fn into_domain(self) -> DbResult<MaterialType> {
        Ok(MaterialType {
            defect_percentage: parse_decimal(
                "material_types.defect_percentage",
                &self.defect_percentage,
            )?,
            id: self.id,
            name: self.name,
        })
    }
}

/// Repository for the product type and material type lookups.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Product Types
    // =========================================================================

    pub async fn list_product_types(&self) -> DbResult<Vec<ProductType>> {
        let records = sqlx::query_as::<_, ProductTypeRecord>(
            "SELECT id, name, coefficient FROM product_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(ProductTypeRecord::into_domain).collect()
    }

    /// Gets a product type by ID.
    ///
    /// ## Returns
    /// * `Ok(None)` - No such type; the calculator treats this as invalid input
    pub async fn get_product_type(&self, id: &str) -> DbResult<Option<ProductType>> {
        debug!(id = %id, "Fetching product type");

        sqlx::query_as::<_, ProductTypeRecord>(
            "SELECT id, name, coefficient FROM product_types WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(ProductTypeRecord::into_domain)
        .transpose()
    }

    pub async fn insert_product_type(
        &self,
        name: &str,
        coefficient: Decimal,
    ) -> DbResult<ProductType> {
        debug!(name = %name, coefficient = %coefficient, "Inserting product type");

        let product_type = ProductType {
            id: generate_id(),
            name: name.trim().to_string(),
            coefficient,
        };

        sqlx::query("INSERT INTO product_types (id, name, coefficient) VALUES (?1, ?2, ?3)")
            .bind(&product_type.id)
            .bind(&product_type.name)
            .bind(format_decimal(product_type.coefficient))
            .execute(&self.pool)
            .await?;

        Ok(product_type)
    }

    // =========================================================================
    // Material Types
    // =========================================================================

    pub async fn list_material_types(&self) -> DbResult<Vec<MaterialType>> {
        let records = sqlx::query_as::<_, MaterialTypeRecord>(
            "SELECT id, name, defect_percentage FROM material_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(MaterialTypeRecord::into_domain).collect()
    }

    pub async fn get_material_type(&self, id: &str) -> DbResult<Option<MaterialType>> {
        debug!(id = %id, "Fetching material type");

        sqlx::query_as::<_, MaterialTypeRecord>(
            "SELECT id, name, defect_percentage FROM material_types WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(MaterialTypeRecord::into_domain)
        .transpose()
    }

    pub async fn insert_material_type(
        &self,
        name: &str,
        defect_percentage: Decimal,
    ) -> DbResult<MaterialType> {
        debug!(name = %name, defect = %defect_percentage, "Inserting material type");

        let material_type = MaterialType {
            id: generate_id(),
            name: name.trim().to_string(),
            defect_percentage,
        };

        sqlx::query("INSERT INTO material_types (id, name, defect_percentage) VALUES (?1, ?2, ?3)")
            .bind(&material_type.id)
            .bind(&material_type.name)
            .bind(format_decimal(material_type.defect_percentage))
            .execute(&self.pool)
            .await?;

        Ok(material_type)
    }
}

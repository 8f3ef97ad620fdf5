//! # Product Repository
//!
//! Catalogue products. Each product belongs to a product type and carries
//! the minimum partner price that becomes the unit price of new orders.

use sqlx::SqlitePool;
use tracing::debug;

use super::{format_decimal, generate_id, parse_decimal};
use crate::error::DbResult;
use partner_core::Product;
use rust_decimal::Decimal;

#[derive(Debug, sqlx::FromRow)]
struct ProductRecord {
    id: String,
    product_type_id: String,
    article: String,
    name: String,
    min_partner_price: String,
}

impl ProductRecord {
    fn into_domain(self) -> DbResult<Product> {
        Ok(Product {
            min_partner_price: parse_decimal("products.min_partner_price", &self.min_partner_price)?,
            id: self.id,
            product_type_id: self.product_type_id,
            article: self.article,
            name: self.name,
        })
    }
}

/// Input for a new catalogue product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_type_id: String,
    pub article: String,
    pub name: String,
    pub min_partner_price: Decimal,
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalogue by name.
    ///
    /// ## Usage
    /// Backs `products list` and the order draft, which offers every product.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let records = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, product_type_id, article, name, min_partner_price
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Listed products");
        records.into_iter().map(ProductRecord::into_domain).collect()
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, product_type_id, article, name, min_partner_price
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(ProductRecord::into_domain)
        .transpose()
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Article already exists
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown product type
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        debug!(article = %new.article, "Inserting product");

        let product = Product {
            id: generate_id(),
            product_type_id: new.product_type_id.clone(),
            article: new.article.trim().to_string(),
            name: new.name.trim().to_string(),
            min_partner_price: new.min_partner_price,
        };

        sqlx::query(
            r#"
            INSERT INTO products (id, product_type_id, article, name, min_partner_price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.id)
        .bind(&product.product_type_id)
        .bind(&product.article)
        .bind(&product.name)
        .bind(format_decimal(product.min_partner_price))
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

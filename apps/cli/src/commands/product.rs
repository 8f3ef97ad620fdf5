//! Product catalogue listing.

use crate::error::AppError;
use partner_core::Product;
use partner_db::Database;

pub async fn list_products(db: &Database) -> Result<Vec<Product>, AppError> {
    Ok(db.products().list().await?)
}

/// One line per product: id, article, minimum partner price and name.
pub fn render_products(products: &[Product], currency: &str) -> String {
    if products.is_empty() {
        return "Catalogue is empty\n".to_string();
    }

    products
        .iter()
        .map(|p| {
            format!(
                "{}  {:<8} {:>12} {}  {}\n",
                p.id,
                p.article,
                p.min_price().to_string(),
                currency,
                p.name
            )
        })
        .collect()
}

//! # Order Repository
//!
//! Database operations for orders and their items.
//!
//! ## Order Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Creation                                       │
//! │                                                                         │
//! │  OrderDraft::into_new_order(partner_id)   (partner-core)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRepository::create()  ← THIS FILE                                │
//! │       │                                                                 │
//! │       ├── BEGIN                                                        │
//! │       ├── INSERT orders      status = 'new', prepayment = 0            │
//! │       ├── INSERT order_items (one per line, unit price frozen)         │
//! │       └── COMMIT             (nothing is stored on any failure)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never stored. They are computed on read with
//! [`partner_core::order::calculate_items_total`].

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

use super::{format_decimal, generate_id, parse_decimal};
use crate::error::{DbError, DbResult};
use partner_core::order::calculate_items_total;
use partner_core::{NewOrder, Order, OrderItem, OrderStatus, OrderSummary};

#[derive(Debug, sqlx::FromRow)]
struct OrderRecord {
    id: String,
    partner_id: String,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    prepayment_received: bool,
}

impl From<OrderRecord> for Order {
    fn from(r: OrderRecord) -> Self {
        Order {
            id: r.id,
            partner_id: r.partner_id,
            order_date: r.order_date,
            status: r.status,
            prepayment_received: r.prepayment_received,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderWithPartnerRecord {
    #[sqlx(flatten)]
    order: OrderRecord,
    partner_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRecord {
    id: String,
    order_id: String,
    product_id: String,
    quantity: i64,
    unit_price: String,
}

impl OrderItemRecord {
    fn into_domain(self) -> DbResult<OrderItem> {
        Ok(OrderItem {
            unit_price: parse_decimal("order_items.unit_price", &self.unit_price)?,
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            quantity: self.quantity,
        })
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Stores an order and its items in one transaction.
    ///
    /// The order starts as [`OrderStatus::New`] without prepayment.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The stored header
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown partner or product
    pub async fn create(&self, new: &NewOrder) -> DbResult<Order> {
        debug!(partner_id = %new.partner_id, items = new.items.len(), "Creating order");

        let order = Order {
            id: generate_id(),
            partner_id: new.partner_id.clone(),
            order_date: Utc::now(),
            status: OrderStatus::New,
            prepayment_received: false,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, partner_id, order_date, status, prepayment_received)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&order.id)
        .bind(&order.partner_id)
        .bind(order.order_date)
        .bind(order.status)
        .bind(order.prepayment_received)
        .execute(&mut *tx)
        .await?;

        for item in &new.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, quantity, unit_price)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(generate_id())
            .bind(&order.id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(format_decimal(item.unit_price))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(order_id = %order.id, items = new.items.len(), "Order created");
        Ok(order)
    }

    /// Gets an order header by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let record = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, partner_id, order_date, status, prepayment_received
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Order::from))
    }

    /// Lists order headers, newest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let records = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, partner_id, order_date, status, prepayment_received
            FROM orders
            ORDER BY order_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Order::from).collect())
    }

    /// Gets the items of one order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let records = sqlx::query_as::<_, OrderItemRecord>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(OrderItemRecord::into_domain).collect()
    }

    /// Lists every order with its partner name, items and computed total.
    ///
    /// ## Query Plan
    /// Two queries regardless of order count: headers joined to partners,
    /// then all items grouped in memory by `order_id`.
    pub async fn list_summaries(&self) -> DbResult<Vec<OrderSummary>> {
        let headers = sqlx::query_as::<_, OrderWithPartnerRecord>(
            r#"
            SELECT
                o.id, o.partner_id, o.order_date, o.status, o.prepayment_received,
                p.name AS partner_name
            FROM orders o
            INNER JOIN partners p ON p.id = o.partner_id
            ORDER BY o.order_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let item_records = sqlx::query_as::<_, OrderItemRecord>(
            "SELECT id, order_id, product_id, quantity, unit_price FROM order_items ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for record in item_records {
            let item = record.into_domain()?;
            items_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        let summaries: Vec<OrderSummary> = headers
            .into_iter()
            .map(|row| {
                let order = Order::from(row.order);
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                let total = calculate_items_total(&items);
                OrderSummary {
                    order,
                    partner_name: row.partner_name,
                    items,
                    total,
                }
            })
            .collect();

        debug!(count = summaries.len(), "Listed order summaries");
        Ok(summaries)
    }

    /// Counts orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::product::NewProduct;
    use crate::{Database, DbConfig, DbError};
    use partner_core::{NewOrder, NewOrderItem, NewPartner, OrderStatus, Product};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct Fixture {
        db: Database,
        partner_id: String,
        products: Vec<Product>,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let partner_type = db.partners().insert_type("ООО").await.unwrap();
        let partner = db
            .partners()
            .insert(&NewPartner {
                partner_type_id: partner_type.id,
                name: "База Строитель".to_string(),
                director: None,
                email: None,
                phone: None,
                legal_address: None,
                inn: "2222455179".to_string(),
                rating: 7,
            })
            .await
            .unwrap();
        let product_type = db.catalog().insert_product_type("Ламинат", dec!(2.35)).await.unwrap();

        let mut products = Vec::new();
        for (article, price) in [("100", dec!(10.005)), ("200", dec!(99.99))] {
            let product = db
                .products()
                .insert(&NewProduct {
                    product_type_id: product_type.id.clone(),
                    article: article.to_string(),
                    name: format!("Товар {}", article),
                    min_partner_price: price,
                })
                .await
                .unwrap();
            products.push(product);
        }

        Fixture {
            db,
            partner_id: partner.id,
            products,
        }
    }

    fn line(product: &Product, quantity: i64) -> NewOrderItem {
        NewOrderItem {
            product_id: product.id.clone(),
            quantity,
            unit_price: product.min_partner_price,
        }
    }

    #[tokio::test]
    async fn test_create_sets_initial_state() {
        let f = fixture().await;
        let order = f
            .db
            .orders()
            .create(&NewOrder {
                partner_id: f.partner_id.clone(),
                items: vec![line(&f.products[0], 3)],
            })
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::New);
        assert!(!order.prepayment_received);

        let stored = f.db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::New);
        assert_eq!(stored.partner_id, f.partner_id);

        let items = f.db.orders().get_items(&order.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].unit_price, dec!(10.005));
    }

    #[tokio::test]
    async fn test_summaries_compute_totals() {
        let f = fixture().await;
        f.db.orders()
            .create(&NewOrder {
                partner_id: f.partner_id.clone(),
                items: vec![line(&f.products[0], 3), line(&f.products[1], 1)],
            })
            .await
            .unwrap();

        let summaries = f.db.orders().list_summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.partner_name, "База Строитель");
        assert_eq!(summary.items.len(), 2);
        // 3 × 10.005 + 99.99 = 130.005 → 130.00 (half to even)
        assert_eq!(summary.total.amount(), dec!(130.00));
    }

    #[tokio::test]
    async fn test_order_without_items_totals_zero() {
        let f = fixture().await;
        f.db.orders()
            .create(&NewOrder {
                partner_id: f.partner_id.clone(),
                items: vec![],
            })
            .await
            .unwrap();

        let summaries = f.db.orders().list_summaries().await.unwrap();
        assert_eq!(summaries[0].total.amount(), Decimal::ZERO);
        assert!(summaries[0].items.is_empty());
    }

    #[tokio::test]
    async fn test_failed_item_rolls_back_order() {
        let f = fixture().await;
        let err = f
            .db
            .orders()
            .create(&NewOrder {
                partner_id: f.partner_id.clone(),
                items: vec![
                    line(&f.products[0], 1),
                    NewOrderItem {
                        product_id: "no-such-product".to_string(),
                        quantity: 1,
                        unit_price: dec!(1),
                    },
                ],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(f.db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_partner_is_rejected() {
        let f = fixture().await;
        let err = f
            .db
            .orders()
            .create(&NewOrder {
                partner_id: "ghost".to_string(),
                items: vec![line(&f.products[0], 1)],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_and_missing() {
        let f = fixture().await;
        assert!(f.db.orders().list().await.unwrap().is_empty());
        assert!(f.db.orders().get_by_id("missing").await.unwrap().is_none());
    }
}

//! # Partner Orders CLI Library
//!
//! Wires argument parsing, configuration, logging and the database into the
//! command handlers. The binary in `main.rs` only parses and reports errors.
//!
//! ## Module Organization
//! ```text
//! partner_cli/
//! ├── lib.rs          ◄─── You are here (tracing, database, dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── Environment configuration
//! ├── error.rs        ◄─── AppError for commands
//! └── commands/
//!     ├── order.rs    ◄─── orders list / create
//!     ├── partner.rs  ◄─── partners add / list / types
//!     ├── product.rs  ◄─── products list
//!     └── material.rs ◄─── material calc / types
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()      RUST_LOG or "info,partner=debug,sqlx=warn"     │
//! │  2. AppConfig::load()   env vars, then --db override                   │
//! │  3. open_database()     create data dir, connect, migrate              │
//! │  4. execute()           dispatch to a handler, render text or JSON     │
//! │  5. close pool                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, MaterialCommand, OrdersCommand, PartnersCommand, ProductsCommand};
use commands::material::MaterialCalcInput;
use commands::{material, order, partner, product};
use config::AppConfig;
use error::AppError;
use partner_core::NewPartner;
use partner_db::{Database, DbConfig};

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so that stdout stays parseable with `--json`.
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=partner=trace` - Trace the partner crates only
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,partner=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the configured database, creating its directory when needed.
pub async fn open_database(config: &AppConfig) -> Result<Database, AppError> {
    if let Some(dir) = config.database_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::internal(format!("Cannot create {}: {}", dir.display(), e))
            })?;
        }
    }

    info!(path = %config.database_path.display(), "Opening database");
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.max_connections),
    )
    .await?;
    Ok(db)
}

/// Runs one parsed command line and prints its output.
pub async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let db = open_database(&config).await?;
    let result = execute(&db, cli.command, cli.json, &config.currency_code).await;
    db.close().await;

    print!("{}", result?);
    Ok(())
}

/// Dispatches a command and returns what should be printed.
pub async fn execute(
    db: &Database,
    command: Command,
    json: bool,
    currency: &str,
) -> Result<String, AppError> {
    match command {
        Command::Orders(OrdersCommand::List) => {
            let orders = order::list_orders(db).await?;
            output(json, &orders, || order::render_orders(&orders, currency))
        }
        Command::Orders(OrdersCommand::Create { partner, items }) => {
            let created = order::create_order(db, &partner, &items).await?;
            output(json, &created, || order::render_created(&created, currency))
        }
        Command::Partners(PartnersCommand::Add(args)) => {
            let input = NewPartner {
                partner_type_id: args.partner_type,
                name: args.name,
                director: args.director,
                email: args.email,
                phone: args.phone,
                legal_address: args.address,
                inn: args.inn,
                rating: args.rating,
            };
            let created = partner::add_partner(db, input).await?;
            output(json, &created, || format!("Partner {} registered\n", created.id))
        }
        Command::Partners(PartnersCommand::List) => {
            let partners = partner::list_partners(db).await?;
            output(json, &partners, || partner::render_partners(&partners))
        }
        Command::Partners(PartnersCommand::Types) => {
            let types = partner::list_partner_types(db).await?;
            output(json, &types, || partner::render_partner_types(&types))
        }
        Command::Products(ProductsCommand::List) => {
            let products = product::list_products(db).await?;
            output(json, &products, || product::render_products(&products, currency))
        }
        Command::Material(MaterialCommand::Calc(args)) => {
            let input = MaterialCalcInput {
                product_type_id: args.product_type,
                material_type_id: args.material_type,
                required_quantity: args.required,
                stock_quantity: args.stock,
                parameter1: args.param1,
                parameter2: args.param2,
            };
            let report = material::calculate_material(db, &input).await?;
            output(json, &report, || material::render_report(&report))
        }
        Command::Material(MaterialCommand::Types) => {
            let types = material::list_types(db).await?;
            output(json, &types, || material::render_types(&types))
        }
    }
}

fn output<T, F>(json: bool, value: &T, text: F) -> Result<String, AppError>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        let mut rendered = serde_json::to_string_pretty(value)?;
        rendered.push('\n');
        Ok(rendered)
    } else {
        Ok(text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal_macros::dec;

    async fn run_line(db: &Database, args: &[&str]) -> Result<String, AppError> {
        let mut argv = vec!["partner-orders"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        execute(db, cli.command, cli.json, "RUB").await
    }

    #[tokio::test]
    async fn test_partner_then_order_flow() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let partner_type = db.partners().insert_type("ПАО").await.unwrap();
        let pt = db.catalog().insert_product_type("Ламинат", dec!(2.35)).await.unwrap();
        let product = db
            .products()
            .insert(&partner_db::NewProduct {
                product_type_id: pt.id,
                article: "7028748".to_string(),
                name: "Ламинат Дуб серый".to_string(),
                min_partner_price: dec!(3890.41),
            })
            .await
            .unwrap();

        let out = run_line(
            &db,
            &[
                "--json",
                "partners",
                "add",
                "--type",
                &partner_type.id,
                "--name",
                "Стройсервис",
                "--inn",
                "1112223334",
                "--rating",
                "5",
            ],
        )
        .await
        .unwrap();
        let created: serde_json::Value = serde_json::from_str(&out).unwrap();
        let partner_id = created["id"].as_str().unwrap().to_string();

        let item = format!("{}=2", product.id);
        let out = run_line(
            &db,
            &["orders", "create", "--partner", &partner_id, "--item", &item],
        )
        .await
        .unwrap();
        assert!(out.contains("Total: 7780.82 RUB"));

        let out = run_line(&db, &["orders", "list"]).await.unwrap();
        assert!(out.contains("Стройсервис"));
        assert!(out.contains("7780.82 RUB"));
    }

    #[tokio::test]
    async fn test_material_calc_invalid_is_not_an_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let out = run_line(
            &db,
            &[
                "material",
                "calc",
                "--product-type",
                "x",
                "--material-type",
                "y",
                "--required",
                "10",
                "--stock",
                "0",
                "--param1",
                "1",
                "--param2",
                "1",
            ],
        )
        .await
        .unwrap();
        assert!(out.contains("Cannot calculate (-1)"));
    }

    #[tokio::test]
    async fn test_errors_propagate_with_code() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = run_line(
            &db,
            &["orders", "create", "--partner", "nobody", "--item", "p=1"],
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_empty_lists_as_json() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let out = run_line(&db, &["--json", "products", "list"]).await.unwrap();
        assert_eq!(out.trim(), "[]");
    }
}

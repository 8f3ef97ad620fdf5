//! # Seed Data Generator
//!
//! Populates a database with reference data for development: partner types,
//! product types with their coefficients, material types with their defect
//! rates, a catalogue of products and a couple of partners.
//!
//! ## Usage
//! ```bash
//! cargo run -p partner-db --bin seed
//! cargo run -p partner-db --bin seed -- --db ./data/partner_orders.db
//! ```

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

use partner_core::NewPartner;
use partner_db::{Database, DbConfig, NewProduct};

const PARTNER_TYPES: &[&str] = &["ЗАО", "ООО", "ПАО", "ОАО"];

/// (name, material consumption coefficient)
const PRODUCT_TYPES: &[(&str, &str)] = &[
    ("Ламинат", "2.35"),
    ("Массивная доска", "5.15"),
    ("Паркетная доска", "4.34"),
    ("Пробковое покрытие", "1.5"),
];

/// (name, defect percentage)
const MATERIAL_TYPES: &[(&str, &str)] = &[
    ("Тип материала 1", "0.10"),
    ("Тип материала 2", "0.95"),
    ("Тип материала 3", "0.28"),
    ("Тип материала 4", "0.55"),
    ("Тип материала 5", "0.34"),
];

/// (product type index, article, name, minimum partner price)
const PRODUCTS: &[(usize, &str, &str, &str)] = &[
    (2, "8758385", "Паркетная доска Ясень темный однополосная 14 мм", "4456.90"),
    (2, "8858958", "Инженерная доска Дуб Французская елка однополосная 12 мм", "7330.99"),
    (0, "7750282", "Ламинат Дуб дымчато-белый 33 класс 12 мм", "1799.33"),
    (0, "7028748", "Ламинат Дуб серый 32 класс 8 мм с фаской", "3890.41"),
    (3, "5012543", "Пробковое напольное клеевое покрытие 32 класс 4 мм", "5450.59"),
];

/// (partner type index, name, director, inn, rating)
const PARTNERS: &[(usize, &str, &str, &str, i32)] = &[
    (0, "База Строитель", "Иванова Александра Ивановна", "2222455179", 7),
    (1, "Паркет 29", "Петров Василий Петрович", "3333888520", 7),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./partner_orders_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if let Some(path) = args.get(i + 1) {
                    db_path = path.clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Partner Orders Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./partner_orders_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Partner Orders Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut partner_type_ids = Vec::new();
    for name in PARTNER_TYPES {
        partner_type_ids.push(db.partners().insert_type(name).await?.id);
    }
    println!("✓ {} partner types", partner_type_ids.len());

    let mut product_type_ids = Vec::new();
    for (name, coefficient) in PRODUCT_TYPES {
        let created = db
            .catalog()
            .insert_product_type(name, Decimal::from_str(coefficient)?)
            .await?;
        product_type_ids.push(created.id);
    }
    println!("✓ {} product types", product_type_ids.len());

    for (name, defect) in MATERIAL_TYPES {
        db.catalog()
            .insert_material_type(name, Decimal::from_str(defect)?)
            .await?;
    }
    println!("✓ {} material types", MATERIAL_TYPES.len());

    for (type_idx, article, name, price) in PRODUCTS {
        db.products()
            .insert(&NewProduct {
                product_type_id: product_type_ids[*type_idx].clone(),
                article: article.to_string(),
                name: name.to_string(),
                min_partner_price: Decimal::from_str(price)?,
            })
            .await?;
    }
    println!("✓ {} products", PRODUCTS.len());

    for (type_idx, name, director, inn, rating) in PARTNERS {
        db.partners()
            .insert(&NewPartner {
                partner_type_id: partner_type_ids[*type_idx].clone(),
                name: name.to_string(),
                director: Some(director.to_string()),
                email: None,
                phone: None,
                legal_address: None,
                inn: inn.to_string(),
                rating: *rating,
            })
            .await?;
    }
    println!("✓ {} partners", PARTNERS.len());

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

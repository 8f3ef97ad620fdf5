//! Command-line definition.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::order::{parse_item_arg, ItemArg};

#[derive(Debug, Parser)]
#[command(name = "partner-orders")]
#[command(about = "Partner orders, catalogue and material requirements.")]
#[command(version)]
pub struct Cli {
    /// SQLite database file (overrides PARTNER_ORDERS_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Partner orders
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// Partners and partner types
    #[command(subcommand)]
    Partners(PartnersCommand),
    /// Product catalogue
    #[command(subcommand)]
    Products(ProductsCommand),
    /// Raw material requirements
    #[command(subcommand)]
    Material(MaterialCommand),
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders with their totals
    List,
    /// Place an order for a partner
    Create {
        /// Partner id
        #[arg(long)]
        partner: String,
        /// Ordered product as PRODUCT_ID=QTY; repeat for more lines
        #[arg(long = "item", value_parser = parse_item_arg)]
        items: Vec<ItemArg>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PartnersCommand {
    /// Register a partner
    Add(AddPartnerArgs),
    /// List partners
    List,
    /// List partner types
    Types,
}

#[derive(Debug, Args)]
pub struct AddPartnerArgs {
    /// Partner type id
    #[arg(long = "type")]
    pub partner_type: String,
    #[arg(long)]
    pub name: String,
    /// Taxpayer number, 10 digits
    #[arg(long)]
    pub inn: String,
    /// 0 to 10
    #[arg(long, allow_negative_numbers = true)]
    pub rating: i32,
    #[arg(long)]
    pub director: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List the catalogue
    List,
}

#[derive(Debug, Subcommand)]
pub enum MaterialCommand {
    /// Calculate material to procure for a production request
    Calc(MaterialCalcArgs),
    /// List product types and material types
    Types,
}

#[derive(Debug, Args)]
pub struct MaterialCalcArgs {
    #[arg(long)]
    pub product_type: String,
    #[arg(long)]
    pub material_type: String,
    /// Units of product requested
    #[arg(long, allow_negative_numbers = true)]
    pub required: i64,
    /// Units of product already in stock
    #[arg(long, allow_negative_numbers = true)]
    pub stock: i64,
    #[arg(long, allow_negative_numbers = true)]
    pub param1: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub param2: f64,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_order_create() {
        let cli = Cli::try_parse_from([
            "partner-orders",
            "orders",
            "create",
            "--partner",
            "p1",
            "--item",
            "a=3",
            "--item",
            "b=1",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Orders(OrdersCommand::Create { partner, items }) => {
                assert_eq!(partner, "p1");
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].quantity, 3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_material_calc_with_negative_stock() {
        let cli = Cli::try_parse_from([
            "partner-orders",
            "--db",
            "/tmp/t.db",
            "material",
            "calc",
            "--product-type",
            "pt",
            "--material-type",
            "mt",
            "--required",
            "100",
            "--stock",
            "-5",
            "--param1",
            "1.5",
            "--param2",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/t.db")));
        match cli.command {
            Command::Material(MaterialCommand::Calc(args)) => {
                assert_eq!(args.stock, -5);
                assert_eq!(args.param1, 1.5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_item_is_rejected() {
        let result = Cli::try_parse_from([
            "partner-orders",
            "orders",
            "create",
            "--partner",
            "p1",
            "--item",
            "a",
        ]);
        assert!(result.is_err());
    }
}

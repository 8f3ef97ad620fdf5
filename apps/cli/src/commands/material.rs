//! # Material Commands
//!
//! How much raw material to procure for a production request.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  material calc --product-type PT --material-type MT                     │
//! │                --required 100 --stock 40 --param1 1.5 --param2 2        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve PT → coefficient      (missing → None, not an error)          │
//! │  resolve MT → defect %         (missing → None, not an error)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MaterialRequest::calculate()  (partner-core)                          │
//! │       │                                                                 │
//! │       ├── InvalidInput      → guidance + list of failed checks         │
//! │       ├── NoProductionNeeded → "stock covers the request"              │
//! │       └── Required(n)       → n units + breakdown                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppError;
use partner_core::material::INVALID_SENTINEL;
use partner_core::validation::{validate_measurement, validate_quantity, validate_stock};
use partner_core::{MaterialBreakdown, MaterialRequest, MaterialRequirement, MaterialType, ProductType};
use partner_db::Database;

/// Shown whenever the calculator rejects its input.
pub const INVALID_INPUT_GUIDANCE: &[&str] = &[
    "both parameters are positive numbers",
    "the required quantity is positive",
    "the product type and material type exist",
    "the stock quantity is not negative",
];

/// Arguments of `material calc`.
#[derive(Debug, Clone)]
pub struct MaterialCalcInput {
    pub product_type_id: String,
    pub material_type_id: String,
    pub required_quantity: i64,
    pub stock_quantity: i64,
    pub parameter1: f64,
    pub parameter2: f64,
}

/// Result of `material calc`, printed as text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialReport {
    pub product_type: Option<ProductType>,
    pub material_type: Option<MaterialType>,
    pub outcome: MaterialRequirement,
    /// `-1`, `0` or the quantity.
    pub legacy_code: i64,
    pub breakdown: Option<MaterialBreakdown>,
    /// Every failed precondition, not only the first.
    pub problems: Vec<String>,
}

/// Lookup tables for `material types`.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogTypes {
    pub product_types: Vec<ProductType>,
    pub material_types: Vec<MaterialType>,
}

/// Resolves both type ids and runs the calculator.
pub async fn calculate_material(
    db: &Database,
    input: &MaterialCalcInput,
) -> Result<MaterialReport, AppError> {
    debug!(
        product_type = %input.product_type_id,
        material_type = %input.material_type_id,
        required = input.required_quantity,
        stock = input.stock_quantity,
        "calculate_material command"
    );

    let product_type = db.catalog().get_product_type(&input.product_type_id).await?;
    let material_type = db.catalog().get_material_type(&input.material_type_id).await?;

    let request = MaterialRequest {
        product_type_coefficient: product_type.as_ref().map(|t| t.coefficient),
        material_defect_percentage: material_type.as_ref().map(|t| t.defect_percentage),
        required_quantity: input.required_quantity,
        stock_quantity: input.stock_quantity,
        parameter1: input.parameter1,
        parameter2: input.parameter2,
    };

    let outcome = request.calculate();
    let breakdown = request.breakdown().ok();
    let problems = if outcome.is_invalid() {
        collect_problems(input, product_type.is_some(), material_type.is_some())
    } else {
        Vec::new()
    };

    info!(legacy_code = outcome.legacy_code(), "Material calculated");

    Ok(MaterialReport {
        product_type,
        material_type,
        legacy_code: outcome.legacy_code(),
        outcome,
        breakdown,
        problems,
    })
}

/// Lists product types and material types.
pub async fn list_types(db: &Database) -> Result<CatalogTypes, AppError> {
    Ok(CatalogTypes {
        product_types: db.catalog().list_product_types().await?,
        material_types: db.catalog().list_material_types().await?,
    })
}

fn collect_problems(input: &MaterialCalcInput, has_product: bool, has_material: bool) -> Vec<String> {
    let mut problems = Vec::new();

    if !has_product {
        problems.push(format!("product type not found: {}", input.product_type_id));
    }
    if !has_material {
        problems.push(format!("material type not found: {}", input.material_type_id));
    }

    let checks = [
        validate_measurement("param1", input.parameter1),
        validate_measurement("param2", input.parameter2),
        validate_quantity("required quantity", input.required_quantity),
        validate_stock(input.stock_quantity),
    ];
    problems.extend(checks.into_iter().filter_map(Result::err).map(|e| e.to_string()));

    problems
}

/// Renders a report for the terminal.
pub fn render_report(report: &MaterialReport) -> String {
    let mut out = String::new();

    match report.outcome {
        MaterialRequirement::InvalidInput(reason) => {
            out.push_str(&format!(
                "Cannot calculate ({}): {}\n",
                INVALID_SENTINEL,
                reason.describe()
            ));
            for problem in &report.problems {
                out.push_str(&format!("  - {}\n", problem));
            }
            out.push_str("Check that:\n");
            for line in INVALID_INPUT_GUIDANCE {
                out.push_str(&format!("  * {}\n", line));
            }
        }
        MaterialRequirement::NoProductionNeeded => {
            out.push_str("Stock covers the request; no material needed (0)\n");
        }
        MaterialRequirement::Required(units) => {
            out.push_str(&format!("Material required: {}\n", units));
            if let Some(b) = &report.breakdown {
                out.push_str(&format!("  to produce:        {}\n", b.production_quantity));
                out.push_str(&format!("  per unit:          {}\n", b.material_per_unit));
                out.push_str(&format!("  per unit + defect: {}\n", b.material_with_defect));
                out.push_str(&format!("  total:             {}\n", b.total_material_needed));
            }
        }
    }

    out
}

pub fn render_types(types: &CatalogTypes) -> String {
    let mut out = String::from("Product types (id, name, coefficient):\n");
    for t in &types.product_types {
        out.push_str(&format!("  {}  {}  {}\n", t.id, t.name, t.coefficient));
    }
    out.push_str("Material types (id, name, defect %):\n");
    for t in &types.material_types {
        out.push_str(&format!("  {}  {}  {}\n", t.id, t.name, t.defect_percentage));
    }
    out
}

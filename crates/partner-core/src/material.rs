//! # Material Requirement Calculator
//!
//! Determines how much raw material must be procured to fulfil a production
//! request, given what is already in stock.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Material Requirement                                 │
//! │                                                                         │
//! │  required = 100, stock = 40                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  production = max(0, required - stock) = 60 ── 0? ──► NoProductionNeeded│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per unit   = param1 × param2 × coefficient      = 1.5 × 2.0 × 2.0 = 6 │
//! │  w/ defect  = per unit × (1 + defect% / 100)     = 6 × 1.1       = 6.6 │
//! │  total      = w/ defect × production             = 6.6 × 60      = 396 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Required(ceil(total)) = Required(396)   ← always rounds UP            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Outcomes
//! The calculator never fails with an error. Every abnormal condition is an
//! outcome value:
//!
//! | Outcome              | Legacy code | Meaning                         |
//! |----------------------|-------------|---------------------------------|
//! | `InvalidInput(_)`    | `-1`        | cannot compute                  |
//! | `NoProductionNeeded` | `0`         | stock already covers demand     |
//! | `Required(n)`        | `n`         | procure `n` units of material   |
//!
//! ## Arithmetic
//! Measurement parameters arrive as `f64`. They are converted to their
//! shortest decimal representation and the whole chain is evaluated with
//! [`Decimal`], so `1 + 10/100` is exactly `1.1` and the ceiling never picks
//! up a stray ulp (`6.6 × 60` is `396`, not `396.00000000000006`). When a
//! value or an intermediate product does not fit in 28 fraction digits the
//! decimal chain is abandoned and plain `f64` evaluation with a saturating
//! cast takes over. A request that consumes material never comes out as
//! `Required(0)`.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Legacy integer returned for input that cannot be computed.
pub const INVALID_SENTINEL: i64 = -1;

// =============================================================================
// Request
// =============================================================================

/// Inputs of a material requirement calculation.
///
/// `product_type_coefficient` and `material_defect_percentage` are `None`
/// when the caller could not resolve the product type or material type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequest {
    pub product_type_coefficient: Option<Decimal>,
    pub material_defect_percentage: Option<Decimal>,
    pub required_quantity: i64,
    pub stock_quantity: i64,
    pub parameter1: f64,
    pub parameter2: f64,
}

impl MaterialRequest {
    /// Runs the calculation for this request.
    pub fn calculate(&self) -> MaterialRequirement {
        match self.breakdown() {
            Ok(breakdown) => breakdown.outcome(),
            Err(reason) => MaterialRequirement::InvalidInput(reason),
        }
    }

    /// Checks the request and returns the intermediate figures of the
    /// calculation.
    pub fn breakdown(&self) -> Result<MaterialBreakdown, InvalidMaterialInput> {
        let (coefficient, defect_percentage) = self.checked_inputs()?;

        let production_quantity = (self.required_quantity - self.stock_quantity).max(0);

        if production_quantity == 0 {
            return Ok(MaterialBreakdown {
                production_quantity: 0,
                material_per_unit: 0.0,
                material_with_defect: 0.0,
                total_material_needed: 0.0,
                required: 0,
            });
        }

        let mut breakdown = exact_figures(
            self.parameter1,
            self.parameter2,
            coefficient,
            defect_percentage,
            production_quantity,
        )
        .unwrap_or_else(|| {
            float_figures(
                self.parameter1,
                self.parameter2,
                coefficient,
                defect_percentage,
                production_quantity,
            )
        });

        // A positive amount of material never rounds to nothing, even when
        // the float product underflows.
        let consumes_material = coefficient > Decimal::ZERO
            && defect_percentage > -Decimal::ONE_HUNDRED;
        if consumes_material && breakdown.required == 0 {
            breakdown.required = 1;
        }

        Ok(breakdown)
    }

    fn checked_inputs(&self) -> Result<(Decimal, Decimal), InvalidMaterialInput> {
        let coefficient = self
            .product_type_coefficient
            .ok_or(InvalidMaterialInput::ProductTypeMissing)?;
        let defect_percentage = self
            .material_defect_percentage
            .ok_or(InvalidMaterialInput::MaterialTypeMissing)?;

        if !self.parameter1.is_finite() || !self.parameter2.is_finite() {
            return Err(InvalidMaterialInput::NonFiniteParameter);
        }
        if self.parameter1 <= 0.0 {
            return Err(InvalidMaterialInput::Parameter1NotPositive);
        }
        if self.parameter2 <= 0.0 {
            return Err(InvalidMaterialInput::Parameter2NotPositive);
        }
        if self.required_quantity <= 0 {
            return Err(InvalidMaterialInput::RequiredQuantityNotPositive);
        }
        if self.stock_quantity < 0 {
            return Err(InvalidMaterialInput::NegativeStock);
        }

        Ok((coefficient, defect_percentage))
    }
}

/// Calculates the material to procure from plain values.
///
/// Convenience form of [`MaterialRequest::calculate`] taking the arguments
/// in the order the order-entry screen collects them.
///
/// ## Example
/// ```rust
/// use partner_core::material::{calculate_required_material, MaterialRequirement};
/// use rust_decimal::Decimal;
///
/// let outcome = calculate_required_material(
///     Some(Decimal::new(20, 1)), // coefficient 2.0
///     Some(Decimal::new(10, 0)), // 10% defect
///     100,                       // required
///     40,                        // in stock
///     1.5,
///     2.0,
/// );
/// assert_eq!(outcome, MaterialRequirement::Required(396));
/// ```
pub fn calculate_required_material(
    product_type_coefficient: Option<Decimal>,
    material_defect_percentage: Option<Decimal>,
    required_quantity: i64,
    stock_quantity: i64,
    parameter1: f64,
    parameter2: f64,
) -> MaterialRequirement {
    MaterialRequest {
        product_type_coefficient,
        material_defect_percentage,
        required_quantity,
        stock_quantity,
        parameter1,
        parameter2,
    }
    .calculate()
}

// =============================================================================
// Outcome
// =============================================================================

/// Why a request could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidMaterialInput {
    /// The product type id did not resolve to a record.
    ProductTypeMissing,
    /// The material type id did not resolve to a record.
    MaterialTypeMissing,
    /// A measurement parameter is NaN or infinite.
    NonFiniteParameter,
    Parameter1NotPositive,
    Parameter2NotPositive,
    RequiredQuantityNotPositive,
    NegativeStock,
}

impl InvalidMaterialInput {
    /// Short human-readable description.
    pub fn describe(&self) -> &'static str {
        match self {
            InvalidMaterialInput::ProductTypeMissing => "product type does not exist",
            InvalidMaterialInput::MaterialTypeMissing => "material type does not exist",
            InvalidMaterialInput::NonFiniteParameter => "parameters must be finite numbers",
            InvalidMaterialInput::Parameter1NotPositive => "parameter 1 must be positive",
            InvalidMaterialInput::Parameter2NotPositive => "parameter 2 must be positive",
            InvalidMaterialInput::RequiredQuantityNotPositive => {
                "required quantity must be positive"
            }
            InvalidMaterialInput::NegativeStock => "stock quantity cannot be negative",
        }
    }
}

/// Result of a material requirement calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum MaterialRequirement {
    /// Input failed a precondition; nothing was computed.
    InvalidInput(InvalidMaterialInput),
    /// Stock already covers the required quantity.
    NoProductionNeeded,
    /// Units of material to procure, rounded up.
    Required(u64),
}

impl MaterialRequirement {
    /// Maps the outcome onto the legacy integer convention:
    /// `-1` invalid, `0` nothing needed, `n` units needed.
    pub fn legacy_code(&self) -> i64 {
        match self {
            MaterialRequirement::InvalidInput(_) => INVALID_SENTINEL,
            MaterialRequirement::NoProductionNeeded => 0,
            MaterialRequirement::Required(units) => i64::try_from(*units).unwrap_or(i64::MAX),
        }
    }

    /// Material quantity, or `None` when the input was invalid.
    pub fn quantity(&self) -> Option<u64> {
        match self {
            MaterialRequirement::InvalidInput(_) => None,
            MaterialRequirement::NoProductionNeeded => Some(0),
            MaterialRequirement::Required(units) => Some(*units),
        }
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, MaterialRequirement::InvalidInput(_))
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Intermediate figures of a valid calculation.
///
/// The fractional figures are reported as `f64` for display only; the
/// `required` value is what the calculator returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialBreakdown {
    pub production_quantity: i64,
    pub material_per_unit: f64,
    pub material_with_defect: f64,
    pub total_material_needed: f64,
    pub required: u64,
}

impl MaterialBreakdown {
    fn outcome(&self) -> MaterialRequirement {
        if self.production_quantity == 0 {
            MaterialRequirement::NoProductionNeeded
        } else {
            MaterialRequirement::Required(self.required)
        }
    }
}

/// Converts a float to the decimal it prints as.
///
/// `f64` display is the shortest string that round-trips, so `1.5` becomes
/// exactly `1.5` rather than its binary expansion. Returns `None` when the
/// text does not fit a `Decimal` digit for digit: `from_str` rounds away
/// fraction digits past the 28th instead of failing, which shows up as a
/// smaller scale than the text has.
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    let text = value.to_string();
    let decimal = Decimal::from_str(&text).ok()?;
    let fraction_digits = text.split_once('.').map_or(0, |(_, fraction)| fraction.len());
    (decimal.scale() as usize == fraction_digits).then_some(decimal)
}

/// Multiplies without rounding. `checked_mul` silently drops digits when
/// the combined scale passes 28; a product that kept every digit carries
/// the sum of both scales.
fn exact_mul(a: Decimal, b: Decimal) -> Option<Decimal> {
    let product = a.checked_mul(b)?;
    if product.is_zero() {
        return (a.is_zero() || b.is_zero()).then_some(product);
    }
    (product.scale() == a.scale() + b.scale()).then_some(product)
}

/// `1 + percentage / 100`, without rounding.
fn exact_defect_factor(defect_percentage: Decimal) -> Option<Decimal> {
    let mut fraction = defect_percentage;
    fraction.set_scale(defect_percentage.scale() + 2).ok()?;
    let factor = Decimal::ONE.checked_add(fraction)?;
    (factor.checked_sub(Decimal::ONE)? == fraction).then_some(factor)
}

/// Evaluates the formula in `Decimal`, or `None` when any step would round.
fn exact_figures(
    parameter1: f64,
    parameter2: f64,
    coefficient: Decimal,
    defect_percentage: Decimal,
    production_quantity: i64,
) -> Option<MaterialBreakdown> {
    let p1 = decimal_from_f64(parameter1)?;
    let p2 = decimal_from_f64(parameter2)?;

    let per_unit = exact_mul(exact_mul(p1, p2)?, coefficient)?;
    let with_defect = exact_mul(per_unit, exact_defect_factor(defect_percentage)?)?;
    let total = exact_mul(with_defect, Decimal::from(production_quantity))?;

    // Negative totals (negative coefficient or defect below -100%) need no
    // material.
    let required = if total.is_sign_negative() {
        0
    } else {
        total.ceil().to_u64().unwrap_or(u64::MAX)
    };

    Some(MaterialBreakdown {
        production_quantity,
        material_per_unit: per_unit.to_f64().unwrap_or(f64::NAN),
        material_with_defect: with_defect.to_f64().unwrap_or(f64::NAN),
        total_material_needed: total.to_f64().unwrap_or(f64::NAN),
        required,
    })
}

fn float_figures(
    parameter1: f64,
    parameter2: f64,
    coefficient: Decimal,
    defect_percentage: Decimal,
    production_quantity: i64,
) -> MaterialBreakdown {
    let coefficient = coefficient.to_f64().unwrap_or(f64::NAN);
    let defect_percentage = defect_percentage.to_f64().unwrap_or(f64::NAN);

    let per_unit = parameter1 * parameter2 * coefficient;
    let with_defect = per_unit * (1.0 + defect_percentage / 100.0);
    let total = with_defect * production_quantity as f64;

    MaterialBreakdown {
        production_quantity,
        material_per_unit: per_unit,
        material_with_defect: with_defect,
        total_material_needed: total,
        // `as` saturates: NaN and negatives become 0, overflow becomes MAX
        required: total.ceil() as u64,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn request(required: i64, stock: i64, p1: f64, p2: f64) -> MaterialRequest {
        MaterialRequest {
            product_type_coefficient: Some(dec!(2.0)),
            material_defect_percentage: Some(dec!(10)),
            required_quantity: required,
            stock_quantity: stock,
            parameter1: p1,
            parameter2: p2,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let outcome = request(100, 40, 1.5, 2.0).calculate();
        assert_eq!(outcome, MaterialRequirement::Required(396));
        assert_eq!(outcome.legacy_code(), 396);
    }

    #[test]
    fn test_breakdown_figures() {
        let breakdown = request(100, 40, 1.5, 2.0).breakdown().unwrap();
        assert_eq!(breakdown.production_quantity, 60);
        assert_eq!(breakdown.material_per_unit, 6.0);
        assert!((breakdown.material_with_defect - 6.6).abs() < 1e-9);
        assert_eq!(breakdown.total_material_needed, 396.0);
        assert_eq!(breakdown.required, 396);
    }

    #[test]
    fn test_stock_covers_demand() {
        let outcome = request(50, 50, 1.5, 2.0).calculate();
        assert_eq!(outcome, MaterialRequirement::NoProductionNeeded);
        assert_eq!(outcome.legacy_code(), 0);
        assert_eq!(outcome.quantity(), Some(0));

        let outcome = request(10, 500, 1.5, 2.0).calculate();
        assert_eq!(outcome, MaterialRequirement::NoProductionNeeded);
    }

    #[test]
    fn test_rounds_up() {
        // 1.1 × 1 × 1 × 1.0 × 1 = 1.1 → 2
        let req = MaterialRequest {
            product_type_coefficient: Some(dec!(1)),
            material_defect_percentage: Some(dec!(0)),
            required_quantity: 1,
            stock_quantity: 0,
            parameter1: 1.1,
            parameter2: 1.0,
        };
        assert_eq!(req.calculate(), MaterialRequirement::Required(2));
    }

    #[test]
    fn test_whole_totals_are_not_bumped() {
        // 0.1 × 0.2 × 3 × 1.0 × 50 = 3 exactly; binary floats would give 3.0000000000000004
        let req = MaterialRequest {
            product_type_coefficient: Some(dec!(3)),
            material_defect_percentage: Some(dec!(0)),
            required_quantity: 50,
            stock_quantity: 0,
            parameter1: 0.1,
            parameter2: 0.2,
        };
        assert_eq!(req.calculate(), MaterialRequirement::Required(3));
    }

    #[test]
    fn test_invalid_inputs() {
        let cases = [
            (request(100, 40, 0.0, 2.0), InvalidMaterialInput::Parameter1NotPositive),
            (request(100, 40, -1.0, 2.0), InvalidMaterialInput::Parameter1NotPositive),
            (request(100, 40, 1.5, 0.0), InvalidMaterialInput::Parameter2NotPositive),
            (request(0, 40, 1.5, 2.0), InvalidMaterialInput::RequiredQuantityNotPositive),
            (request(-5, 0, 1.5, 2.0), InvalidMaterialInput::RequiredQuantityNotPositive),
            (request(100, -1, 1.5, 2.0), InvalidMaterialInput::NegativeStock),
            (request(100, 40, f64::NAN, 2.0), InvalidMaterialInput::NonFiniteParameter),
            (request(100, 40, 1.5, f64::INFINITY), InvalidMaterialInput::NonFiniteParameter),
        ];

        for (req, reason) in cases {
            let outcome = req.calculate();
            assert_eq!(outcome, MaterialRequirement::InvalidInput(reason));
            assert_eq!(outcome.legacy_code(), INVALID_SENTINEL);
            assert_eq!(outcome.quantity(), None);
        }
    }

    #[test]
    fn test_missing_types() {
        let mut req = request(100, 40, 1.5, 2.0);
        req.product_type_coefficient = None;
        assert_eq!(
            req.calculate(),
            MaterialRequirement::InvalidInput(InvalidMaterialInput::ProductTypeMissing)
        );

        let mut req = request(100, 40, 1.5, 2.0);
        req.material_defect_percentage = None;
        assert_eq!(req.calculate().legacy_code(), -1);
    }

    #[test]
    fn test_invalid_wins_over_covered_stock() {
        // Stock covers demand but parameter 1 is zero: still invalid
        let outcome = request(50, 50, 0.0, 2.0).calculate();
        assert!(outcome.is_invalid());
    }

    #[test]
    fn test_huge_values_saturate() {
        let outcome = request(i64::MAX, 0, 1e300, 1e300).calculate();
        assert_eq!(outcome, MaterialRequirement::Required(u64::MAX));
        assert_eq!(outcome.legacy_code(), i64::MAX);
    }

    #[test]
    fn test_tiny_parameters_still_round_up() {
        let outcome = request(1, 0, 1e-300, 1.0).calculate();
        assert_eq!(outcome, MaterialRequirement::Required(1));
    }

    #[test]
    fn test_digits_beyond_decimal_scale_still_round_up() {
        // 1e-15 × 1e-15 needs 30 fraction digits; Decimal would round it to 0
        let outcome = calculate_required_material(Some(dec!(2)), Some(dec!(10)), 1, 0, 1e-15, 1e-15);
        assert_eq!(outcome, MaterialRequirement::Required(1));

        // The parameter itself has more than 28 fraction digits; the float
        // product is 1.0000000000000102
        let outcome = calculate_required_material(
            Some(dec!(1)),
            Some(dec!(0)),
            1,
            0,
            1.00000000000001e-25,
            1e25,
        );
        assert_eq!(outcome, MaterialRequirement::Required(2));
    }

    #[test]
    fn test_positive_demand_never_needs_zero_material() {
        let outcome = request(1, 0, 1e-200, 1e-200).calculate();
        assert_eq!(outcome, MaterialRequirement::Required(1));
    }

    #[test]
    fn test_zero_coefficient_needs_nothing() {
        let outcome = calculate_required_material(Some(dec!(0)), Some(dec!(10)), 10, 0, 1.5, 2.0);
        assert_eq!(outcome, MaterialRequirement::Required(0));
    }

    #[test]
    fn test_decimal_conversion_rejects_lost_digits() {
        assert_eq!(decimal_from_f64(1.5), Some(dec!(1.5)));
        assert_eq!(decimal_from_f64(1e-15), Some(dec!(0.000000000000001)));
        assert_eq!(decimal_from_f64(1.00000000000001e-25), None);
        assert_eq!(decimal_from_f64(1e300), None);

        assert_eq!(exact_mul(dec!(1.5), dec!(2.0)), Some(dec!(3.00)));
        assert_eq!(exact_mul(dec!(0.000000000000001), dec!(0.000000000000001)), None);
        assert_eq!(exact_defect_factor(dec!(10)), Some(dec!(1.10)));
    }

    #[test]
    fn test_free_function_matches_request() {
        let outcome = calculate_required_material(Some(dec!(2.0)), Some(dec!(10)), 100, 40, 1.5, 2.0);
        assert_eq!(outcome, request(100, 40, 1.5, 2.0).calculate());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&MaterialRequirement::Required(396)).unwrap();
        assert_eq!(json, r#"{"outcome":"required","value":396}"#);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn hundredths() -> impl Strategy<Value = f64> {
        (1u32..100_000).prop_map(|c| c as f64 / 100.0)
    }

    fn coefficient() -> impl Strategy<Value = Decimal> {
        (1i64..10_000).prop_map(|c| Decimal::new(c, 2))
    }

    fn defect() -> impl Strategy<Value = Decimal> {
        (0i64..1_000).prop_map(|d| Decimal::new(d, 1))
    }

    /// Parameters spread over forty orders of magnitude.
    fn any_magnitude() -> impl Strategy<Value = f64> {
        (1u32..100_000, -20i32..20).prop_map(|(m, e)| m as f64 / 1e4 * 10f64.powi(e))
    }

    fn run(coef: Decimal, defect: Decimal, required: i64, stock: i64, p1: f64, p2: f64) -> u64 {
        calculate_required_material(Some(coef), Some(defect), required, stock, p1, p2)
            .quantity()
            .unwrap()
    }

    proptest! {
        #[test]
        fn prop_covered_stock_is_zero(
            required in 1i64..10_000,
            extra in 0i64..10_000,
            p1 in hundredths(),
            p2 in hundredths(),
            coef in coefficient(),
            defect in defect(),
        ) {
            let outcome = calculate_required_material(
                Some(coef), Some(defect), required, required + extra, p1, p2,
            );
            prop_assert_eq!(outcome, MaterialRequirement::NoProductionNeeded);
        }

        #[test]
        fn prop_equals_ceiling_of_formula(
            required in 1i64..10_000,
            stock in 0i64..10_000,
            p1c in 1u32..100_000,
            p2c in 1u32..100_000,
            coef in coefficient(),
            defect in defect(),
        ) {
            let p1 = p1c as f64 / 100.0;
            let p2 = p2c as f64 / 100.0;
            let production = (required - stock).max(0);
            prop_assume!(production > 0);

            let exact = Decimal::new(p1c as i64, 2)
                * Decimal::new(p2c as i64, 2)
                * coef
                * (Decimal::ONE + defect / Decimal::ONE_HUNDRED)
                * Decimal::from(production);

            let result = run(coef, defect, required, stock, p1, p2);
            prop_assert_eq!(Decimal::from(result), exact.ceil());
            prop_assert!(Decimal::from(result) >= exact);
        }

        #[test]
        fn prop_never_below_float_formula(
            p1 in any_magnitude(),
            p2 in any_magnitude(),
            coef in coefficient(),
            defect in defect(),
            required in 1i64..1_000,
        ) {
            let unrounded = p1
                * p2
                * coef.to_f64().unwrap()
                * (1.0 + defect.to_f64().unwrap() / 100.0)
                * required as f64;
            prop_assume!(unrounded < 1e18);

            let result = run(coef, defect, required, 0, p1, p2);
            prop_assert!(result >= 1);
            // The float formula may sit one ulp above an exact whole number
            prop_assert!(result as f64 >= unrounded * (1.0 - 1e-12));
        }

        #[test]
        fn prop_monotone_in_parameters(
            a in hundredths(),
            b in hundredths(),
            p2 in hundredths(),
            coef in coefficient(),
            defect in defect(),
            required in 1i64..1_000,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(run(coef, defect, required, 0, lo, p2) <= run(coef, defect, required, 0, hi, p2));
            prop_assert!(run(coef, defect, required, 0, p2, lo) <= run(coef, defect, required, 0, p2, hi));
        }

        #[test]
        fn prop_monotone_in_coefficient_and_defect(
            c1 in coefficient(),
            c2 in coefficient(),
            d1 in defect(),
            d2 in defect(),
            p1 in hundredths(),
            p2 in hundredths(),
            required in 1i64..1_000,
        ) {
            let (clo, chi) = (c1.min(c2), c1.max(c2));
            let (dlo, dhi) = (d1.min(d2), d1.max(d2));
            prop_assert!(run(clo, dlo, required, 0, p1, p2) <= run(chi, dlo, required, 0, p1, p2));
            prop_assert!(run(clo, dlo, required, 0, p1, p2) <= run(clo, dhi, required, 0, p1, p2));
        }

        #[test]
        fn prop_monotone_in_quantities(
            r1 in 1i64..10_000,
            r2 in 1i64..10_000,
            s1 in 0i64..10_000,
            s2 in 0i64..10_000,
            p1 in hundredths(),
            p2 in hundredths(),
            coef in coefficient(),
            defect in defect(),
        ) {
            let (rlo, rhi) = (r1.min(r2), r1.max(r2));
            let (slo, shi) = (s1.min(s2), s1.max(s2));
            prop_assert!(run(coef, defect, rlo, slo, p1, p2) <= run(coef, defect, rhi, slo, p1, p2));
            prop_assert!(run(coef, defect, rhi, shi, p1, p2) <= run(coef, defect, rhi, slo, p1, p2));
        }
    }
}

//! # Validation Module
//!
//! Input validation for the partner form, the order form and the material
//! calculator inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Types and required flags                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── INN shape, rating range, e-mail                                   │
//! │  └── Blank optional fields become None                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use partner_core::validation::{validate_inn, validate_rating};
//!
//! assert_eq!(validate_inn(" 7701234567 ").unwrap(), "7701234567");
//! assert_eq!(validate_rating(7).unwrap(), 7);
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::NewPartner;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest partner name accepted.
pub const MAX_PARTNER_NAME_LEN: usize = 200;

/// Number of digits in a legal-entity INN.
pub const INN_LEN: usize = 10;

pub const MIN_RATING: i64 = 0;
pub const MAX_RATING: i64 = 10;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that an identifier was supplied.
pub fn validate_required_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a partner name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use partner_core::validation::validate_partner_name;
///
/// assert!(validate_partner_name("ООО Паркет").is_ok());
/// assert!(validate_partner_name("   ").is_err());
/// ```
pub fn validate_partner_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PARTNER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PARTNER_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an INN: exactly ten ASCII digits.
///
/// ```text
/// "7701234567"   ✅
/// "770123456"    ❌ 9 digits
/// "77012345AB"   ❌ letters
/// ```
pub fn validate_inn(inn: &str) -> ValidationResult<String> {
    let inn = inn.trim();

    if inn.is_empty() {
        return Err(ValidationError::Required {
            field: "inn".to_string(),
        });
    }

    if inn.len() != INN_LEN || !inn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "inn".to_string(),
            reason: format!("must be exactly {} digits", INN_LEN),
        });
    }

    Ok(inn.to_string())
}

/// Validates an optional e-mail address.
///
/// Blank input is treated as absent.
pub fn validate_email(email: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(email) = optional_text(email) else {
        return Ok(None);
    };

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    };
    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(Some(email))
}

/// Trims optional text; blank becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a partner rating.
pub fn validate_rating(rating: i64) -> ValidationResult<i32> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }
    // In range, so the narrowing is lossless
    Ok(rating as i32)
}

/// Parses a rating typed as text.
pub fn parse_rating(text: &str) -> ValidationResult<i32> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "rating".to_string(),
        });
    }
    let rating: i64 = text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "rating".to_string(),
        reason: "must be a whole number".to_string(),
    })?;
    validate_rating(rating)
}

/// Validates a quantity that must be strictly positive.
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates a product dimension: finite and strictly positive.
pub fn validate_measurement(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a decimal that may be zero but not negative (prices, defect
/// percentages).
pub fn validate_non_negative_decimal(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a decimal that must be strictly positive (coefficients).
pub fn validate_positive_decimal(field: &str, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates a partner form and returns the normalized partner.
///
/// Checks run in form order: type, name, INN, rating, e-mail. Optional text
/// fields are trimmed and blank strings become `None`.
pub fn validate_new_partner(input: &NewPartner) -> ValidationResult<NewPartner> {
    validate_required_id("partner type", &input.partner_type_id)?;
    let name = validate_partner_name(&input.name)?;
    let inn = validate_inn(&input.inn)?;
    let rating = validate_rating(i64::from(input.rating))?;
    let email = validate_email(input.email.as_deref())?;

    Ok(NewPartner {
        partner_type_id: input.partner_type_id.trim().to_string(),
        name,
        director: optional_text(input.director.as_deref()),
        email,
        phone: optional_text(input.phone.as_deref()),
        legal_address: optional_text(input.legal_address.as_deref()),
        inn,
        rating,
    })
}

/// Checks that at least one order line has a positive quantity.
pub fn validate_order_lines(quantities: &[i64]) -> ValidationResult<()> {
    if !quantities.iter().any(|&qty| qty > 0) {
        return Err(ValidationError::Required {
            field: "order lines".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form() -> NewPartner {
        NewPartner {
            partner_type_id: "type-1".to_string(),
            name: "  Паркет 29  ".to_string(),
            director: Some("  ".to_string()),
            email: Some(" info@parket.ru ".to_string()),
            phone: None,
            legal_address: Some(" Москва ".to_string()),
            inn: "7701234567".to_string(),
            rating: 7,
        }
    }

    #[test]
    fn test_validate_partner_name() {
        assert_eq!(validate_partner_name("  Acme ").unwrap(), "Acme");
        assert!(validate_partner_name("").is_err());
        assert!(validate_partner_name(&"Я".repeat(200)).is_ok());
        assert!(matches!(
            validate_partner_name(&"Я".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_inn() {
        assert!(validate_inn("7701234567").is_ok());
        assert!(matches!(validate_inn(""), Err(ValidationError::Required { .. })));
        assert!(validate_inn("770123456").is_err());
        assert!(validate_inn("77012345678").is_err());
        assert!(validate_inn("77012345AB").is_err());
        // Non-ASCII digits are rejected
        assert!(validate_inn("٧٧٠١٢٣٤٥٦٧").is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert_eq!(validate_rating(0).unwrap(), 0);
        assert_eq!(validate_rating(10).unwrap(), 10);
        assert!(validate_rating(-1).is_err());
        assert!(validate_rating(11).is_err());

        assert_eq!(parse_rating(" 5 ").unwrap(), 5);
        assert!(matches!(parse_rating("five"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(parse_rating(""), Err(ValidationError::Required { .. })));
        assert!(parse_rating("99999999999999999999").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(None).unwrap(), None);
        assert_eq!(validate_email(Some("   ")).unwrap(), None);
        assert_eq!(
            validate_email(Some(" a@b.ru ")).unwrap(),
            Some("a@b.ru".to_string())
        );
        assert!(validate_email(Some("no-at-sign")).is_err());
        assert!(validate_email(Some("@b.ru")).is_err());
    }

    #[test]
    fn test_validate_new_partner_normalizes() {
        let partner = validate_new_partner(&form()).unwrap();
        assert_eq!(partner.name, "Паркет 29");
        assert_eq!(partner.director, None);
        assert_eq!(partner.email.as_deref(), Some("info@parket.ru"));
        assert_eq!(partner.legal_address.as_deref(), Some("Москва"));
        assert_eq!(partner.rating, 7);
    }

    #[test]
    fn test_validate_new_partner_rejects() {
        let mut missing_type = form();
        missing_type.partner_type_id = " ".to_string();
        let err = validate_new_partner(&missing_type).unwrap_err();
        assert_eq!(err.field(), "partner type");

        let mut bad_inn = form();
        bad_inn.inn = "123".to_string();
        assert_eq!(validate_new_partner(&bad_inn).unwrap_err().field(), "inn");

        let mut bad_rating = form();
        bad_rating.rating = 12;
        assert_eq!(validate_new_partner(&bad_rating).unwrap_err().field(), "rating");
    }

    #[test]
    fn test_validate_order_lines() {
        assert!(validate_order_lines(&[]).is_err());
        assert!(validate_order_lines(&[0, 0]).is_err());
        assert!(validate_order_lines(&[0, 3]).is_ok());
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_quantity("required", 1).is_ok());
        assert!(validate_quantity("required", 0).is_err());
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
        assert!(validate_measurement("param1", 0.5).is_ok());
        assert!(validate_measurement("param1", 0.0).is_err());
        assert!(validate_measurement("param1", f64::NAN).is_err());
        assert!(validate_non_negative_decimal("price", dec!(0)).is_ok());
        assert!(validate_non_negative_decimal("price", dec!(-0.01)).is_err());
        assert!(validate_positive_decimal("coefficient", dec!(0)).is_err());
        assert!(validate_positive_decimal("coefficient", dec!(1.5)).is_ok());
    }
}

//! # Validation Module
//!
//! Field-level validation for rows and entries before they leave the app.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field checks (THIS MODULE)                                   │
//! │  ├── Required labels, lengths, reference ids                           │
//! │  └── Non-negative quantities, positive amounts                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Submit gate (pricing::validate_for_submit)                   │
//! │  └── Mode-dependent weight/count requirements                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote backend                                               │
//! │  └── Referential integrity, persistence                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use wekala_core::validation::{validate_label, validate_positive_amount};
//!
//! assert!(validate_label("item", "طماطم").is_ok());
//! assert!(validate_positive_amount("amount", Decimal::ZERO).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::{MAX_LABEL_LEN, MAX_NOTES_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text label (item name, unit label).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_LABEL_LEN` characters
pub fn validate_label(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_length(field, value, MAX_LABEL_LEN)
}

/// Validates optional notes.
///
/// Empty or missing notes are fine; long ones are not.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<()> {
    match notes {
        Some(notes) => validate_length("notes", notes.trim(), MAX_NOTES_LEN),
        None => Ok(()),
    }
}

// Lengths are counted in characters, not bytes: labels are mostly Arabic.
fn validate_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a reference to another entity (car, customer, seller).
///
/// ## Rules
/// - Must not be empty
/// - Must be a UUID
///
/// ## Example
/// ```rust
/// use wekala_core::validation::validate_reference;
///
/// assert!(validate_reference("customer", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_reference("customer", "").is_err());
/// assert!(validate_reference("customer", "ahmed").is_err());
/// ```
pub fn validate_reference(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity or price that may be zero but not negative.
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a money movement amount (receipt, deposit, withdrawal).
///
/// ## Rules
/// - Must be strictly positive; the direction comes from the entry type
pub fn validate_positive_amount(field: &str, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
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

    #[test]
    fn test_validate_label() {
        assert!(validate_label("item", "طماطم").is_ok());
        assert!(validate_label("item", "Tomatoes grade A").is_ok());

        assert_eq!(
            validate_label("item", "   "),
            Err(ValidationError::Required {
                field: "item".to_string()
            })
        );
        assert!(validate_label("item", &"A".repeat(MAX_LABEL_LEN + 1)).is_err());
    }

    #[test]
    fn test_label_length_counts_characters() {
        // 100 Arabic letters are 200 bytes but still fit.
        let label = "ب".repeat(MAX_LABEL_LEN);
        assert!(validate_label("item", &label).is_ok());
    }

    #[test]
    fn test_validate_notes() {
        assert!(validate_notes(None).is_ok());
        assert!(validate_notes(Some("")).is_ok());
        assert!(validate_notes(Some(&"x".repeat(MAX_NOTES_LEN + 1))).is_err());
    }

    #[test]
    fn test_validate_reference() {
        assert!(validate_reference("car", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_reference("car", "").is_err());
        assert!(validate_reference("car", "not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("price", dec!(0)).is_ok());
        assert!(validate_non_negative("price", dec!(-0.00)).is_ok());
        assert!(validate_non_negative("price", dec!(12.5)).is_ok());
        assert!(validate_non_negative("price", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("amount", dec!(0.01)).is_ok());
        assert!(validate_positive_amount("amount", dec!(0)).is_err());
        assert!(validate_positive_amount("amount", dec!(-5)).is_err());
    }
}

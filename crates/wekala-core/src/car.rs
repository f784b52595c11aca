//! # Car Intake
//!
//! A car is one incoming shipment from a supplier. It is registered with its
//! manifest (what it carries) before anything is sold from it.
//!
//! ## Intake Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  date              required                                            │
//! │  supplier          required (name)                                     │
//! │  supplier_id       optional, UUID when given                           │
//! │  total_weight_kg   optional, not negative                              │
//! │  lines             blank items dropped, names trimmed, at least one     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_label, validate_non_negative, validate_reference, ValidationResult};

/// One manifest line: an item and how many units arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarManifestLine {
    pub item: String,
    #[serde(default)]
    pub count: Decimal,
}

impl CarManifestLine {
    pub fn new(item: &str, count: Decimal) -> ValidationResult<Self> {
        validate_label("item", item)?;
        validate_non_negative("count", count)?;

        Ok(CarManifestLine {
            item: item.trim().to_string(),
            count,
        })
    }

    fn is_blank(&self) -> bool {
        self.item.trim().is_empty()
    }
}

/// Body of the `create-car` backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub date: String,
    pub supplier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_weight_kg: Option<Decimal>,
    pub lines: Vec<CarManifestLine>,
}

impl NewCar {
    /// Validates the intake form and builds the request.
    ///
    /// Manifest rows with a blank item are the form's unused rows and are
    /// dropped before the at-least-one check.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use wekala_core::car::{CarManifestLine, NewCar};
    ///
    /// let lines = vec![
    ///     CarManifestLine { item: " طماطم ".to_string(), count: Decimal::from(40) },
    ///     CarManifestLine { item: String::new(), count: Decimal::ZERO },
    /// ];
    /// let car = NewCar::new("2024-03-01T06:30", "الحاج محمود", None, None, lines).unwrap();
    /// assert_eq!(car.lines.len(), 1);
    /// assert_eq!(car.lines[0].item, "طماطم");
    /// ```
    pub fn new(
        date: &str,
        supplier: &str,
        supplier_id: Option<&str>,
        total_weight_kg: Option<Decimal>,
        lines: Vec<CarManifestLine>,
    ) -> ValidationResult<Self> {
        validate_label("date", date)?;
        validate_label("supplier", supplier)?;

        let supplier_id = supplier_id.map(str::trim).filter(|id| !id.is_empty());
        if let Some(id) = supplier_id {
            validate_reference("supplier_id", id)?;
        }
        if let Some(weight) = total_weight_kg {
            validate_non_negative("total_weight_kg", weight)?;
        }

        let lines = lines
            .into_iter()
            .filter(|line| !line.is_blank())
            .map(|line| CarManifestLine::new(&line.item, line.count))
            .collect::<ValidationResult<Vec<_>>>()?;

        if lines.is_empty() {
            return Err(ValidationError::Empty {
                field: "lines".to_string(),
            });
        }

        Ok(NewCar {
            date: date.trim().to_string(),
            supplier: supplier.trim().to_string(),
            supplier_id: supplier_id.map(str::to_string),
            total_weight_kg,
            lines,
        })
    }

    /// Units on the manifest, across all items.
    pub fn total_count(&self) -> Decimal {
        self.lines.iter().map(|line| line.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Locale;
    use rust_decimal_macros::dec;

    const SUPPLIER: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn line(item: &str, count: Decimal) -> CarManifestLine {
        CarManifestLine {
            item: item.to_string(),
            count,
        }
    }

    #[test]
    fn test_blank_lines_are_dropped_and_names_trimmed() {
        let car = NewCar::new(
            "2024-03-01T06:30",
            " الحاج محمود ",
            Some(SUPPLIER),
            Some(dec!(5200)),
            vec![line(" طماطم ", dec!(40)), line("   ", dec!(3)), line("خيار", dec!(12))],
        )
        .unwrap();

        assert_eq!(car.supplier, "الحاج محمود");
        assert_eq!(car.lines, vec![line("طماطم", dec!(40)), line("خيار", dec!(12))]);
        assert_eq!(car.total_count(), dec!(52));
    }

    #[test]
    fn test_needs_one_item() {
        let err = NewCar::new("2024-03-01", "مورد", None, None, vec![line("", dec!(0))]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: "lines".to_string()
            }
        );
        assert_eq!(
            err.localized(Locale::Ar),
            "أضف صنفاً واحداً على الأقل (البند غير فارغ)."
        );
    }

    #[test]
    fn test_required_fields() {
        let lines = || vec![line("بطاطس", dec!(10))];

        let err = NewCar::new(" ", "مورد", None, None, lines()).unwrap_err();
        assert_eq!(err.localized(Locale::Ar), "التاريخ مطلوب");

        let err = NewCar::new("2024-03-01", "", None, None, lines()).unwrap_err();
        assert_eq!(err.localized(Locale::Ar), "المورد مطلوب");

        assert!(NewCar::new("2024-03-01", "مورد", Some("abc"), None, lines()).is_err());
        assert!(NewCar::new("2024-03-01", "مورد", None, Some(dec!(-1)), lines()).is_err());
        assert!(NewCar::new("2024-03-01", "مورد", None, None, vec![line("بصل", dec!(-2))]).is_err());
    }

    #[test]
    fn test_wire_shape() {
        let car = NewCar::new("2024-03-01", "مورد", Some(" "), None, vec![line("بصل", dec!(8))])
            .unwrap();
        assert_eq!(car.supplier_id, None);

        let json = serde_json::to_value(&car).unwrap();
        assert!(json.get("supplierId").is_none());
        assert!(json.get("totalWeightKg").is_none());
        assert_eq!(json["lines"][0]["item"], "بصل");
        assert_eq!(json["lines"][0]["count"], serde_json::json!(8.0));
    }
}

//! # Domain Types
//!
//! The closed vocabularies shared across the sell sheet.
//!
//! ## Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How a sale line is priced                          │
//! │                                                                         │
//! │  ┌─────────────────────────┐        ┌─────────────────────────┐        │
//! │  │      SellingMode        │        │       Bya3aMode         │        │
//! │  │  ─────────────────────  │        │  ─────────────────────  │        │
//! │  │  Weight   weight×price  │   +    │  PerUnit  count×value   │        │
//! │  │  Piece    count×price   │        │  Fixed    value         │        │
//! │  │  Package  count×price   │        │                         │        │
//! │  └─────────────────────────┘        └─────────────────────────┘        │
//! │                                                                         │
//! │                     total = round2(base + bya3a)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Bya3a" is the agency's commission/fee charged on top of the goods price.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Selling Mode
// =============================================================================

/// How the base price of a sale line is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SellingMode {
    /// Priced per weight unit: `weight × price`.
    Weight,
    /// Priced per piece: `count × price`.
    #[default]
    Piece,
    /// Priced per package: `count × price`.
    Package,
}

impl SellingMode {
    /// All modes, in the order the sell sheet offers them.
    pub const ALL: [SellingMode; 3] = [SellingMode::Weight, SellingMode::Piece, SellingMode::Package];

    /// Wire name used by the backend and the frontend.
    pub fn as_str(&self) -> &'static str {
        match self {
            SellingMode::Weight => "weight",
            SellingMode::Piece => "piece",
            SellingMode::Package => "package",
        }
    }

    /// Label shown on the sell sheet.
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SellingMode::Weight, Locale::Ar) => "وزن",
            (SellingMode::Piece, Locale::Ar) => "قطعة",
            (SellingMode::Package, Locale::Ar) => "باكت",
            (SellingMode::Weight, Locale::En) => "Weight",
            (SellingMode::Piece, Locale::En) => "Piece",
            (SellingMode::Package, Locale::En) => "Package",
        }
    }

    /// Whether the base price is driven by the count rather than the weight.
    #[inline]
    pub fn is_counted(&self) -> bool {
        matches!(self, SellingMode::Piece | SellingMode::Package)
    }
}

impl fmt::Display for SellingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SellingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "weight" => Ok(SellingMode::Weight),
            "piece" => Ok(SellingMode::Piece),
            "package" => Ok(SellingMode::Package),
            other => Err(ValidationError::InvalidFormat {
                field: "selling_mode".to_string(),
                reason: format!("unknown selling mode '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Bya3a Mode
// =============================================================================

/// How the bya3a (commission/fee) of a sale line is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Bya3aMode {
    /// Charged per counted unit: `count × bya3a_value`.
    PerUnit,
    /// Flat fee: `bya3a_value`, regardless of count or weight.
    #[default]
    Fixed,
}

impl Bya3aMode {
    pub const ALL: [Bya3aMode; 2] = [Bya3aMode::PerUnit, Bya3aMode::Fixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bya3aMode::PerUnit => "per_unit",
            Bya3aMode::Fixed => "fixed",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Bya3aMode::PerUnit, Locale::Ar) => "بالوحدة",
            (Bya3aMode::Fixed, Locale::Ar) => "ثابت",
            (Bya3aMode::PerUnit, Locale::En) => "Per unit",
            (Bya3aMode::Fixed, Locale::En) => "Fixed",
        }
    }
}

impl fmt::Display for Bya3aMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bya3aMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "per_unit" => Ok(Bya3aMode::PerUnit),
            "fixed" => Ok(Bya3aMode::Fixed),
            other => Err(ValidationError::InvalidFormat {
                field: "bya3a_mode".to_string(),
                reason: format!("unknown bya3a mode '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Locale
// =============================================================================

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Arabic, the agency's working language.
    #[default]
    Ar,
    En,
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            other => Err(ValidationError::InvalidFormat {
                field: "locale".to_string(),
                reason: format!("unsupported locale '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_new_row() {
        assert_eq!(SellingMode::default(), SellingMode::Piece);
        assert_eq!(Bya3aMode::default(), Bya3aMode::Fixed);
        assert_eq!(Locale::default(), Locale::Ar);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&Bya3aMode::PerUnit).unwrap(),
            "\"per_unit\""
        );
        for mode in SellingMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            assert_eq!(mode.as_str().parse::<SellingMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("kilo".parse::<SellingMode>().is_err());
        assert!("percent".parse::<Bya3aMode>().is_err());
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn test_is_counted() {
        assert!(!SellingMode::Weight.is_counted());
        assert!(SellingMode::Piece.is_counted());
        assert!(SellingMode::Package.is_counted());
    }

    #[test]
    fn test_labels() {
        assert_eq!(SellingMode::Package.label(Locale::Ar), "باكت");
        assert_eq!(SellingMode::Weight.label(Locale::En), "Weight");
        assert_eq!(Bya3aMode::PerUnit.label(Locale::Ar), "بالوحدة");
        assert_eq!(Bya3aMode::Fixed.label(Locale::En), "Fixed");
    }
}

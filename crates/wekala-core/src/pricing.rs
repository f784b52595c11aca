//! # Pricing Module
//!
//! Sale-line pricing and the submit-time gate.
//!
//! ## Two Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sell Sheet Row Lifecycle                           │
//! │                                                                         │
//! │  every keystroke ──► compute_total()        never fails                 │
//! │                       │                     incomplete input → 0 part   │
//! │                       ▼                                                 │
//! │                    row.total shown                                      │
//! │                                                                         │
//! │  click "save" ─────► validate_for_submit()  first failing rule wins     │
//! │                       │                                                 │
//! │                       ├── Err(SubmitRejection) → message shown          │
//! │                       └── Ok(()) → handed to the backend                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Live recomputation has to tolerate half-typed rows, so it collapses any
//! implausible part to zero. Submission is the strict gate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SubmitRejection;
use crate::money::Money;
use crate::types::{Bya3aMode, SellingMode};

// =============================================================================
// Inputs
// =============================================================================

/// Everything the total of a sale line depends on.
///
/// `weight` and `count` are optional; absence counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineCalcInput {
    pub selling_mode: SellingMode,
    pub bya3a_mode: Bya3aMode,
    /// Price per weight unit or per piece/package.
    pub price: Decimal,
    /// Per-unit rate or flat fee, depending on `bya3a_mode`.
    pub bya3a_value: Decimal,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub count: Option<Decimal>,
}

/// The fields the submit gate looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineSubmitInput {
    pub selling_mode: SellingMode,
    pub bya3a_mode: Bya3aMode,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub count: Option<Decimal>,
}

impl From<&SaleLineCalcInput> for SaleLineSubmitInput {
    fn from(input: &SaleLineCalcInput) -> Self {
        SaleLineSubmitInput {
            selling_mode: input.selling_mode,
            bya3a_mode: input.bya3a_mode,
            weight: input.weight,
            count: input.count,
        }
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// The two parts of a sale-line total, before and after rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Goods value: `weight × price` or `count × price`, or zero.
    pub base: Decimal,
    /// Commission/fee: `count × bya3a_value`, `bya3a_value`, or zero.
    pub bya3a: Decimal,
    /// `round2(base + bya3a)`.
    pub total: Money,
}

/// Computes base, bya3a and the rounded total of a sale line.
///
/// ## Rules
/// ```text
/// base  = weight × price   if selling by weight and weight > 0
///       = count × price    if selling by piece/package and count > 0
///       = 0                otherwise
///
/// bya3a = count × value    if per-unit and count > 0
///       = value            if fixed (always)
///       = 0                otherwise
///
/// total = round2(base + bya3a), ties away from zero
/// ```
///
/// Never fails. Negative inputs are not clamped here; arithmetic overflow
/// saturates at the decimal range.
pub fn price_breakdown(input: &SaleLineCalcInput) -> PriceBreakdown {
    let weight = input.weight.unwrap_or(Decimal::ZERO);
    let count = input.count.unwrap_or(Decimal::ZERO);

    let base = match input.selling_mode {
        SellingMode::Weight if weight > Decimal::ZERO => saturating_mul(weight, input.price),
        SellingMode::Piece | SellingMode::Package if count > Decimal::ZERO => {
            saturating_mul(count, input.price)
        }
        SellingMode::Weight | SellingMode::Piece | SellingMode::Package => Decimal::ZERO,
    };

    let bya3a = match input.bya3a_mode {
        Bya3aMode::PerUnit if count > Decimal::ZERO => saturating_mul(count, input.bya3a_value),
        Bya3aMode::PerUnit => Decimal::ZERO,
        Bya3aMode::Fixed => input.bya3a_value,
    };

    PriceBreakdown {
        base,
        bya3a,
        total: Money::from_decimal(saturating_add(base, bya3a)),
    }
}

/// Computes the monetary total of a sale line.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use wekala_core::pricing::{compute_total, SaleLineCalcInput};
/// use wekala_core::types::{Bya3aMode, SellingMode};
///
/// // weight 0 contributes nothing, the fixed bya3a is still charged
/// let input = SaleLineCalcInput {
///     selling_mode: SellingMode::Weight,
///     bya3a_mode: Bya3aMode::Fixed,
///     price: Decimal::from(10),
///     bya3a_value: Decimal::from(5),
///     weight: Some(Decimal::ZERO),
///     count: None,
/// };
/// assert_eq!(compute_total(&input).to_string(), "5.00");
/// ```
#[inline]
pub fn compute_total(input: &SaleLineCalcInput) -> Money {
    price_breakdown(input).total
}

fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(if a.is_sign_negative() != b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    // Only same-signed operands can overflow.
    a.checked_add(b).unwrap_or(if a.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

// =============================================================================
// Submit Gate
// =============================================================================

/// Checks that a sale line is complete enough to be persisted.
///
/// ## Rules (first failure wins)
/// 1. Selling by weight: weight present and > 0.
/// 2. Selling by piece/package: count present and > 0.
/// 3. Per-unit bya3a: count present and > 0, even when selling by weight.
///
/// ## User Workflow
/// ```text
/// weight=2, count=0, per_unit
///      │
///      ▼
/// rule 1 passes (weight > 0)
///      │
///      ▼
/// rule 3 fails ──► CountRequiredForPerUnit
/// ```
pub fn validate_for_submit(input: &SaleLineSubmitInput) -> Result<(), SubmitRejection> {
    let is_positive = |value: Option<Decimal>| value.is_some_and(|v| v > Decimal::ZERO);

    match input.selling_mode {
        SellingMode::Weight if !is_positive(input.weight) => {
            return Err(SubmitRejection::WeightRequired)
        }
        SellingMode::Piece | SellingMode::Package if !is_positive(input.count) => {
            return Err(SubmitRejection::CountRequired)
        }
        SellingMode::Weight | SellingMode::Piece | SellingMode::Package => {}
    }

    match input.bya3a_mode {
        Bya3aMode::PerUnit if !is_positive(input.count) => {
            Err(SubmitRejection::CountRequiredForPerUnit)
        }
        Bya3aMode::PerUnit | Bya3aMode::Fixed => Ok(()),
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

    fn input(
        selling_mode: SellingMode,
        bya3a_mode: Bya3aMode,
        price: Decimal,
        bya3a_value: Decimal,
        weight: Option<Decimal>,
        count: Option<Decimal>,
    ) -> SaleLineCalcInput {
        SaleLineCalcInput {
            selling_mode,
            bya3a_mode,
            price,
            bya3a_value,
            weight,
            count,
        }
    }

    fn submit(
        selling_mode: SellingMode,
        bya3a_mode: Bya3aMode,
        weight: Option<Decimal>,
        count: Option<Decimal>,
    ) -> SaleLineSubmitInput {
        SaleLineSubmitInput {
            selling_mode,
            bya3a_mode,
            weight,
            count,
        }
    }

    #[test]
    fn test_rounds_half_up_on_cent_boundary() {
        let line = input(
            SellingMode::Piece,
            Bya3aMode::Fixed,
            dec!(1.005),
            dec!(0),
            None,
            Some(dec!(3)),
        );
        // 3 × 1.005 = 3.015 → 3.02
        assert_eq!(compute_total(&line).cents(), 302);
    }

    #[test]
    fn test_weight_zero_collapses_base() {
        let line = input(
            SellingMode::Weight,
            Bya3aMode::Fixed,
            dec!(10),
            dec!(5),
            Some(dec!(0)),
            None,
        );
        let breakdown = price_breakdown(&line);
        assert_eq!(breakdown.base, Decimal::ZERO);
        assert_eq!(breakdown.total.to_string(), "5.00");
    }

    #[test]
    fn test_per_unit_without_count_charges_nothing() {
        let line = input(
            SellingMode::Weight,
            Bya3aMode::PerUnit,
            dec!(10),
            dec!(1),
            Some(dec!(2)),
            Some(dec!(0)),
        );
        let breakdown = price_breakdown(&line);
        assert_eq!(breakdown.base, dec!(20));
        assert_eq!(breakdown.bya3a, Decimal::ZERO);
        assert_eq!(breakdown.total.cents(), 2000);

        assert_eq!(
            validate_for_submit(&SaleLineSubmitInput::from(&line)),
            Err(SubmitRejection::CountRequiredForPerUnit)
        );
    }

    #[test]
    fn test_package_per_unit_end_to_end() {
        let line = input(
            SellingMode::Package,
            Bya3aMode::PerUnit,
            dec!(2.50),
            dec!(0.20),
            None,
            Some(dec!(10)),
        );
        let breakdown = price_breakdown(&line);
        assert_eq!(breakdown.base, dec!(25.00));
        assert_eq!(breakdown.bya3a, dec!(2.00));
        assert_eq!(breakdown.total.to_string(), "27.00");
        assert_eq!(validate_for_submit(&SaleLineSubmitInput::from(&line)), Ok(()));
    }

    #[test]
    fn test_weight_mode_ignores_count_for_base() {
        let line = input(
            SellingMode::Weight,
            Bya3aMode::Fixed,
            dec!(4),
            dec!(0),
            Some(dec!(1.5)),
            Some(dec!(100)),
        );
        assert_eq!(compute_total(&line).cents(), 600);
    }

    #[test]
    fn test_counted_mode_ignores_weight_for_base() {
        let line = input(
            SellingMode::Piece,
            Bya3aMode::Fixed,
            dec!(4),
            dec!(1),
            Some(dec!(50)),
            None,
        );
        assert_eq!(compute_total(&line).cents(), 100);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let line = SaleLineCalcInput::default();
        assert_eq!(compute_total(&line), Money::zero());
    }

    #[test]
    fn test_negative_inputs_are_not_clamped() {
        let line = input(
            SellingMode::Piece,
            Bya3aMode::Fixed,
            dec!(-2),
            dec!(0),
            None,
            Some(dec!(3)),
        );
        assert_eq!(compute_total(&line).cents(), -600);

        // A negative count is not > 0, so it contributes nothing.
        let line = input(
            SellingMode::Piece,
            Bya3aMode::PerUnit,
            dec!(2),
            dec!(1),
            None,
            Some(dec!(-3)),
        );
        assert_eq!(compute_total(&line), Money::zero());
    }

    #[test]
    fn test_overflow_saturates() {
        let line = input(
            SellingMode::Weight,
            Bya3aMode::Fixed,
            Decimal::MAX,
            Decimal::MAX,
            Some(Decimal::MAX),
            None,
        );
        assert_eq!(compute_total(&line).cents(), i64::MAX);
    }

    #[test]
    fn test_validation_weight_required() {
        assert_eq!(
            validate_for_submit(&submit(SellingMode::Weight, Bya3aMode::Fixed, None, None)),
            Err(SubmitRejection::WeightRequired)
        );
        assert_eq!(
            validate_for_submit(&submit(
                SellingMode::Weight,
                Bya3aMode::Fixed,
                Some(dec!(-1)),
                Some(dec!(5))
            )),
            Err(SubmitRejection::WeightRequired)
        );
        assert_eq!(
            validate_for_submit(&submit(
                SellingMode::Weight,
                Bya3aMode::Fixed,
                Some(dec!(0.25)),
                None
            )),
            Ok(())
        );
    }

    #[test]
    fn test_validation_counted_rule_reported_before_per_unit_rule() {
        assert_eq!(
            validate_for_submit(&submit(
                SellingMode::Piece,
                Bya3aMode::PerUnit,
                None,
                Some(dec!(0))
            )),
            Err(SubmitRejection::CountRequired)
        );
        assert_eq!(
            validate_for_submit(&submit(SellingMode::Package, Bya3aMode::Fixed, None, None)),
            Err(SubmitRejection::CountRequired)
        );
    }

    #[test]
    fn test_validation_weight_and_per_unit_needs_both() {
        let missing_weight = submit(SellingMode::Weight, Bya3aMode::PerUnit, None, None);
        assert_eq!(
            validate_for_submit(&missing_weight),
            Err(SubmitRejection::WeightRequired)
        );

        let both = submit(
            SellingMode::Weight,
            Bya3aMode::PerUnit,
            Some(dec!(2)),
            Some(dec!(4)),
        );
        assert_eq!(validate_for_submit(&both), Ok(()));
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn amount(max_mantissa: i64, scale: u32) -> impl Strategy<Value = Decimal> {
        (0..=max_mantissa).prop_map(move |m| Decimal::new(m, scale))
    }

    fn any_decimal() -> impl Strategy<Value = Decimal> {
        ((i64::MIN + 1)..=i64::MAX, 0u32..=12).prop_map(|(m, scale)| Decimal::new(m, scale))
    }

    fn selling_mode() -> impl Strategy<Value = SellingMode> {
        prop::sample::select(SellingMode::ALL.to_vec())
    }

    fn bya3a_mode() -> impl Strategy<Value = Bya3aMode> {
        prop::sample::select(Bya3aMode::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Piece selling with a fixed bya3a is `round2(count × price + value)`.
        #[test]
        fn piece_fixed_matches_formula(
            price in amount(10_000_000, 3),
            count in amount(10_000, 0),
            value in amount(1_000_000, 2),
        ) {
            let line = input(SellingMode::Piece, Bya3aMode::Fixed, price, value, None, Some(count));
            prop_assert_eq!(compute_total(&line), Money::from_decimal(count * price + value));
        }

        /// Non-negative inputs never produce a negative total, and the
        /// result does not depend on how many times it is computed.
        #[test]
        fn non_negative_inputs_give_stable_non_negative_total(
            selling in selling_mode(),
            bya3a in bya3a_mode(),
            price in amount(100_000_000, 3),
            value in amount(1_000_000, 2),
            weight in prop::option::of(amount(1_000_000, 3)),
            count in prop::option::of(amount(100_000, 1)),
        ) {
            let line = input(selling, bya3a, price, value, weight, count);
            let first = compute_total(&line);
            prop_assert!(!first.is_negative());
            prop_assert_eq!(first, compute_total(&line));
        }

        /// Arbitrary (even negative or huge) inputs never panic.
        #[test]
        fn arbitrary_inputs_never_panic(
            selling in selling_mode(),
            bya3a in bya3a_mode(),
            price in any_decimal(),
            value in any_decimal(),
            weight in prop::option::of(any_decimal()),
            count in prop::option::of(any_decimal()),
        ) {
            let line = input(selling, bya3a, price, value, weight, count);
            let _ = compute_total(&line);
            let _ = validate_for_submit(&SaleLineSubmitInput::from(&line));
        }

        /// A line that passes the gate has a positive quantity behind its base.
        #[test]
        fn accepted_lines_have_positive_driver(
            selling in selling_mode(),
            bya3a in bya3a_mode(),
            weight in prop::option::of(any_decimal()),
            count in prop::option::of(any_decimal()),
        ) {
            let check = submit(selling, bya3a, weight, count);
            if validate_for_submit(&check).is_ok() {
                let driver = if selling == SellingMode::Weight { weight } else { count };
                prop_assert!(driver.is_some_and(|d| d > Decimal::ZERO));
                if bya3a == Bya3aMode::PerUnit {
                    prop_assert!(count.is_some_and(|c| c > Decimal::ZERO));
                }
            }
        }
    }
}

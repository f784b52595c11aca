//! # Treasury
//!
//! The agency's cash box. Entries are always positive; the type says which
//! way the money moved.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Locale;
use crate::validation::{validate_label, validate_notes, validate_positive_amount, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TreasuryEntryType {
    Deposit,
    Withdrawal,
}

impl TreasuryEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreasuryEntryType::Deposit => "deposit",
            TreasuryEntryType::Withdrawal => "withdrawal",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (TreasuryEntryType::Deposit, Locale::Ar) => "إيداع",
            (TreasuryEntryType::Withdrawal, Locale::Ar) => "سحب",
            (TreasuryEntryType::Deposit, Locale::En) => "Deposit",
            (TreasuryEntryType::Withdrawal, Locale::En) => "Withdrawal",
        }
    }

    /// Effect of an entry of this type on the cash balance.
    fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TreasuryEntryType::Deposit => amount.abs(),
            TreasuryEntryType::Withdrawal => -amount.abs(),
        }
    }
}

/// A persisted treasury entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: TreasuryEntryType,
    pub amount: Decimal,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A treasury entry about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTreasuryEntry {
    #[serde(rename = "type")]
    pub entry_type: TreasuryEntryType,
    pub amount: Decimal,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTreasuryEntry {
    pub fn new(
        entry_type: TreasuryEntryType,
        amount: Decimal,
        date: &str,
        notes: Option<&str>,
    ) -> ValidationResult<Self> {
        validate_positive_amount("amount", amount)?;
        validate_label("date", date)?;
        validate_notes(notes)?;

        Ok(NewTreasuryEntry {
            entry_type,
            amount,
            date: date.trim().to_string(),
            notes: notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        })
    }
}

/// Deposits minus withdrawals, rounded to cents.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use wekala_core::treasury::{treasury_balance, TreasuryEntry, TreasuryEntryType};
///
/// let entry = |entry_type, amount: i64| TreasuryEntry {
///     id: String::new(),
///     entry_type,
///     amount: Decimal::from(amount),
///     date: "2024-03-01".to_string(),
///     notes: None,
///     created_at: None,
/// };
///
/// let entries = [
///     entry(TreasuryEntryType::Deposit, 1000),
///     entry(TreasuryEntryType::Withdrawal, 250),
/// ];
/// assert_eq!(treasury_balance(&entries).cents(), 75000);
/// ```
pub fn treasury_balance(entries: &[TreasuryEntry]) -> Money {
    Money::from_decimal_sum(
        entries
            .iter()
            .map(|entry| entry.entry_type.signed(entry.amount)),
    )
}

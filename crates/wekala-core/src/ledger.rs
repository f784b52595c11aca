//! # Customer Ledger
//!
//! Every money movement between the agency and a customer is one signed
//! ledger entry.
//!
//! ## Sign Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  amount > 0  →  DEBIT   the customer owes the agency  (sale)            │
//! │  amount < 0  →  CREDIT  the agency owes / was paid     (receipt)        │
//! │                                                                         │
//! │  balance = Σ amount      > 0 customer owes, < 0 customer is in credit  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Locale;
use crate::validation::{
    validate_label, validate_notes, validate_positive_amount, validate_reference,
    ValidationResult,
};

// =============================================================================
// Entry Type
// =============================================================================

/// Kind of ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryType {
    Sale,
    Receipt,
    /// A discount granted after the fact.
    Allowance,
    OpeningBalance,
}

impl LedgerEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Sale => "sale",
            LedgerEntryType::Receipt => "receipt",
            LedgerEntryType::Allowance => "allowance",
            LedgerEntryType::OpeningBalance => "opening_balance",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (LedgerEntryType::Sale, Locale::Ar) => "بيع",
            (LedgerEntryType::Receipt, Locale::Ar) => "تحصيل",
            (LedgerEntryType::Allowance, Locale::Ar) => "سماح",
            (LedgerEntryType::OpeningBalance, Locale::Ar) => "رصيد افتتاحي",
            (LedgerEntryType::Sale, Locale::En) => "Sale",
            (LedgerEntryType::Receipt, Locale::En) => "Receipt",
            (LedgerEntryType::Allowance, Locale::En) => "Allowance",
            (LedgerEntryType::OpeningBalance, Locale::En) => "Opening balance",
        }
    }

    /// The amount as it must be stored for this entry type.
    ///
    /// Receipts and allowances are credits, sales are debits. An opening
    /// balance may go either way and keeps its sign.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use wekala_core::ledger::LedgerEntryType;
    ///
    /// let paid = Decimal::from(500);
    /// assert_eq!(LedgerEntryType::Receipt.signed_amount(paid), -paid);
    /// assert_eq!(LedgerEntryType::Receipt.signed_amount(-paid), -paid);
    /// ```
    pub fn signed_amount(&self, amount: Decimal) -> Decimal {
        match self {
            LedgerEntryType::Sale => amount.abs(),
            LedgerEntryType::Receipt | LedgerEntryType::Allowance => -amount.abs(),
            LedgerEntryType::OpeningBalance => amount,
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Entries
// =============================================================================

/// A persisted ledger entry as the backend lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: LedgerEntryType,
    pub amount: Decimal,
    /// Business date as entered on the form.
    pub date: String,
    #[serde(default)]
    pub reference_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LedgerEntry {
    pub fn side(&self) -> BalanceSide {
        BalanceSide::of(Money::from_decimal(self.amount))
    }
}

/// A ledger entry about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    pub customer_id: String,
    #[serde(rename = "type")]
    pub entry_type: LedgerEntryType,
    pub amount: Decimal,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewLedgerEntry {
    /// A payment received from a customer.
    ///
    /// The amount is entered as a positive number and stored as a credit.
    pub fn receipt(
        customer_id: &str,
        amount: Decimal,
        date: &str,
        notes: Option<&str>,
    ) -> ValidationResult<Self> {
        validate_reference("customer", customer_id)?;
        validate_positive_amount("amount", amount)?;
        validate_label("date", date)?;
        validate_notes(notes)?;

        let notes = notes.map(str::trim).filter(|n| !n.is_empty());

        Ok(NewLedgerEntry {
            customer_id: customer_id.trim().to_string(),
            entry_type: LedgerEntryType::Receipt,
            amount: LedgerEntryType::Receipt.signed_amount(amount),
            date: date.trim().to_string(),
            notes: notes.map(str::to_string),
        })
    }
}

// =============================================================================
// Balance
// =============================================================================

/// Which way a balance leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSide {
    /// The customer owes the agency.
    Debit,
    /// The agency holds the customer's money.
    Credit,
    Settled,
}

impl BalanceSide {
    pub fn of(balance: Money) -> Self {
        if balance.is_positive() {
            BalanceSide::Debit
        } else if balance.is_negative() {
            BalanceSide::Credit
        } else {
            BalanceSide::Settled
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (BalanceSide::Debit, Locale::Ar) => "مدين",
            (BalanceSide::Credit, Locale::Ar) => "دائن",
            (BalanceSide::Settled, Locale::Ar) => "خالص",
            (BalanceSide::Debit, Locale::En) => "Debit",
            (BalanceSide::Credit, Locale::En) => "Credit",
            (BalanceSide::Settled, Locale::En) => "Settled",
        }
    }
}

/// Sum of all entry amounts, rounded to cents.
pub fn customer_balance(entries: &[LedgerEntry]) -> Money {
    Money::from_decimal_sum(entries.iter().map(|entry| entry.amount))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CUSTOMER: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn entry(entry_type: LedgerEntryType, amount: Decimal) -> LedgerEntry {
        LedgerEntry {
            id: uuid::Uuid::new_v4().to_string(),
            entry_type,
            amount,
            date: "2024-03-01T09:30".to_string(),
            reference_type: None,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(LedgerEntryType::Sale.signed_amount(dec!(-40)), dec!(40));
        assert_eq!(LedgerEntryType::Receipt.signed_amount(dec!(40)), dec!(-40));
        assert_eq!(LedgerEntryType::Allowance.signed_amount(dec!(5)), dec!(-5));
        assert_eq!(LedgerEntryType::OpeningBalance.signed_amount(dec!(-12)), dec!(-12));
    }

    #[test]
    fn test_customer_balance() {
        let entries = vec![
            entry(LedgerEntryType::OpeningBalance, dec!(100)),
            entry(LedgerEntryType::Sale, dec!(556.00)),
            entry(LedgerEntryType::Receipt, dec!(-300)),
            entry(LedgerEntryType::Allowance, dec!(-6.005)),
        ];

        let balance = customer_balance(&entries);
        // 349.995 rounds up once, at the end
        assert_eq!(balance.cents(), 35000);
        assert_eq!(BalanceSide::of(balance), BalanceSide::Debit);
        assert!(customer_balance(&[]).is_zero());
    }

    #[test]
    fn test_balance_side() {
        assert_eq!(BalanceSide::of(Money::from_cents(-1)), BalanceSide::Credit);
        assert_eq!(BalanceSide::of(Money::zero()), BalanceSide::Settled);
        assert_eq!(entry(LedgerEntryType::Receipt, dec!(-20)).side(), BalanceSide::Credit);
        assert_eq!(BalanceSide::Settled.label(Locale::Ar), "خالص");
    }

    #[test]
    fn test_receipt_is_stored_as_credit() {
        let receipt = NewLedgerEntry::receipt(CUSTOMER, dec!(250), "2024-03-02", Some("  "))
            .unwrap();
        assert_eq!(receipt.entry_type, LedgerEntryType::Receipt);
        assert_eq!(receipt.amount, dec!(-250));
        assert_eq!(receipt.notes, None);

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["type"], "receipt");
        assert_eq!(json["customerId"], CUSTOMER);
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_receipt_validation() {
        assert!(NewLedgerEntry::receipt(CUSTOMER, dec!(0), "2024-03-02", None).is_err());
        assert!(NewLedgerEntry::receipt(CUSTOMER, dec!(-10), "2024-03-02", None).is_err());
        assert!(NewLedgerEntry::receipt("", dec!(10), "2024-03-02", None).is_err());
        assert!(NewLedgerEntry::receipt(CUSTOMER, dec!(10), " ", None).is_err());
    }

    #[test]
    fn test_entry_from_backend_json() {
        let json = r#"{
            "id": "e1",
            "type": "opening_balance",
            "amount": -75.5,
            "date": "2024-01-01",
            "reference_type": null,
            "notes": "رصيد سابق",
            "created_at": "2024-01-01T08:00:00Z"
        }"#;

        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.entry_type, LedgerEntryType::OpeningBalance);
        assert_eq!(entry.amount, dec!(-75.5));
        assert_eq!(entry.side(), BalanceSide::Credit);
        assert!(entry.created_at.is_some());
        assert_eq!(entry.entry_type.label(Locale::Ar), "رصيد افتتاحي");
    }
}

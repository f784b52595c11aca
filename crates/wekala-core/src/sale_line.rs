//! # Sale Line Module
//!
//! One row of the sell sheet: what was sold from a car, to whom, and for how
//! much.
//!
//! ## Row Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SaleLine::new() ──► apply(edit) ──► apply(edit) ──► ... (total live)   │
//! │                                                         │               │
//! │                                 validate_fields() + validate_for_submit │
//! │                                                         │               │
//! │                                  to_create_request(car) ──► backend     │
//! │                                                         │               │
//! │                                     mark_saved(id) ──► history          │
//! │                                                                         │
//! │  Backend row (SaleLineRecord) ──► SaleLine::from_record() (recomputed)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `total` has no setter: every edit goes through [`SaleLine::apply`], which
//! recomputes it with [`compute_total`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::{compute_total, SaleLineCalcInput, SaleLineSubmitInput};
use crate::types::{Bya3aMode, SellingMode};
use crate::validation::{
    validate_label, validate_non_negative, validate_reference, ValidationResult,
};
use crate::MAX_LABEL_LEN;

// =============================================================================
// Sale Line
// =============================================================================

/// An editable sale line.
///
/// Quantities are stored as entered; an empty input is zero, exactly as the
/// sell sheet shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// Local row key, stable for the lifetime of the row on the sheet.
    #[ts(type = "string")]
    key: Uuid,
    /// Backend id, set once the line has been persisted.
    id: Option<String>,
    item: String,
    #[ts(type = "number")]
    count: Decimal,
    /// Unit label, e.g. "باكت" or "قفص".
    package_or_piece: String,
    grade: String,
    #[ts(type = "number")]
    weight: Decimal,
    #[ts(type = "number")]
    price: Decimal,
    selling_mode: SellingMode,
    bya3a_mode: Bya3aMode,
    #[ts(type = "number")]
    bya3a_value: Decimal,
    total: Money,
    customer_id: String,
    /// Empty when no seller is assigned.
    seller_id: String,
}

/// A single field edit on a sale line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SaleLineEdit {
    Item(String),
    Count(Decimal),
    PackageOrPiece(String),
    Grade(String),
    Weight(Decimal),
    Price(Decimal),
    SellingMode(SellingMode),
    Bya3aMode(Bya3aMode),
    Bya3aValue(Decimal),
    Customer(String),
    Seller(String),
}

impl SaleLine {
    /// Creates an empty, unsaved row with the given modes.
    pub fn new(selling_mode: SellingMode, bya3a_mode: Bya3aMode) -> Self {
        SaleLine {
            key: Uuid::new_v4(),
            id: None,
            item: String::new(),
            count: Decimal::ZERO,
            package_or_piece: String::new(),
            grade: String::new(),
            weight: Decimal::ZERO,
            price: Decimal::ZERO,
            selling_mode,
            bya3a_mode,
            bya3a_value: Decimal::ZERO,
            total: Money::zero(),
            customer_id: String::new(),
            seller_id: String::new(),
        }
    }

    /// Loads a persisted row, filling gaps the way the sell sheet does.
    ///
    /// The total is recomputed from the fields; compare with
    /// [`SaleLineRecord::stored_total`] to detect a drifted stored value.
    pub fn from_record(record: SaleLineRecord) -> Self {
        let mut line = SaleLine {
            key: Uuid::new_v4(),
            id: Some(record.id),
            item: record.item.unwrap_or_default(),
            count: record.count.unwrap_or_default(),
            package_or_piece: record.package_or_piece.unwrap_or_default(),
            grade: record.grade.unwrap_or_default(),
            weight: record.weight.unwrap_or_default(),
            price: record.price.unwrap_or_default(),
            selling_mode: record.selling_mode.unwrap_or_default(),
            bya3a_mode: record.bya3a_mode.unwrap_or_default(),
            bya3a_value: record.bya3a_value.unwrap_or_default(),
            total: Money::zero(),
            customer_id: record.customer_id.unwrap_or_default(),
            seller_id: record.seller_id.unwrap_or_default(),
        };
        line.recompute();
        line
    }

    /// Applies one edit and recomputes the total.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use wekala_core::sale_line::{SaleLine, SaleLineEdit};
    /// use wekala_core::types::{Bya3aMode, SellingMode};
    ///
    /// let mut line = SaleLine::new(SellingMode::Piece, Bya3aMode::Fixed);
    /// line.apply(SaleLineEdit::Count(Decimal::from(4)));
    /// line.apply(SaleLineEdit::Price(Decimal::new(1250, 2)));
    /// assert_eq!(line.total().cents(), 5000);
    /// ```
    pub fn apply(&mut self, edit: SaleLineEdit) {
        match edit {
            SaleLineEdit::Item(item) => self.item = item,
            SaleLineEdit::Count(count) => self.count = count,
            SaleLineEdit::PackageOrPiece(label) => self.package_or_piece = label,
            SaleLineEdit::Grade(grade) => self.grade = grade,
            SaleLineEdit::Weight(weight) => self.weight = weight,
            SaleLineEdit::Price(price) => self.price = price,
            SaleLineEdit::SellingMode(mode) => self.selling_mode = mode,
            SaleLineEdit::Bya3aMode(mode) => self.bya3a_mode = mode,
            SaleLineEdit::Bya3aValue(value) => self.bya3a_value = value,
            SaleLineEdit::Customer(id) => self.customer_id = id,
            SaleLineEdit::Seller(id) => self.seller_id = id,
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total = compute_total(&self.calc_input());
    }

    /// Records the backend id after a successful save.
    pub fn mark_saved(&mut self, id: String) {
        self.id = Some(id);
    }

    /// Pricing inputs for this row.
    pub fn calc_input(&self) -> SaleLineCalcInput {
        SaleLineCalcInput {
            selling_mode: self.selling_mode,
            bya3a_mode: self.bya3a_mode,
            price: self.price,
            bya3a_value: self.bya3a_value,
            weight: Some(self.weight),
            count: Some(self.count),
        }
    }

    /// Submit-gate inputs for this row.
    pub fn submit_input(&self) -> SaleLineSubmitInput {
        SaleLineSubmitInput::from(&self.calc_input())
    }

    /// Field checks from the sell sheet form, in form order.
    pub fn validate_fields(&self) -> ValidationResult<()> {
        validate_label("item", &self.item)?;
        validate_non_negative("count", self.count)?;
        validate_label("package_or_piece", &self.package_or_piece)?;
        if self.grade.trim().chars().count() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field: "grade".to_string(),
                max: MAX_LABEL_LEN,
            });
        }
        validate_non_negative("weight", self.weight)?;
        validate_non_negative("price", self.price)?;
        validate_non_negative("bya3a_value", self.bya3a_value)?;
        validate_reference("customer", &self.customer_id)?;
        if !self.seller_id.trim().is_empty() {
            validate_reference("seller", &self.seller_id)?;
        }

        Ok(())
    }

    /// Whether the sheet should offer to save this row.
    ///
    /// Unsaved, has a customer and an item, and a positive total.
    pub fn is_ready_to_save(&self) -> bool {
        !self.is_saved()
            && !self.customer_id.trim().is_empty()
            && !self.item.trim().is_empty()
            && self.total.is_positive()
    }

    /// Builds the persistence request for this row.
    ///
    /// The weight is only sent when selling by weight; empty grade and
    /// seller are left out.
    pub fn to_create_request(&self, car_id: &str) -> CreateSaleLineRequest {
        let non_empty = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        CreateSaleLineRequest {
            car_id: car_id.to_string(),
            customer_id: self.customer_id.trim().to_string(),
            seller_id: non_empty(&self.seller_id),
            item: self.item.trim().to_string(),
            count: self.count,
            package_or_piece: self.package_or_piece.trim().to_string(),
            grade: non_empty(&self.grade),
            weight: (self.selling_mode == SellingMode::Weight).then_some(self.weight),
            price: self.price,
            selling_mode: self.selling_mode,
            bya3a_mode: self.bya3a_mode,
            bya3a_value: self.bya3a_value,
            total: self.total.to_decimal(),
        }
    }

    pub fn key(&self) -> Uuid {
        self.key
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn count(&self) -> Decimal {
        self.count
    }

    pub fn package_or_piece(&self) -> &str {
        &self.package_or_piece
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn selling_mode(&self) -> SellingMode {
        self.selling_mode
    }

    pub fn bya3a_mode(&self) -> Bya3aMode {
        self.bya3a_mode
    }

    pub fn bya3a_value(&self) -> Decimal {
        self.bya3a_value
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn seller_id(&self) -> &str {
        &self.seller_id
    }
}

impl Default for SaleLine {
    fn default() -> Self {
        SaleLine::new(SellingMode::default(), Bya3aMode::default())
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Body of the `create-sale-line` backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleLineRequest {
    pub car_id: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    pub item: String,
    pub count: Decimal,
    pub package_or_piece: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    pub price: Decimal,
    pub selling_mode: SellingMode,
    pub bya3a_mode: Bya3aMode,
    pub bya3a_value: Decimal,
    pub total: Decimal,
}

/// A sale line as the backend lists it (snake_case, nullable columns).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleLineRecord {
    pub id: String,
    pub item: Option<String>,
    pub count: Option<Decimal>,
    pub package_or_piece: Option<String>,
    pub grade: Option<String>,
    pub weight: Option<Decimal>,
    pub price: Option<Decimal>,
    pub selling_mode: Option<SellingMode>,
    pub bya3a_mode: Option<Bya3aMode>,
    pub bya3a_value: Option<Decimal>,
    pub total: Option<Decimal>,
    pub customer_id: Option<String>,
    pub seller_id: Option<String>,
}

impl SaleLineRecord {
    /// The total the backend stored, rounded to money precision.
    pub fn stored_total(&self) -> Option<Money> {
        self.total.map(Money::from_decimal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for wekala-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wekala-core errors (this file)                                        │
//! │  ├── CoreError        - Sell sheet / domain orchestration errors       │
//! │  ├── SubmitRejection  - Sale line not ready for submission             │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  wekala-desk errors (app crate)                                        │
//! │  ├── BackendError     - Remote backend call failures                   │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: SubmitRejection → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself has no error type: `compute_total` always produces a value.

use thiserror::Error;

use crate::types::Locale;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale line was saved before any car was selected.
    #[error("Select a car before saving sale lines")]
    CarNotSelected,

    /// No row at the given position on the sell sheet.
    #[error("Sale line not found: {0}")]
    SaleLineNotFound(String),

    /// The row has already been persisted and can no longer be submitted.
    #[error("Sale line {id} is already saved")]
    SaleLineAlreadySaved { id: String },

    /// The sale line failed the submit-time gate.
    #[error(transparent)]
    Rejected(#[from] SubmitRejection),

    /// The row lacks a customer or an item, or its total is not above zero.
    #[error("Sale line needs a customer, an item and a total above zero")]
    NotReadyToSave,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Message suitable for the given display locale.
    ///
    /// Only errors that carry a translated wording differ from `Display`.
    pub fn localized(&self, locale: Locale) -> String {
        match self {
            CoreError::CarNotSelected => match locale {
                Locale::Ar => "اختر العربية أولاً.".to_string(),
                Locale::En => self.to_string(),
            },
            CoreError::Rejected(rejection) => rejection.message(locale).to_string(),
            CoreError::NotReadyToSave => match locale {
                Locale::Ar => "أكمل العميل والصنف، والإجمالي يجب أن يكون أكبر من صفر.".to_string(),
                Locale::En => self.to_string(),
            },
            CoreError::Validation(err) => err.localized(locale),
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Submit Rejection
// =============================================================================

/// Why a sale line may not be submitted yet.
///
/// Returned by [`crate::pricing::validate_for_submit`]. Only the first failing
/// rule is reported; the caller re-validates after each fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    /// Selling by weight with a missing or non-positive weight.
    #[error("weight is required and must be greater than zero when selling by weight")]
    WeightRequired,

    /// Selling by piece or package with a missing or non-positive count.
    #[error("count is required and must be greater than zero")]
    CountRequired,

    /// Per-unit bya3a with a missing or non-positive count.
    #[error("count is required for per-unit bya3a")]
    CountRequiredForPerUnit,
}

impl SubmitRejection {
    /// The rejection reason in the given locale.
    pub fn message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SubmitRejection::WeightRequired, Locale::Ar) => {
                "الوزن مطلوب ويجب أن يكون أكبر من صفر عند البيع بالوزن."
            }
            (SubmitRejection::CountRequired, Locale::Ar) => {
                "العدد مطلوب ويجب أن يكون أكبر من صفر."
            }
            (SubmitRejection::CountRequiredForPerUnit, Locale::Ar) => {
                "العدد مطلوب للبيعة بالوحدة."
            }
            (SubmitRejection::WeightRequired, Locale::En) => {
                "weight is required and must be greater than zero when selling by weight"
            }
            (SubmitRejection::CountRequired, Locale::En) => {
                "count is required and must be greater than zero"
            }
            (SubmitRejection::CountRequiredForPerUnit, Locale::En) => {
                "count is required for per-unit bya3a"
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A list needs at least one usable entry.
    #[error("{field} needs at least one entry")]
    Empty { field: String },
}

impl ValidationError {
    /// Message in the given display locale.
    ///
    /// English uses `Display`; Arabic names the field the way the forms do.
    pub fn localized(&self, locale: Locale) -> String {
        if locale == Locale::En {
            return self.to_string();
        }

        match self {
            ValidationError::Required { field } => format!("{} مطلوب", field_label_ar(field)),
            ValidationError::TooLong { field, max } => {
                format!("{} يجب ألا يزيد عن {} حرفاً", field_label_ar(field), max)
            }
            ValidationError::MustBePositive { field } => {
                format!("{} يجب أن يكون أكبر من صفر", field_label_ar(field))
            }
            ValidationError::MustNotBeNegative { field } => {
                format!("{} لا يمكن أن يكون سالباً", field_label_ar(field))
            }
            ValidationError::InvalidFormat { field, .. } => {
                format!("{} غير صالح", field_label_ar(field))
            }
            ValidationError::Empty { field } if field == "lines" => {
                "أضف صنفاً واحداً على الأقل (البند غير فارغ).".to_string()
            }
            ValidationError::Empty { field } => {
                format!("{}: أضف عنصراً واحداً على الأقل", field_label_ar(field))
            }
        }
    }
}

/// Arabic form label for a validated field name.
fn field_label_ar(field: &str) -> &str {
    match field {
        "item" => "الصنف",
        "count" => "العدد",
        "package_or_piece" => "الوحدة",
        "grade" => "الدرجة",
        "weight" => "الوزن",
        "price" => "السعر",
        "bya3a_value" => "البيعة",
        "customer" => "العميل",
        "seller" => "البائع",
        "car" => "العربية",
        "amount" => "المبلغ",
        "date" => "التاريخ",
        "notes" => "الملاحظات",
        "supplier" | "supplier_id" => "المورد",
        "total_weight_kg" => "الوزن الإجمالي",
        other => other,
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

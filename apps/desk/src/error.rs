//! # API Error Type
//!
//! Unified error type for desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Wekala                                 │
//! │                                                                         │
//! │  Frontend                    Rust                                       │
//! │  ────────                    ────                                       │
//! │                                                                         │
//! │  invoke('save_line', { index: 2 })                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rejected? ─── SubmitRejection::WeightRequired ──┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Backend down? ─── BackendError::Unavailable ── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code = "SALE_LINE_REJECTED"                                          │
//! │  e.message = "الوزن مطلوب ويجب أن يكون أكبر من صفر عند البيع بالوزن."   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use wekala_core::{CoreError, Locale, ValidationError};

use crate::backend::BackendError;

/// API error returned from desk commands.
///
/// ```json
/// {
///   "code": "CAR_NOT_SELECTED",
///   "message": "اختر العربية أولاً."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Sale line failed the submit gate
    SaleLineRejected,

    /// No car selected on the sell sheet
    CarNotSelected,

    /// Business rule violated (422)
    BusinessLogic,

    /// Session missing or expired (401)
    Unauthorized,

    /// Remote backend failed (502)
    BackendError,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Maps a field validation failure into the display locale.
    pub fn invalid(err: ValidationError, locale: Locale) -> Self {
        ApiError::from_core(CoreError::Validation(err), locale)
    }

    /// Maps a core error, translating the messages that have a wording in
    /// the display locale.
    pub fn from_core(err: CoreError, locale: Locale) -> Self {
        let message = err.localized(locale);
        let code = match &err {
            CoreError::CarNotSelected => ErrorCode::CarNotSelected,
            CoreError::SaleLineNotFound(_) => ErrorCode::NotFound,
            CoreError::SaleLineAlreadySaved { .. } => ErrorCode::BusinessLogic,
            CoreError::Rejected(_) | CoreError::NotReadyToSave => ErrorCode::SaleLineRejected,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, message)
    }
}

/// Converts core errors using the default display locale.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::from_core(err, Locale::default())
    }
}

/// Converts validation errors using the default display locale.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::from_core(CoreError::Validation(err), Locale::default())
    }
}

/// Converts backend errors to API errors.
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            BackendError::Rejected(message) => ApiError::new(ErrorCode::BusinessLogic, message),
            BackendError::Unauthorized => {
                ApiError::new(ErrorCode::Unauthorized, "Session expired, sign in again")
            }
            BackendError::Unavailable(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Backend unavailable: {}", e);
                ApiError::new(ErrorCode::BackendError, "Backend is unavailable")
            }
            BackendError::InvalidResponse(e) => {
                tracing::error!("Invalid backend response: {}", e);
                ApiError::new(ErrorCode::BackendError, "Backend operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

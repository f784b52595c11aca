//! # wekala-core: Pure Business Logic for Wekala
//!
//! This crate holds the business rules of the commission agency back office
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Wekala Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Admin Frontend                               │   │
//! │  │    Cars ──► Sell Sheet ──► Customer Statement ──► Treasury      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    wekala-desk (commands, state)                │   │
//! │  │    add_line, update_line, save_line, record_receipt, ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ wekala-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │ sale_line │  │  ledger   │  │   │
//! │  │   │  total    │  │   Money   │  │  SaleLine │  │ treasury  │  │   │
//! │  │   │  submit   │  │  round2   │  │  request  │  │  balance  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO BACKEND • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Sale-line total and submit-time validation
//! - [`money`] - Money type with integer hundredths
//! - [`types`] - Selling and bya3a modes, display locale
//! - [`sale_line`] - Editable sale-line row and its persistence request
//! - [`car`] - Incoming car registration and manifest
//! - [`ledger`] - Customer ledger entries and balance
//! - [`treasury`] - Cash treasury entries and balance
//! - [`validation`] - Field-level validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use wekala_core::pricing::{compute_total, SaleLineCalcInput};
//! use wekala_core::types::{Bya3aMode, SellingMode};
//!
//! // 10 packages at 2.50 with a 0.20 per-unit bya3a
//! let input = SaleLineCalcInput {
//!     selling_mode: SellingMode::Package,
//!     bya3a_mode: Bya3aMode::PerUnit,
//!     price: Decimal::new(250, 2),
//!     bya3a_value: Decimal::new(20, 2),
//!     weight: None,
//!     count: Some(Decimal::from(10)),
//! };
//!
//! assert_eq!(compute_total(&input).cents(), 2700);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod car;
pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod sale_line;
pub mod treasury;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use car::{CarManifestLine, NewCar};
pub use error::{CoreError, SubmitRejection, ValidationError};
pub use ledger::{customer_balance, BalanceSide, LedgerEntry, LedgerEntryType, NewLedgerEntry};
pub use money::Money;
pub use pricing::{compute_total, validate_for_submit, SaleLineCalcInput, SaleLineSubmitInput};
pub use sale_line::{CreateSaleLineRequest, SaleLine, SaleLineEdit, SaleLineRecord};
pub use treasury::{treasury_balance, NewTreasuryEntry, TreasuryEntry, TreasuryEntryType};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of free-text labels (item name, unit label, grade, supplier).
pub const MAX_LABEL_LEN: usize = 100;

/// Maximum length of notes attached to ledger and treasury entries.
pub const MAX_NOTES_LEN: usize = 500;

//! # State Module
//!
//! Application state for the desk app, split into focused types so each
//! command asks only for what it uses.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │       SheetState         │        │       DeskConfig         │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<SaleSheet>>   │        │  agency_name             │      │
//! │  │    car_id                │        │  currency_symbol         │      │
//! │  │    lines: Vec<SaleLine>  │        │  locale, default modes   │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SheetState: Protected by Arc<Mutex<T>> for exclusive access         │
//! │  • DeskConfig: Read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod sheet;

pub use config::DeskConfig;
pub use sheet::{SaleSheet, SaveOutcome, SheetState, SheetTotals};

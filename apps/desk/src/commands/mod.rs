//! # Commands Module
//!
//! All commands exposed to the admin frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── sale_line.rs  ◄─── Sell sheet: select car, edit, save, delete
//! ├── car.rs        ◄─── Incoming car registration
//! ├── ledger.rs     ◄─── Customer statement, receipts
//! ├── treasury.rs   ◄─── Cash box entries and balance
//! └── config.rs     ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the sheet
//! fn get_sheet(sheet: &SheetState)
//!
//! // Needs the sheet, the locale for messages and the backend
//! fn save_line(sheet: &SheetState, config: &DeskConfig, backend: &dyn Backend, index: usize)
//!
//! // No sheet at all
//! fn treasury_summary(config: &DeskConfig, backend: &dyn Backend)
//! ```

pub mod car;
pub mod config;
pub mod ledger;
pub mod sale_line;
pub mod treasury;

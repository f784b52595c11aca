//! # Wekala Desk Library
//!
//! Application layer of the Wekala back office: the sell sheet being edited,
//! configuration, logging, and the commands the admin frontend invokes.
//!
//! ## Module Organization
//! ```text
//! wekala_desk/
//! ├── lib.rs          ◄─── You are here (logging setup, exports)
//! ├── backend.rs      ◄─── Backend trait + in-memory implementation
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── sheet.rs    ◄─── Sell sheet state
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── sale_line.rs
//! │   ├── car.rs
//! │   ├── ledger.rs
//! │   ├── treasury.rs
//! │   └── config.rs
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup
//! ```rust
//! use wekala_desk::backend::InMemoryBackend;
//! use wekala_desk::commands::sale_line;
//! use wekala_desk::state::{DeskConfig, SheetState};
//!
//! wekala_desk::init_tracing();
//!
//! let config = DeskConfig::from_env();
//! let sheet = SheetState::from_config(&config);
//! let backend = InMemoryBackend::new();
//!
//! let car_id = "6ba7b811-9dad-11d1-80b4-00c04fd430c8".to_string();
//! sale_line::select_car(&sheet, &backend, Some(car_id)).unwrap();
//!
//! let response = sale_line::add_line(&sheet);
//! assert_eq!(response.lines.len(), 1);
//! assert!(response.car_id.is_some());
//! ```

pub mod backend;
pub mod commands;
pub mod error;
pub mod state;

use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use backend::{Backend, BackendError, InMemoryBackend};
pub use error::{ApiError, ErrorCode};
pub use state::{DeskConfig, SheetState};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=wekala=trace` - Show trace for wekala crates only
/// - Default: INFO, DEBUG for wekala crates
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wekala=debug"));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        debug!("tracing subscriber already installed");
    }
}

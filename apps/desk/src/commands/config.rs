//! # Config Commands

use tracing::debug;

use crate::state::DeskConfig;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (agency name, locale for the UI)
/// - Currency formatting on the frontend
pub fn get_config(config: &DeskConfig) -> DeskConfig {
    debug!("get_config command");
    config.clone()
}

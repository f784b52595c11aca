//! # Treasury Commands

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wekala_core::treasury::{treasury_balance, NewTreasuryEntry, TreasuryEntry, TreasuryEntryType};
use wekala_core::Money;

use crate::backend::Backend;
use crate::error::ApiError;
use crate::state::DeskConfig;

/// Cash box contents and balance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasurySummary {
    pub entries: Vec<TreasuryEntry>,
    pub balance: Money,
    pub balance_display: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryEntryRequest {
    #[serde(rename = "type")]
    pub entry_type: TreasuryEntryType,
    pub amount: Decimal,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Gets all treasury entries and the current balance.
pub fn treasury_summary(
    config: &DeskConfig,
    backend: &dyn Backend,
) -> Result<TreasurySummary, ApiError> {
    debug!("treasury_summary command");

    let entries = backend.list_treasury_entries()?;
    Ok(build_summary(config, entries))
}

/// Records a deposit or withdrawal and returns the refreshed summary.
pub fn record_treasury_entry(
    config: &DeskConfig,
    backend: &dyn Backend,
    request: TreasuryEntryRequest,
) -> Result<TreasurySummary, ApiError> {
    debug!(entry_type = %request.entry_type.as_str(), amount = %request.amount, "record_treasury_entry command");

    let entry = NewTreasuryEntry::new(
        request.entry_type,
        request.amount,
        &request.date,
        request.notes.as_deref(),
    )
    .map_err(|e| ApiError::invalid(e, config.locale))?;

    let id = backend.create_treasury_entry(&entry)?;
    info!(id = %id, entry_type = %entry.entry_type.as_str(), amount = %entry.amount, "treasury entry recorded");

    treasury_summary(config, backend)
}

fn build_summary(config: &DeskConfig, entries: Vec<TreasuryEntry>) -> TreasurySummary {
    let balance = treasury_balance(&entries);
    TreasurySummary {
        entries,
        balance,
        balance_display: config.format_money(balance),
    }
}

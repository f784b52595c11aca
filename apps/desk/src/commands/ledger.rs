//! # Ledger Commands
//!
//! Customer statement and payment collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wekala_core::ledger::{customer_balance, BalanceSide, LedgerEntry, NewLedgerEntry};
use wekala_core::validation::validate_reference;
use wekala_core::Money;

use crate::backend::Backend;
use crate::error::ApiError;
use crate::state::DeskConfig;

/// One statement row with its display label.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    pub type_label: String,
}

/// A customer's ledger with its running balance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStatement {
    pub customer_id: String,
    pub entries: Vec<StatementLine>,
    pub balance: Money,
    pub side: BalanceSide,
    /// e.g. "350.00 ج.م"
    pub balance_display: String,
    pub side_label: String,
}

/// Payment collected from a customer, as typed on the collection form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    pub customer_id: String,
    /// Positive; stored as a credit.
    pub amount: Decimal,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Gets a customer's statement.
pub fn customer_statement(
    config: &DeskConfig,
    backend: &dyn Backend,
    customer_id: String,
) -> Result<CustomerStatement, ApiError> {
    debug!(customer_id = %customer_id, "customer_statement command");

    validate_reference("customer", &customer_id)
        .map_err(|e| ApiError::invalid(e, config.locale))?;
    let entries = backend.get_customer_ledger(customer_id.trim())?;

    Ok(build_statement(config, customer_id.trim().to_string(), entries))
}

/// Records a receipt and returns the refreshed statement.
pub fn record_receipt(
    config: &DeskConfig,
    backend: &dyn Backend,
    request: ReceiptRequest,
) -> Result<CustomerStatement, ApiError> {
    debug!(customer_id = %request.customer_id, amount = %request.amount, "record_receipt command");

    let entry = NewLedgerEntry::receipt(
        &request.customer_id,
        request.amount,
        &request.date,
        request.notes.as_deref(),
    )
    .map_err(|e| ApiError::invalid(e, config.locale))?;

    let id = backend.create_ledger_entry(&entry)?;
    info!(id = %id, customer_id = %entry.customer_id, amount = %entry.amount, "receipt recorded");

    let entries = backend.get_customer_ledger(&entry.customer_id)?;
    Ok(build_statement(config, entry.customer_id, entries))
}

fn build_statement(
    config: &DeskConfig,
    customer_id: String,
    entries: Vec<LedgerEntry>,
) -> CustomerStatement {
    let balance = customer_balance(&entries);
    let side = BalanceSide::of(balance);

    CustomerStatement {
        customer_id,
        entries: entries
            .into_iter()
            .map(|entry| StatementLine {
                type_label: entry.entry_type.label(config.locale).to_string(),
                entry,
            })
            .collect(),
        balance,
        side,
        balance_display: config.format_money(balance),
        side_label: side.label(config.locale).to_string(),
    }
}

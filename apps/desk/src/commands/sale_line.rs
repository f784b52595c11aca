//! # Sale Line Commands
//!
//! Commands behind the sell sheet.
//!
//! ## Sheet Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  select  │────►│  edit    │────►│  save    │────►│  saved   │       │
//! │  │  car     │     │  rows    │     │  row     │     │  history │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                │                 │             │
//! │                   add_line         validate +        delete_saved_line  │
//! │                   update_line      create-sale-line                     │
//! │                   remove_line                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sheet lock is not held during backend calls. A save is recorded on
//! the row with the same key only if that row and the car are unchanged.

use serde::Serialize;
use tracing::{debug, info, warn};
use wekala_core::validation::validate_reference;
use wekala_core::{validate_for_submit, CoreError, SaleLine, SaleLineEdit};

use crate::backend::Backend;
use crate::error::ApiError;
use crate::state::{DeskConfig, SaleSheet, SaveOutcome, SheetState, SheetTotals};

/// A sheet row as the frontend renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    #[serde(flatten)]
    pub line: SaleLine,
    /// Whether the save button is enabled for this row.
    pub ready_to_save: bool,
    pub selling_mode_label: String,
    pub bya3a_mode_label: String,
}

/// Sheet response including rows and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResponse {
    pub car_id: Option<String>,
    pub lines: Vec<SheetRow>,
    pub totals: SheetTotals,
}

impl From<&SaleSheet> for SheetResponse {
    fn from(sheet: &SaleSheet) -> Self {
        let locale = sheet.locale();
        SheetResponse {
            car_id: sheet.car_id().map(str::to_string),
            lines: sheet
                .lines()
                .iter()
                .map(|line| SheetRow {
                    ready_to_save: line.is_ready_to_save(),
                    selling_mode_label: line.selling_mode().label(locale).to_string(),
                    bya3a_mode_label: line.bya3a_mode().label(locale).to_string(),
                    line: line.clone(),
                })
                .collect(),
            totals: SheetTotals::from(sheet),
        }
    }
}

/// Selects the car to sell from and loads its saved lines.
///
/// `None` or an empty id deselects the car and empties the sheet.
pub fn select_car(
    sheet: &SheetState,
    backend: &dyn Backend,
    car_id: Option<String>,
) -> Result<SheetResponse, ApiError> {
    let car_id = car_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    debug!(car_id = ?car_id, "select_car command");

    let Some(car_id) = car_id else {
        return Ok(sheet.with_sheet_mut(|s| {
            s.clear();
            SheetResponse::from(&*s)
        }));
    };

    validate_reference("car", &car_id)?;

    let lines = load_lines(backend, &car_id)?;
    info!(car_id = %car_id, count = lines.len(), "loaded sale lines");

    Ok(sheet.with_sheet_mut(|s| {
        s.load(car_id, lines);
        SheetResponse::from(&*s)
    }))
}

/// Fetches a car's saved rows, recomputing every total.
fn load_lines(backend: &dyn Backend, car_id: &str) -> Result<Vec<SaleLine>, ApiError> {
    let records = backend.list_sale_lines(car_id)?;
    Ok(records
        .into_iter()
        .map(|record| {
            let stored = record.stored_total();
            let line = SaleLine::from_record(record);
            if let Some(stored) = stored.filter(|stored| *stored != line.total()) {
                warn!(
                    id = ?line.id(),
                    stored = %stored,
                    computed = %line.total(),
                    "stored sale line total differs from recomputed total"
                );
            }
            line
        })
        .collect())
}

/// Gets the current sheet.
pub fn get_sheet(sheet: &SheetState) -> SheetResponse {
    debug!("get_sheet command");
    sheet.with_sheet(|s| SheetResponse::from(s))
}

/// Appends an empty row using the configured default modes.
pub fn add_line(sheet: &SheetState) -> SheetResponse {
    debug!("add_line command");
    sheet.with_sheet_mut(|s| {
        s.add_line();
        SheetResponse::from(&*s)
    })
}

/// Applies one field edit to an unsaved row; its total is recomputed.
pub fn update_line(
    sheet: &SheetState,
    config: &DeskConfig,
    index: usize,
    edit: SaleLineEdit,
) -> Result<SheetResponse, ApiError> {
    debug!(index, edit = ?edit, "update_line command");

    sheet
        .with_sheet_mut(|s| {
            s.update_line(index, edit)?;
            Ok::<_, CoreError>(SheetResponse::from(&*s))
        })
        .map_err(|e| ApiError::from_core(e, config.locale))
}

/// Drops an unsaved row.
pub fn remove_line(
    sheet: &SheetState,
    config: &DeskConfig,
    index: usize,
) -> Result<SheetResponse, ApiError> {
    debug!(index, "remove_line command");

    sheet
        .with_sheet_mut(|s| {
            s.remove_line(index)?;
            Ok::<_, CoreError>(SheetResponse::from(&*s))
        })
        .map_err(|e| ApiError::from_core(e, config.locale))
}

/// Validates and persists one row.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Car selected?                 no ──► CAR_NOT_SELECTED               │
/// │  2. Row exists and is unsaved?    no ──► NOT_FOUND / BUSINESS_LOGIC     │
/// │  3. Field checks                  fail ─► VALIDATION_ERROR              │
/// │  4. Submit gate                   fail ─► SALE_LINE_REJECTED            │
/// │  5. Ready to save (total > 0)?    no ──► SALE_LINE_REJECTED             │
/// │  6. create-sale-line              fail ─► backend error                 │
/// │  7. Record the id on the row with the same key, open a fresh row       │
/// │     (row changed meanwhile ──► reload saved rows from the backend)     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn save_line(
    sheet: &SheetState,
    config: &DeskConfig,
    backend: &dyn Backend,
    index: usize,
) -> Result<SheetResponse, ApiError> {
    debug!(index, "save_line command");
    let localize = |e: CoreError| ApiError::from_core(e, config.locale);

    let (car_id, line) = sheet
        .with_sheet(|s| {
            let car_id = s.car_id().ok_or(CoreError::CarNotSelected)?.to_string();
            let line = s.line(index)?.clone();
            Ok::<_, CoreError>((car_id, line))
        })
        .map_err(localize)?;

    if let Some(id) = line.id() {
        return Err(localize(CoreError::SaleLineAlreadySaved { id: id.to_string() }));
    }

    line.validate_fields()
        .map_err(|e| localize(CoreError::from(e)))?;
    validate_for_submit(&line.submit_input()).map_err(|e| localize(CoreError::from(e)))?;
    if !line.is_ready_to_save() {
        return Err(localize(CoreError::NotReadyToSave));
    }

    let request = line.to_create_request(&car_id);
    let id = backend.create_sale_line(&request)?;

    info!(id = %id, car_id = %car_id, total = %line.total(), "sale line saved");

    let outcome = sheet.with_sheet_mut(|s| s.record_save(&car_id, &line, id.clone()));
    match outcome {
        SaveOutcome::Marked => {}
        SaveOutcome::RowChanged => {
            warn!(id = %id, car_id = %car_id, "sale line changed while saving, reloading saved lines");
            let saved = load_lines(backend, &car_id)?;
            sheet.with_sheet_mut(|s| {
                if s.car_id() == Some(car_id.as_str()) {
                    s.reload_saved(saved, line.key());
                }
            });
        }
        SaveOutcome::CarChanged => {
            warn!(id = %id, car_id = %car_id, "car changed while saving, sheet left as is");
        }
    }

    Ok(sheet.with_sheet(|s| SheetResponse::from(s)))
}

/// Deletes a persisted row from the backend and from the sheet.
pub fn delete_saved_line(
    sheet: &SheetState,
    backend: &dyn Backend,
    id: String,
) -> Result<SheetResponse, ApiError> {
    debug!(id = %id, "delete_saved_line command");

    backend.delete_sale_line(&id)?;
    info!(id = %id, "sale line deleted");

    Ok(sheet.with_sheet_mut(|s| {
        s.remove_saved(&id);
        SheetResponse::from(&*s)
    }))
}

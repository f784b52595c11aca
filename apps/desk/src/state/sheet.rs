//! # Sell Sheet State
//!
//! The sale lines of the car currently being sold from.
//!
//! ## Thread Safety
//! The sheet is wrapped in `Arc<Mutex<T>>`: several commands may touch it
//! and only one may modify it at a time.
//!
//! ## Sheet Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sheet State Operations                               │
//! │                                                                         │
//! │  Frontend Action          Command                 Sheet Change          │
//! │  ───────────────          ───────                 ────────────          │
//! │                                                                         │
//! │  Pick car ───────────────► select_car() ────────► lines = loaded rows  │
//! │                                                                         │
//! │  Click "add row" ────────► add_line() ──────────► lines.push(empty)    │
//! │                                                                         │
//! │  Type in a cell ─────────► update_line() ───────► lines[i].apply(edit) │
//! │                                                                         │
//! │  Click save ─────────────► save_line() ─────────► row(key).id = id     │
//! │                                                   lines.push(empty)    │
//! │                                                                         │
//! │  Click remove ───────────► remove_line() ───────► lines.remove(i)      │
//! │                            delete_saved_line()                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use uuid::Uuid;
use wekala_core::error::CoreResult;
use wekala_core::{Bya3aMode, CoreError, Locale, Money, SaleLine, SaleLineEdit, SellingMode};

use super::DeskConfig;

/// The sale lines of one car.
///
/// ## Invariants
/// - Saved lines (with an id) are history: they can be deleted through the
///   backend but not edited
/// - Every line's total is current; only [`SaleLine::apply`] changes fields
/// - A row only gets an id if the backend stored exactly that row
#[derive(Debug, Clone)]
pub struct SaleSheet {
    car_id: Option<String>,
    lines: Vec<SaleLine>,
    selling_mode: SellingMode,
    bya3a_mode: Bya3aMode,
    locale: Locale,
}

/// What happened when a backend save was recorded on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The row still matched what was sent and now carries the id.
    Marked,
    /// The row was edited or removed while the save was in flight.
    RowChanged,
    /// Another car was selected while the save was in flight.
    CarChanged,
}

impl SaleSheet {
    /// Creates an empty sheet whose new rows use the given modes.
    pub fn new(selling_mode: SellingMode, bya3a_mode: Bya3aMode) -> Self {
        SaleSheet {
            car_id: None,
            lines: Vec::new(),
            selling_mode,
            bya3a_mode,
            locale: Locale::default(),
        }
    }

    /// Sets the locale used for labels in sheet responses.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn car_id(&self) -> Option<&str> {
        self.car_id.as_deref()
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// Switches to another car, replacing all rows.
    pub fn load(&mut self, car_id: String, lines: Vec<SaleLine>) {
        self.car_id = Some(car_id);
        self.lines = lines;
    }

    /// Deselects the car and drops all rows.
    pub fn clear(&mut self) {
        self.car_id = None;
        self.lines.clear();
    }

    /// Appends an empty row and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(SaleLine::new(self.selling_mode, self.bya3a_mode));
        self.lines.len() - 1
    }

    pub fn line(&self, index: usize) -> CoreResult<&SaleLine> {
        self.lines
            .get(index)
            .ok_or_else(|| CoreError::SaleLineNotFound(index.to_string()))
    }

    fn unsaved_line_mut(&mut self, index: usize) -> CoreResult<&mut SaleLine> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or_else(|| CoreError::SaleLineNotFound(index.to_string()))?;

        if let Some(id) = line.id() {
            return Err(CoreError::SaleLineAlreadySaved { id: id.to_string() });
        }

        Ok(line)
    }

    /// Applies an edit to an unsaved row.
    pub fn update_line(&mut self, index: usize, edit: SaleLineEdit) -> CoreResult<&SaleLine> {
        let line = self.unsaved_line_mut(index)?;
        line.apply(edit);
        Ok(line)
    }

    /// Drops an unsaved row. Saved rows go through the backend instead.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<SaleLine> {
        self.unsaved_line_mut(index)?;
        Ok(self.lines.remove(index))
    }

    /// Drops the saved row with the given id, if present.
    pub fn remove_saved(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != Some(id));
        self.lines.len() != before
    }

    /// Records the id the backend assigned to `sent` and opens a fresh row
    /// below.
    ///
    /// The row is found by its key, not its position, and is only marked if
    /// the car is unchanged and the row still equals what was sent.
    pub fn record_save(&mut self, car_id: &str, sent: &SaleLine, id: String) -> SaveOutcome {
        if self.car_id() != Some(car_id) {
            return SaveOutcome::CarChanged;
        }

        let Some(line) = self.lines.iter_mut().find(|line| line.key() == sent.key()) else {
            return SaveOutcome::RowChanged;
        };
        if *line != *sent {
            return SaveOutcome::RowChanged;
        }

        line.mark_saved(id);
        self.add_line();
        SaveOutcome::Marked
    }

    /// Replaces the saved rows with `saved`, keeping unsaved drafts except
    /// the one keyed `discard`.
    pub fn reload_saved(&mut self, saved: Vec<SaleLine>, discard: Uuid) {
        let drafts: Vec<SaleLine> = std::mem::take(&mut self.lines)
            .into_iter()
            .filter(|line| !line.is_saved() && line.key() != discard)
            .collect();

        self.lines = saved;
        self.lines.extend(drafts);
    }
}

impl Default for SaleSheet {
    fn default() -> Self {
        SaleSheet::new(SellingMode::default(), Bya3aMode::default())
    }
}

/// Sheet totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTotals {
    pub line_count: usize,
    pub saved_count: usize,
    /// Sum of all line totals, saved or not.
    pub total: Money,
    /// Sum of saved line totals only.
    pub saved_total: Money,
}

impl From<&SaleSheet> for SheetTotals {
    fn from(sheet: &SaleSheet) -> Self {
        let saved = sheet.lines.iter().filter(|line| line.is_saved());

        SheetTotals {
            line_count: sheet.lines.len(),
            saved_count: saved.clone().count(),
            total: sheet.lines.iter().map(SaleLine::total).sum(),
            saved_total: saved.map(SaleLine::total).sum(),
        }
    }
}

/// Shared sell sheet state.
///
/// Uses `Arc<Mutex<SaleSheet>>`: edits are quick and most of them write.
#[derive(Debug, Clone)]
pub struct SheetState {
    sheet: Arc<Mutex<SaleSheet>>,
}

impl SheetState {
    pub fn new(selling_mode: SellingMode, bya3a_mode: Bya3aMode) -> Self {
        SheetState {
            sheet: Arc::new(Mutex::new(SaleSheet::new(selling_mode, bya3a_mode))),
        }
    }

    /// Empty sheet whose new rows follow the configured default modes.
    pub fn from_config(config: &DeskConfig) -> Self {
        let sheet = SaleSheet::new(config.default_selling_mode, config.default_bya3a_mode)
            .with_locale(config.locale);
        SheetState {
            sheet: Arc::new(Mutex::new(sheet)),
        }
    }

    /// Executes a function with read access to the sheet.
    ///
    /// ## Usage
    /// ```rust
    /// use wekala_desk::state::{SheetState, SheetTotals};
    ///
    /// let state = SheetState::default();
    /// let totals = state.with_sheet(|sheet| SheetTotals::from(sheet));
    /// assert_eq!(totals.line_count, 0);
    /// ```
    pub fn with_sheet<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SaleSheet) -> R,
    {
        let sheet = self.sheet.lock().unwrap_or_else(PoisonError::into_inner);
        f(&sheet)
    }

    /// Executes a function with write access to the sheet.
    pub fn with_sheet_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SaleSheet) -> R,
    {
        let mut sheet = self.sheet.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut sheet)
    }
}

impl Default for SheetState {
    fn default() -> Self {
        SheetState::new(SellingMode::default(), Bya3aMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CAR: &str = "car-1";

    fn save(sheet: &mut SaleSheet, index: usize, id: &str) -> SaveOutcome {
        let sent = sheet.line(index).unwrap().clone();
        sheet.record_save(CAR, &sent, id.to_string())
    }

    fn priced_line(sheet: &mut SaleSheet) -> usize {
        let index = sheet.add_line();
        sheet
            .update_line(index, SaleLineEdit::Count(dec!(2)))
            .unwrap();
        sheet
            .update_line(index, SaleLineEdit::Price(dec!(10.50)))
            .unwrap();
        index
    }

    #[test]
    fn test_new_rows_use_sheet_defaults() {
        let mut sheet = SaleSheet::new(SellingMode::Weight, Bya3aMode::PerUnit);
        let index = sheet.add_line();
        let line = sheet.line(index).unwrap();
        assert_eq!(line.selling_mode(), SellingMode::Weight);
        assert_eq!(line.bya3a_mode(), Bya3aMode::PerUnit);
    }

    #[test]
    fn test_update_recomputes_total() {
        let mut sheet = SaleSheet::default();
        let index = priced_line(&mut sheet);
        assert_eq!(sheet.line(index).unwrap().total().cents(), 2100);
    }

    #[test]
    fn test_unknown_index() {
        let mut sheet = SaleSheet::default();
        assert!(matches!(
            sheet.update_line(3, SaleLineEdit::Count(dec!(1))),
            Err(CoreError::SaleLineNotFound(_))
        ));
        assert!(sheet.remove_line(0).is_err());
    }

    #[test]
    fn test_saved_rows_are_frozen() {
        let mut sheet = SaleSheet::default();
        sheet.load(CAR.to_string(), Vec::new());
        let index = priced_line(&mut sheet);
        assert_eq!(save(&mut sheet, index, "line-1"), SaveOutcome::Marked);

        // a fresh row was opened below
        assert_eq!(sheet.lines().len(), 2);
        assert!(!sheet.lines()[1].is_saved());

        assert!(matches!(
            sheet.update_line(index, SaleLineEdit::Price(dec!(1))),
            Err(CoreError::SaleLineAlreadySaved { .. })
        ));
        assert!(sheet.remove_line(index).is_err());

        assert!(sheet.remove_saved("line-1"));
        assert!(!sheet.remove_saved("line-1"));
        assert_eq!(sheet.lines().len(), 1);
    }

    #[test]
    fn test_record_save_follows_row_key() {
        let mut sheet = SaleSheet::default();
        sheet.load(CAR.to_string(), Vec::new());
        priced_line(&mut sheet);
        let second = priced_line(&mut sheet);
        sheet
            .update_line(second, SaleLineEdit::Item("خيار".to_string()))
            .unwrap();
        let sent = sheet.line(second).unwrap().clone();

        // the row above disappears while the save is in flight
        sheet.remove_line(0).unwrap();

        let outcome = sheet.record_save(CAR, &sent, "line-2".to_string());
        assert_eq!(outcome, SaveOutcome::Marked);
        assert_eq!(sheet.lines()[0].item(), "خيار");
        assert_eq!(sheet.lines()[0].id(), Some("line-2"));
        assert!(!sheet.lines()[1].is_saved());
    }

    #[test]
    fn test_record_save_refuses_changed_row_or_car() {
        let mut sheet = SaleSheet::default();
        sheet.load(CAR.to_string(), Vec::new());
        let index = priced_line(&mut sheet);
        let sent = sheet.line(index).unwrap().clone();

        sheet.update_line(index, SaleLineEdit::Price(dec!(11))).unwrap();
        assert_eq!(
            sheet.record_save(CAR, &sent, "x".to_string()),
            SaveOutcome::RowChanged
        );

        assert_eq!(
            sheet.record_save("car-2", &sent, "x".to_string()),
            SaveOutcome::CarChanged
        );
        assert!(sheet.lines().iter().all(|line| !line.is_saved()));
        assert_eq!(sheet.lines().len(), 1);
    }

    #[test]
    fn test_reload_saved_keeps_other_drafts() {
        let mut sheet = SaleSheet::default();
        sheet.load(CAR.to_string(), Vec::new());
        let stale = priced_line(&mut sheet);
        let other = priced_line(&mut sheet);
        let stale_key = sheet.line(stale).unwrap().key();
        let other_key = sheet.line(other).unwrap().key();

        let mut saved = SaleLine::default();
        saved.mark_saved("line-1".to_string());
        sheet.reload_saved(vec![saved], stale_key);

        assert_eq!(sheet.lines().len(), 2);
        assert_eq!(sheet.lines()[0].id(), Some("line-1"));
        assert_eq!(sheet.lines()[1].key(), other_key);
    }

    #[test]
    fn test_clear() {
        let mut sheet = SaleSheet::default();
        sheet.load(CAR.to_string(), vec![SaleLine::default()]);
        assert_eq!(sheet.car_id(), Some(CAR));

        sheet.clear();
        assert_eq!(sheet.car_id(), None);
        assert!(sheet.lines().is_empty());
    }

    #[test]
    fn test_state_from_config() {
        let config = DeskConfig {
            default_selling_mode: SellingMode::Package,
            locale: Locale::En,
            ..DeskConfig::default()
        };
        let state = SheetState::from_config(&config);
        state.with_sheet_mut(|sheet| sheet.add_line());
        let mode = state.with_sheet(|sheet| sheet.lines()[0].selling_mode());
        assert_eq!(mode, SellingMode::Package);
        assert_eq!(state.with_sheet(|sheet| sheet.locale()), Locale::En);
    }

    #[test]
    fn test_state_is_shared() {
        let state = SheetState::default();
        let other = state.clone();
        other.with_sheet_mut(|sheet| sheet.add_line());
        assert_eq!(state.with_sheet(|sheet| sheet.lines().len()), 1);
    }
}

//! # Backend Seam
//!
//! The desk app never talks to storage directly. Every read and write goes
//! through a [`Backend`]: in production an adapter over the remote
//! functions (`list-sale-lines`, `create-sale-line`, ...), in tests and local
//! runs the [`InMemoryBackend`].
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Remote function failure (status, body)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendError (this module) ← Categorized by the adapter               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (error.rs) ← Serialized for frontend                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;
use wekala_core::car::NewCar;
use wekala_core::ledger::{LedgerEntry, NewLedgerEntry};
use wekala_core::treasury::{NewTreasuryEntry, TreasuryEntry};
use wekala_core::{CreateSaleLineRequest, SaleLineRecord};

// =============================================================================
// Errors
// =============================================================================

/// Failures reported by a backend implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The backend refused the request; the message is meant for the user.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The session is missing or expired.
    #[error("Not authorized")]
    Unauthorized,

    /// The backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something we could not read.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        BackendError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::InvalidResponse(err.to_string())
    }
}

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

// =============================================================================
// Backend Trait
// =============================================================================

/// Persistence collaborator for the desk app.
///
/// Creation calls return the id the backend assigned.
pub trait Backend: Send + Sync {
    fn create_car(&self, car: &NewCar) -> BackendResult<String>;

    fn list_sale_lines(&self, car_id: &str) -> BackendResult<Vec<SaleLineRecord>>;

    fn create_sale_line(&self, request: &CreateSaleLineRequest) -> BackendResult<String>;

    fn delete_sale_line(&self, id: &str) -> BackendResult<()>;

    fn get_customer_ledger(&self, customer_id: &str) -> BackendResult<Vec<LedgerEntry>>;

    fn create_ledger_entry(&self, entry: &NewLedgerEntry) -> BackendResult<String>;

    fn list_treasury_entries(&self) -> BackendResult<Vec<TreasuryEntry>>;

    fn create_treasury_entry(&self, entry: &NewTreasuryEntry) -> BackendResult<String>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

#[derive(Debug, Default)]
struct MemoryStore {
    /// (car id, car)
    cars: Vec<(String, NewCar)>,
    /// (car id, row)
    sale_lines: Vec<(String, SaleLineRecord)>,
    /// (customer id, entry)
    ledger: Vec<(String, LedgerEntry)>,
    treasury: Vec<TreasuryEntry>,
}

/// A backend that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    store: Mutex<MemoryStore>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut MemoryStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    #[cfg(test)]
    pub(crate) fn cars(&self) -> Vec<(String, NewCar)> {
        self.with_store(|store| store.cars.clone())
    }
}

impl Backend for InMemoryBackend {
    fn create_car(&self, car: &NewCar) -> BackendResult<String> {
        let id = Uuid::new_v4().to_string();
        debug!(id = %id, supplier = %car.supplier, lines = car.lines.len(), "stored car");
        self.with_store(|store| store.cars.push((id.clone(), car.clone())));
        Ok(id)
    }

    fn list_sale_lines(&self, car_id: &str) -> BackendResult<Vec<SaleLineRecord>> {
        Ok(self.with_store(|store| {
            store
                .sale_lines
                .iter()
                .filter(|(car, _)| car == car_id)
                .map(|(_, record)| record.clone())
                .collect()
        }))
    }

    fn create_sale_line(&self, request: &CreateSaleLineRequest) -> BackendResult<String> {
        let id = Uuid::new_v4().to_string();
        let record = SaleLineRecord {
            id: id.clone(),
            item: Some(request.item.clone()),
            count: Some(request.count),
            package_or_piece: Some(request.package_or_piece.clone()),
            grade: request.grade.clone(),
            weight: request.weight,
            price: Some(request.price),
            selling_mode: Some(request.selling_mode),
            bya3a_mode: Some(request.bya3a_mode),
            bya3a_value: Some(request.bya3a_value),
            total: Some(request.total),
            customer_id: Some(request.customer_id.clone()),
            seller_id: request.seller_id.clone(),
        };

        debug!(id = %id, car_id = %request.car_id, "stored sale line");
        self.with_store(|store| store.sale_lines.push((request.car_id.clone(), record)));
        Ok(id)
    }

    fn delete_sale_line(&self, id: &str) -> BackendResult<()> {
        self.with_store(|store| {
            let before = store.sale_lines.len();
            store.sale_lines.retain(|(_, record)| record.id != id);
            if store.sale_lines.len() == before {
                Err(BackendError::not_found("Sale line", id))
            } else {
                Ok(())
            }
        })
    }

    fn get_customer_ledger(&self, customer_id: &str) -> BackendResult<Vec<LedgerEntry>> {
        Ok(self.with_store(|store| {
            store
                .ledger
                .iter()
                .filter(|(customer, _)| customer == customer_id)
                .map(|(_, entry)| entry.clone())
                .collect()
        }))
    }

    fn create_ledger_entry(&self, entry: &NewLedgerEntry) -> BackendResult<String> {
        let id = Uuid::new_v4().to_string();
        let stored = LedgerEntry {
            id: id.clone(),
            entry_type: entry.entry_type,
            amount: entry.amount,
            date: entry.date.clone(),
            reference_type: None,
            notes: entry.notes.clone(),
            created_at: Some(Utc::now()),
        };

        self.with_store(|store| store.ledger.push((entry.customer_id.clone(), stored)));
        Ok(id)
    }

    fn list_treasury_entries(&self) -> BackendResult<Vec<TreasuryEntry>> {
        Ok(self.with_store(|store| store.treasury.clone()))
    }

    fn create_treasury_entry(&self, entry: &NewTreasuryEntry) -> BackendResult<String> {
        let id = Uuid::new_v4().to_string();
        let stored = TreasuryEntry {
            id: id.clone(),
            entry_type: entry.entry_type,
            amount: entry.amount,
            date: entry.date.clone(),
            notes: entry.notes.clone(),
            created_at: Some(Utc::now()),
        };

        self.with_store(|store| store.treasury.push(stored));
        Ok(id)
    }
}

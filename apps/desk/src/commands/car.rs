//! # Car Commands

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wekala_core::car::{CarManifestLine, NewCar};

use crate::backend::Backend;
use crate::error::ApiError;
use crate::state::DeskConfig;

/// The car intake form as submitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRequest {
    pub date: String,
    pub supplier: String,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub total_weight_kg: Option<Decimal>,
    #[serde(default)]
    pub lines: Vec<CarManifestLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredCar {
    pub id: String,
    pub line_count: usize,
    pub total_count: Decimal,
}

/// Registers an incoming car with its manifest.
pub fn register_car(
    config: &DeskConfig,
    backend: &dyn Backend,
    request: CarRequest,
) -> Result<RegisteredCar, ApiError> {
    debug!(supplier = %request.supplier, lines = request.lines.len(), "register_car command");

    let car = NewCar::new(
        &request.date,
        &request.supplier,
        request.supplier_id.as_deref(),
        request.total_weight_kg,
        request.lines,
    )
    .map_err(|e| ApiError::invalid(e, config.locale))?;

    let id = backend.create_car(&car)?;
    info!(id = %id, supplier = %car.supplier, lines = car.lines.len(), "car registered");

    Ok(RegisteredCar {
        id,
        line_count: car.lines.len(),
        total_count: car.total_count(),
    })
}

//! Waste quantity prediction for a collection zone

use super::Regressor;
use crate::error::ServiceError;
use crate::models::{now_timestamp, round_to, QuantityRequest, QuantityResponse};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Number of input features expected by the regressor
pub const NUM_QUANTITY_FEATURES: usize = 4;

/// Validated regressor input, in model column order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityFeatures {
    pub zone_id: i64,
    pub day_of_week: i64,
    pub month: i64,
    pub historical_waste: f64,
}

impl QuantityFeatures {
    /// Validate a request, filling missing calendar fields from `today`
    pub fn from_request(request: &QuantityRequest, today: NaiveDate) -> Result<Self, ServiceError> {
        let (zone_id, historical_waste) = match (request.zone_id, request.historical_waste) {
            (Some(zone_id), Some(historical_waste)) => (zone_id, historical_waste),
            _ => {
                return Err(ServiceError::validation(
                    "zoneId and historicalWaste are required",
                ))
            }
        };

        let day_of_week = request
            .day_of_week
            .unwrap_or_else(|| today.weekday().num_days_from_monday() as i64);
        let month = request.month.unwrap_or_else(|| today.month() as i64);

        if !(1..=100).contains(&zone_id) {
            return Err(ServiceError::validation("zoneId must be between 1 and 100"));
        }
        if !(0..=6).contains(&day_of_week) {
            return Err(ServiceError::validation(
                "dayOfWeek must be between 0 (Monday) and 6 (Sunday)",
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(ServiceError::validation("month must be between 1 and 12"));
        }
        if historical_waste < 0.0 {
            return Err(ServiceError::validation(
                "historicalWaste must be non-negative",
            ));
        }

        Ok(Self {
            zone_id,
            day_of_week,
            month,
            historical_waste,
        })
    }

    /// [zoneId, dayOfWeek, month, historicalWaste]
    pub fn to_vec(&self) -> [f32; NUM_QUANTITY_FEATURES] {
        [
            self.zone_id as f32,
            self.day_of_week as f32,
            self.month as f32,
            self.historical_waste as f32,
        ]
    }
}

/// Predicts the waste quantity (kg) a zone will produce
#[derive(Clone)]
pub struct QuantityPredictor {
    model: Option<Arc<dyn Regressor>>,
}

impl QuantityPredictor {
    pub fn new(model: Option<Arc<dyn Regressor>>) -> Self {
        Self { model }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Predict using today's local date for missing calendar fields
    pub fn predict(&self, request: &QuantityRequest) -> Result<QuantityResponse, ServiceError> {
        self.predict_on(request, chrono::Local::now().date_naive())
    }

    /// Predict with an explicit date for missing calendar fields
    pub fn predict_on(
        &self,
        request: &QuantityRequest,
        today: NaiveDate,
    ) -> Result<QuantityResponse, ServiceError> {
        let features = QuantityFeatures::from_request(request, today)?;

        let model = self
            .model
            .as_ref()
            .ok_or(ServiceError::ModelUnavailable("Waste quantity model not loaded"))?;

        let raw = model
            .predict(&features.to_vec())
            .map_err(|source| ServiceError::Inference {
                context: "Prediction failed",
                source,
            })?;

        // NaN fails every comparison, so it also ends up at zero
        let predicted = if (raw as f64) > 0.0 { raw as f64 } else { 0.0 };

        Ok(QuantityResponse {
            predicted_waste_kg: round_to(predicted, 2),
            zone_id: features.zone_id,
            timestamp: now_timestamp(),
        })
    }
}

//! Core data models for the prediction endpoints

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Waste quantity prediction request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityRequest {
    pub zone_id: Option<i64>,
    pub historical_waste: Option<f64>,
    /// 0 = Monday, 6 = Sunday; today's weekday when absent
    pub day_of_week: Option<i64>,
    /// 1-12; the current month when absent
    pub month: Option<i64>,
}

/// Waste quantity prediction output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityResponse {
    pub predicted_waste_kg: f64,
    pub zone_id: i64,
    pub timestamp: NaiveDateTime,
}

/// Waste type classification request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub description: Option<String>,
    /// Optional category hint, see [`WasteCategory`]
    pub category: Option<String>,
}

/// Waste type classification output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub waste_type: WasteType,
    pub confidence: f64,
    pub timestamp: NaiveDateTime,
}

/// User eco score request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoScoreRequest {
    pub user_id: Option<i64>,
    /// Total requests made
    #[serde(default)]
    pub user_activity: f64,
    /// Percentage of correctly segregated waste (0-100)
    #[serde(default)]
    pub segregation_accuracy: f64,
    /// Requests per month
    #[serde(default)]
    pub request_frequency: f64,
    /// Average weight per request in kg
    #[serde(default)]
    pub avg_weight: f64,
}

/// User eco score output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoScoreResponse {
    pub eco_score: u32,
    pub user_id: i64,
    pub breakdown: EcoScoreBreakdown,
    pub timestamp: NaiveDateTime,
}

/// Sub-scores that make up an eco score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoScoreBreakdown {
    pub activity_score: f64,
    pub segregation_score: f64,
    pub frequency_score: f64,
    pub weight_score: f64,
}

/// Liveness response for `/ping`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
    pub service: String,
    pub models_loaded: bool,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Coarse disposal category produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteType {
    Dry,
    Wet,
    EWaste,
    Hazardous,
}

impl WasteType {
    pub const ALL: [WasteType; 4] = [
        WasteType::Dry,
        WasteType::Wet,
        WasteType::EWaste,
        WasteType::Hazardous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Dry => "DRY",
            WasteType::Wet => "WET",
            WasteType::EWaste => "E_WASTE",
            WasteType::Hazardous => "HAZARDOUS",
        }
    }

    /// Exact match against the canonical codes
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category hint a client may attach to a classification request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteCategory {
    Plastic,
    Metal,
    Paper,
    Organic,
    EWaste,
}

impl FromStr for WasteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLASTIC" => Ok(WasteCategory::Plastic),
            "METAL" => Ok(WasteCategory::Metal),
            "PAPER" => Ok(WasteCategory::Paper),
            "ORGANIC" => Ok(WasteCategory::Organic),
            "E_WASTE" => Ok(WasteCategory::EWaste),
            other => Err(format!("unknown waste category: {}", other)),
        }
    }
}

/// Current local time as reported in responses
pub fn now_timestamp() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Round to `places` decimals, ties to even
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

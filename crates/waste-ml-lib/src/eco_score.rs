//! Rule-based user eco score
//!
//! The score combines four independently computed sub-scores:
//! activity (capped at 40), segregation accuracy (0-30), request
//! frequency tier and average weight tier. The total is floored and
//! clamped to 0-100. No model is involved, so results are fully
//! deterministic for a given configuration.

use crate::error::ServiceError;
use crate::models::{now_timestamp, round_to, EcoScoreBreakdown, EcoScoreRequest, EcoScoreResponse};
use serde::{Deserialize, Serialize};

/// Upper bound of the activity sub-score
pub const MAX_ACTIVITY_SCORE: f64 = 40.0;

/// Segregation accuracy of 100% earns this many points
pub const MAX_SEGREGATION_SCORE: f64 = 30.0;

/// Eco score weights and tier tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoScoreConfig {
    #[serde(default = "default_activity_weight")]
    pub activity_weight: f64,
    #[serde(default = "default_frequency_thresholds")]
    pub frequency_thresholds: [f64; 3],
    #[serde(default = "default_frequency_scores")]
    pub frequency_scores: [f64; 4],
    #[serde(default = "default_weight_thresholds")]
    pub weight_thresholds: [f64; 3],
    #[serde(default = "default_weight_scores")]
    pub weight_scores: [f64; 4],
}

fn default_activity_weight() -> f64 {
    2.0
}

fn default_frequency_thresholds() -> [f64; 3] {
    [2.0, 5.0, 10.0]
}

fn default_frequency_scores() -> [f64; 4] {
    [5.0, 10.0, 15.0, 20.0]
}

fn default_weight_thresholds() -> [f64; 3] {
    [2.0, 5.0, 10.0]
}

fn default_weight_scores() -> [f64; 4] {
    [2.0, 5.0, 7.0, 10.0]
}

impl Default for EcoScoreConfig {
    fn default() -> Self {
        Self {
            activity_weight: default_activity_weight(),
            frequency_thresholds: default_frequency_thresholds(),
            frequency_scores: default_frequency_scores(),
            weight_thresholds: default_weight_thresholds(),
            weight_scores: default_weight_scores(),
        }
    }
}

impl EcoScoreConfig {
    /// Reject tables that would make the score non-monotonic
    pub fn validate(&self) -> Result<(), String> {
        if !self.activity_weight.is_finite() || self.activity_weight < 0.0 {
            return Err(format!(
                "activity_weight must be a non-negative number, got {}",
                self.activity_weight
            ));
        }
        check_ascending("frequency_thresholds", &self.frequency_thresholds)?;
        check_ascending("frequency_scores", &self.frequency_scores)?;
        check_ascending("weight_thresholds", &self.weight_thresholds)?;
        check_ascending("weight_scores", &self.weight_scores)?;
        Ok(())
    }
}

fn check_ascending(name: &str, values: &[f64]) -> Result<(), String> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(format!("{} must contain only finite numbers", name));
    }
    if values.windows(2).any(|w| w[1] < w[0]) {
        return Err(format!("{} must be in ascending order: {:?}", name, values));
    }
    Ok(())
}

/// Pick the score of the highest threshold `value` reaches
pub fn tier_score(value: f64, thresholds: &[f64; 3], scores: &[f64; 4]) -> f64 {
    if value >= thresholds[2] {
        scores[3]
    } else if value >= thresholds[1] {
        scores[2]
    } else if value >= thresholds[0] {
        scores[1]
    } else {
        scores[0]
    }
}

/// Computes eco scores from a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct EcoScoreCalculator {
    config: EcoScoreConfig,
}

impl EcoScoreCalculator {
    pub fn new(config: EcoScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EcoScoreConfig {
        &self.config
    }

    /// Validate the request and compute the score
    pub fn score(&self, request: &EcoScoreRequest) -> Result<EcoScoreResponse, ServiceError> {
        let user_id = request
            .user_id
            .ok_or_else(|| ServiceError::validation("userId is required"))?;

        if !(0.0..=100.0).contains(&request.segregation_accuracy) {
            return Err(ServiceError::validation(
                "segregationAccuracy must be between 0 and 100",
            ));
        }
        if request.user_activity < 0.0 {
            return Err(ServiceError::validation("userActivity must be non-negative"));
        }
        if request.request_frequency < 0.0 {
            return Err(ServiceError::validation(
                "requestFrequency must be non-negative",
            ));
        }
        if request.avg_weight < 0.0 {
            return Err(ServiceError::validation("avgWeight must be non-negative"));
        }

        let breakdown = self.breakdown(request);
        let eco_score = total_score(&breakdown);

        Ok(EcoScoreResponse {
            eco_score,
            user_id,
            breakdown: EcoScoreBreakdown {
                activity_score: round_to(breakdown.activity_score, 1),
                segregation_score: round_to(breakdown.segregation_score, 1),
                ..breakdown
            },
            timestamp: now_timestamp(),
        })
    }

    /// Unrounded sub-scores for an already validated request
    pub fn breakdown(&self, request: &EcoScoreRequest) -> EcoScoreBreakdown {
        let config = &self.config;
        EcoScoreBreakdown {
            activity_score: (request.user_activity * config.activity_weight)
                .min(MAX_ACTIVITY_SCORE),
            segregation_score: (request.segregation_accuracy / 100.0) * MAX_SEGREGATION_SCORE,
            frequency_score: tier_score(
                request.request_frequency,
                &config.frequency_thresholds,
                &config.frequency_scores,
            ),
            weight_score: tier_score(
                request.avg_weight,
                &config.weight_thresholds,
                &config.weight_scores,
            ),
        }
    }
}

/// Floor of the sub-score sum, clamped to 0-100
pub fn total_score(breakdown: &EcoScoreBreakdown) -> u32 {
    let total = breakdown.activity_score
        + breakdown.segregation_score
        + breakdown.frequency_score
        + breakdown.weight_score;
    total.floor().clamp(0.0, 100.0) as u32
}

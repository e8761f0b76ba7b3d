//! Health reporting for the loaded model artifacts

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Health status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is missing or impaired but the service still answers
    Degraded,
    /// No prediction endpoint can be served
    Unhealthy,
}

impl ComponentStatus {
    /// Returns true if the component is at least partially operational
    pub fn is_operational(&self) -> bool {
        matches!(self, ComponentStatus::Healthy | ComponentStatus::Degraded)
    }
}

/// Information about a component's health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

impl ComponentHealth {
    pub fn healthy() -> Self {
        Self {
            status: ComponentStatus::Healthy,
            message: None,
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: ComponentStatus::Degraded,
            message: Some(message.into()),
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ComponentStatus::Unhealthy,
            message: Some(message.into()),
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Overall health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub components: HashMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Build a response; `serving` is false when no model endpoint can answer
    pub fn new(components: HashMap<String, ComponentHealth>, serving: bool) -> Self {
        let status = if serving {
            Self::compute_status(&components)
        } else {
            ComponentStatus::Unhealthy
        };
        Self { status, components }
    }

    /// A single failed artifact only degrades the service
    pub fn compute_status(components: &HashMap<String, ComponentHealth>) -> ComponentStatus {
        if components
            .values()
            .all(|h| h.status == ComponentStatus::Healthy)
        {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Degraded
        }
    }
}

/// Component names for health tracking
pub mod components {
    pub const QUANTITY_MODEL: &str = "quantity_model";
    pub const CLASSIFICATION_MODEL: &str = "classification_model";
    pub const LABEL_DECODER: &str = "label_decoder";
    pub const ECO_CONFIG: &str = "eco_config";
}

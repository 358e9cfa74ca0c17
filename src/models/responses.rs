use crate::models::domain::Provider;
use serde::{Deserialize, Serialize};

/// Response for the search endpoint.
///
/// `count` is always the length of the returned page, never a total row
/// count - clients depend on this, so it must not be upgraded silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<Provider>,
    pub count: usize,
}

/// Response for the filter options endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    pub specialties: Vec<String>,
    pub neighborhoods: Vec<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Uniform error body: a single localized message, no upstream detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

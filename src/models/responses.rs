use serde::Serialize;
use crate::core::sync::ViewSnapshot;
use crate::models::domain::{Hotel, Notice, Suggestion};

/// Full view state of a session plus its pending notifications
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: uuid::Uuid,
    pub view: ViewSnapshot,
    pub notices: Vec<Notice>,
}

/// Region chip with its badge count
#[derive(Debug, Clone, Serialize)]
pub struct RegionChip {
    pub region: String,
    pub count: usize,
}

/// Catalog listing with its index projections
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub hotels: Vec<Hotel>,
    pub regions: Vec<RegionChip>,
    pub total_results: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub hotels: usize,
    pub active_sessions: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query-text change from the search box
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub query: String,
}

/// Location string to focus the map on (suggestion pick or submit)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FocusRequest {
    #[validate(length(min = 1, max = 200))]
    pub location: String,
}

/// Region chip click
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegionRequest {
    #[validate(length(min = 1))]
    pub region: String,
}

/// Radius slider change; out-of-range values are clamped by the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiusRequest {
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: f64,
}

/// "Near me" click
///
/// The browser performs the position lookup and forwards either the
/// coordinates or the failure cause. A request with neither means the
/// browser has no geolocation capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LocateRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(length(max = 500))]
    pub error: Option<String>,
}

/// Suggestions lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsQuery {
    #[serde(default)]
    pub q: String,
}

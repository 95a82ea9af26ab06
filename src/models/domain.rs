use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A latitude/longitude pair in degrees
///
/// Serialized as a `[latitude, longitude]` array, the shape used by the
/// bundled catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `(0, 0)` shows up when a record was exported without a position
    pub fn is_null_island(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self { latitude, longitude }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.latitude, c.longitude]
    }
}

/// Hotel record from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub state: String,
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub description: String,
    pub rating: f64,
    pub price: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub coordinates: Coordinates,
}

impl Hotel {
    /// Cover image, if the record has any
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// `"address (name)"`, the label offered when picking a place
    pub fn place_label(&self) -> String {
        format!("{} ({})", self.address, self.name.trim())
    }
}

/// A hotel plus its distance from the active reference point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelWithDistance {
    #[serde(flatten)]
    pub hotel: Hotel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_label: Option<String>,
}

impl HotelWithDistance {
    pub fn new(hotel: Hotel, distance: Option<f64>) -> Self {
        Self {
            hotel,
            distance_label: distance.map(format_distance),
            distance,
        }
    }
}

/// Human label for a distance in kilometers
pub fn format_distance(distance_km: f64) -> String {
    let meters = (distance_km * 1000.0).round();
    if meters < 1000.0 {
        format!("{} meters away", meters as u64)
    } else {
        format!("{:.1} km away", distance_km)
    }
}

/// Field used to group hotels into regions for chips and focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionGranularity {
    #[default]
    State,
    City,
}

impl RegionGranularity {
    pub fn region_of<'a>(&self, hotel: &'a Hotel) -> &'a str {
        match self {
            RegionGranularity::State => &hotel.state,
            RegionGranularity::City => &hotel.city,
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Edges count as inside
    pub fn contains(&self, point: &Coordinates) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }
}

/// Map viewport instruction resolved from a location string
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FocusTarget {
    #[serde(rename_all = "camelCase")]
    SingleHotel {
        coordinates: Coordinates,
        hotel_id: String,
    },
    RegionBounds { bounds: BoundingBox },
    None,
}

impl FocusTarget {
    pub fn is_none(&self) -> bool {
        matches!(self, FocusTarget::None)
    }

    /// Point a text search is centered on, if the target has one
    pub fn center(&self) -> Option<Coordinates> {
        match self {
            FocusTarget::SingleHotel { coordinates, .. } => Some(*coordinates),
            FocusTarget::RegionBounds { bounds } => Some(bounds.center()),
            FocusTarget::None => None,
        }
    }
}

/// Camera movement the map is expected to perform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CameraCommand {
    #[serde(rename_all = "camelCase")]
    FlyTo {
        center: Coordinates,
        zoom: u8,
        duration_ms: u64,
    },
    #[serde(rename_all = "camelCase")]
    FitBounds {
        bounds: BoundingBox,
        padding_px: u32,
        max_zoom: u8,
        duration_ms: u64,
    },
}

/// Map camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub close_zoom: u8,
    pub fly_duration_ms: u64,
    pub padding_px: u32,
    pub region_max_zoom: u8,
    pub results_max_zoom: u8,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            close_zoom: 14,
            fly_duration_ms: 1500,
            padding_px: 50,
            region_max_zoom: 10,
            results_max_zoom: 12,
        }
    }
}

/// Delays of the transient focus effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTiming {
    /// How long a focus stays set before it is cleared
    pub clear_after: Duration,
    /// When marker callouts open, once the camera animation has finished
    pub callout_after: Duration,
}

impl Default for FocusTiming {
    fn default() -> Self {
        Self {
            clear_after: Duration::from_millis(2000),
            callout_after: Duration::from_millis(1800),
        }
    }
}

/// Per-session tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub default_radius_km: f64,
    pub min_radius_km: f64,
    pub max_radius_km: f64,
    /// Use the resolved center of a text search as reference point
    pub center_on_match: bool,
    pub camera: CameraSettings,
    pub timing: FocusTiming,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_radius_km: 10.0,
            min_radius_km: 1.0,
            max_radius_km: 50.0,
            center_on_match: false,
            camera: CameraSettings::default(),
            timing: FocusTiming::default(),
        }
    }
}

/// Filter parameters for one pass of the search engine
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: String,
    pub region: Option<String>,
    pub reference_point: Option<Coordinates>,
    pub radius_km: Option<f64>,
}

/// Detail view state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailView {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// User-visible notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub at: chrono::DateTime<chrono::Utc>,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Warning)
    }

    fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            at: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Region,
    Place,
}

/// Search-box suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
}

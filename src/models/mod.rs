// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, CameraCommand, CameraSettings, Coordinates, DetailView, FocusTarget, FocusTiming,
    Hotel, HotelWithDistance, Notice, RegionGranularity, SearchParams, SessionOptions, Severity,
    Suggestion, SuggestionKind,
};
pub use requests::{FocusRequest, LocateRequest, QueryRequest, RadiusRequest, RegionRequest, SuggestionsQuery};
pub use responses::{CatalogResponse, ErrorResponse, HealthResponse, RegionChip, SessionResponse, SuggestionsResponse};

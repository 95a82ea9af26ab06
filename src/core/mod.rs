// Core algorithm exports
pub mod catalog;
pub mod distance;
pub mod filters;
pub mod resolver;
pub mod search;
pub mod sync;

pub use catalog::{Catalog, CatalogError, CatalogIndex};
pub use distance::{haversine_distance, bounding_box_of, calculate_bounding_box, is_within_bounding_box, CoordinateError};
pub use filters::{matches_region, matches_text, Criterion, MatchCriteria};
pub use resolver::{camera_for, region_focus, resolve_focus, results_camera};
pub use search::{SearchEngine, SearchResult};
pub use sync::{Focus, SearchState, SelectionState, SyncError, ViewSnapshot, ViewSynchronizer};

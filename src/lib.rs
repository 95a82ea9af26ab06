//! Hotel Scout - hotel discovery service
//!
//! This library provides the search pipeline behind the hotel discovery map:
//! catalog indexing, text and region filtering, radius filtering with
//! haversine distances, and map focus resolution kept in sync per session.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Catalog, SearchEngine, ViewSynchronizer, distance::{haversine_distance, calculate_bounding_box}};
pub use models::{Hotel, HotelWithDistance, Coordinates, FocusTarget, SearchParams, SessionOptions};

use crate::models::{BoundingBox, Coordinates};
use thiserror::Error;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Widening applied to radius boxes so they always cover the radius circle
const RADIUS_BOX_MARGIN: f64 = 1.1;

/// Invalid coordinate values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinates must be finite numbers")]
    NonFinite,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinates {
    /// Check the pair is finite and within the valid degree ranges
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Distance to another point in kilometers
    #[inline]
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// Latitudes are clamped to [-90, 90] and longitudes to [-180, 180].
///
/// # Returns
/// Distance in kilometers, exactly 0 for identical points
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.clamp(-90.0, 90.0), lat2.clamp(-90.0, 90.0));
    let (lon1, lon2) = (lon1.clamp(-180.0, 180.0), lon2.clamp(-180.0, 180.0));

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box around a center point
///
/// Used as a cheap pre-filter before Haversine.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
///
/// # Returns
/// BoundingBox with min/max lat/lon, widened by a small margin
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let radius_km = radius_km * RADIUS_BOX_MARGIN;

    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// True when the box spills over the antimeridian and cannot be tested directly
#[inline]
pub fn wraps_antimeridian(bbox: &BoundingBox) -> bool {
    !(bbox.min_lon >= -180.0 && bbox.max_lon <= 180.0)
}

/// True when the box reaches a pole, where every longitude is within reach
#[inline]
pub fn covers_pole(bbox: &BoundingBox) -> bool {
    bbox.min_lat <= -90.0 || bbox.max_lat >= 90.0
}

/// Minimal rectangle covering every point, `None` when there are no points
pub fn bounding_box_of<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Coordinates>,
{
    points.into_iter().fold(None, |acc, p| {
        Some(match acc {
            None => BoundingBox {
                min_lat: p.latitude,
                max_lat: p.latitude,
                min_lon: p.longitude,
                max_lon: p.longitude,
            },
            Some(b) => BoundingBox {
                min_lat: b.min_lat.min(p.latitude),
                max_lat: b.max_lat.max(p.latitude),
                min_lon: b.min_lon.min(p.longitude),
                max_lon: b.max_lon.max(p.longitude),
            },
        })
    })
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(
    lat: f64,
    lon: f64,
    bbox: &BoundingBox,
) -> bool {
    lat >= bbox.min_lat
        && lat <= bbox.max_lat
        && lon >= bbox.min_lon
        && lon <= bbox.max_lon
}

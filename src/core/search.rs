use std::cmp::Ordering;
use crate::models::{Hotel, HotelWithDistance, RegionGranularity, SearchParams};
use crate::core::{
    distance::{calculate_bounding_box, covers_pole, is_within_bounding_box, wraps_antimeridian},
    filters::MatchCriteria,
};

/// Result of one filter pass
#[derive(Debug)]
pub struct SearchResult {
    pub hotels: Vec<HotelWithDistance>,
    pub total_candidates: usize,
}

/// Search & filter orchestrator
///
/// # Pipeline Stages
/// 1. Text and region criteria
/// 2. Radius bounding box pre-filter (when a reference point and radius are set)
/// 3. Haversine distance and radius cut-off
/// 4. Proximity sort (only with a reference point)
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine {
    granularity: RegionGranularity,
}

impl SearchEngine {
    pub fn new(granularity: RegionGranularity) -> Self {
        Self { granularity }
    }

    /// Produce the filtered, optionally distance-sorted view of the catalog
    ///
    /// Never fails; no match is an empty result. With an empty query, no
    /// region and no reference point the full catalog comes back in order.
    pub fn filter(&self, hotels: &[Hotel], params: &SearchParams) -> SearchResult {
        let total_candidates = hotels.len();

        // Stage 1: text AND region
        let criteria = MatchCriteria::new()
            .with_text(&params.query)
            .with_region(params.region.as_deref(), self.granularity);

        let matched = hotels.iter().filter(|hotel| criteria.matches(hotel));

        let Some(reference) = params.reference_point else {
            return SearchResult {
                hotels: matched.map(|h| HotelWithDistance::new(h.clone(), None)).collect(),
                total_candidates,
            };
        };

        // Stage 2: geospatial pre-filter
        let prefilter = params
            .radius_km
            .map(|radius| calculate_bounding_box(reference.latitude, reference.longitude, radius))
            .filter(|bbox| !wraps_antimeridian(bbox) && !covers_pole(bbox));

        // Stage 3: distance + radius
        let mut results: Vec<HotelWithDistance> = matched
            .filter(|hotel| {
                prefilter.as_ref().map_or(true, |bbox| {
                    is_within_bounding_box(hotel.coordinates.latitude, hotel.coordinates.longitude, bbox)
                })
            })
            .filter_map(|hotel| {
                let distance = reference.distance_to(&hotel.coordinates);
                match params.radius_km {
                    Some(radius) if distance > radius => None,
                    _ => Some(HotelWithDistance::new(hotel.clone(), Some(distance))),
                }
            })
            .collect();

        // Stage 4: nearest first, stable for ties
        results.sort_by(|a, b| compare_distance(a.distance, b.distance));

        tracing::debug!(
            "Filtered {} of {} hotels around ({}, {})",
            results.len(),
            total_candidates,
            reference.latitude,
            reference.longitude
        );

        SearchResult {
            hotels: results,
            total_candidates,
        }
    }
}

/// Ascending distance, hotels without a distance last
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// Unit tests for Hotel Scout

use hotel_scout::core::{
    distance::{haversine_distance, calculate_bounding_box, is_within_bounding_box},
    filters::{matches_text, MatchCriteria},
    resolver::resolve_focus,
    search::SearchEngine,
    catalog::CatalogIndex,
};
use hotel_scout::models::{Coordinates, FocusTarget, Hotel, LocateRequest, RegionGranularity, SearchParams, SuggestionKind};
use hotel_scout::services::{GeolocationError, GeolocationProvider, ReportedLocation};

fn hotel(id: &str, name: &str, state: &str, city: &str, address: &str, lat: f64, lon: f64) -> Hotel {
    Hotel {
        id: id.to_string(),
        name: name.to_string(),
        state: state.to_string(),
        city: city.to_string(),
        address: address.to_string(),
        description: String::new(),
        rating: 4.0,
        price: 5000.0,
        amenities: vec![],
        images: vec![],
        coordinates: Coordinates::new(lat, lon),
    }
}

fn catalog() -> Vec<Hotel> {
    vec![
        hotel("m1", "Taj Palace", "Maharashtra", "Mumbai", "Apollo Bunder, Colaba", 18.9217, 72.8330),
        hotel("m2", "Bandra Bay Hotel", "Maharashtra", "Mumbai", "Bandstand, Bandra West", 19.0596, 72.8295),
        hotel("p1", "Koregaon Residency", "Maharashtra", "Pune", "North Main Road", 18.5362, 73.8940),
        hotel("d1", "Connaught Inn", "Delhi", "New Delhi", "Janpath, Connaught Place", 28.6315, 77.2167),
        hotel("d2", "Aerocity Suites", "Delhi", "New Delhi", "Asset Area 12, Aerocity", 28.5494, 77.1200),
    ]
}

/// Deterministic point generator for the property checks
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn point(&mut self) -> (f64, f64) {
        (self.next_unit() * 170.0 - 85.0, self.next_unit() * 360.0 - 180.0)
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(19.0760, 72.8777, 19.0760, 72.8777);
    assert!(distance < 0.001);
}

#[test]
fn test_haversine_mumbai_to_pune() {
    // Roughly 120 km by air
    let distance = haversine_distance(19.0760, 72.8777, 18.5204, 73.8567);
    assert!(distance > 110.0 && distance < 130.0);
}

#[test]
fn test_haversine_symmetric_and_bounded() {
    let mut rng = Lcg(42);
    let max = std::f64::consts::PI * 6371.0 + 1e-6;

    for _ in 0..500 {
        let (lat1, lon1) = rng.point();
        let (lat2, lon2) = rng.point();

        let ab = haversine_distance(lat1, lon1, lat2, lon2);
        let ba = haversine_distance(lat2, lon2, lat1, lon1);
        assert!((ab - ba).abs() < 1e-9);
        assert!((0.0..=max).contains(&ab));
        assert!(haversine_distance(lat1, lon1, lat1, lon1) < 1e-9);
    }
}

#[test]
fn test_bounding_box_creation() {
    let bbox = calculate_bounding_box(19.0760, 72.8777, 10.0);

    assert!(bbox.min_lat < 19.0760);
    assert!(bbox.max_lat > 19.0760);
    assert!(bbox.min_lon < 72.8777);
    assert!(bbox.max_lon > 72.8777);

    // 10 km plus the safety margin, about 0.2 degrees of latitude
    let lat_span = bbox.max_lat - bbox.min_lat;
    assert!((lat_span - 0.198).abs() < 0.01);
}

#[test]
fn test_bounding_box_covers_radius() {
    let mut rng = Lcg(7);

    for _ in 0..500 {
        let (lat, lon) = rng.point();
        let lat = lat.clamp(-60.0, 60.0);
        let lon = lon.clamp(-170.0, 170.0);
        let bbox = calculate_bounding_box(lat, lon, 25.0);

        // Points just inside the radius along each axis stay inside the box
        let dlat = 24.9 / 111.195;
        let dlon = 24.9 / (111.195 * lat.to_radians().cos());
        for (plat, plon) in [(lat + dlat, lon), (lat - dlat, lon), (lat, lon + dlon), (lat, lon - dlon)] {
            assert!(haversine_distance(lat, lon, plat, plon) <= 25.0);
            assert!(is_within_bounding_box(plat, plon, &bbox));
        }
    }
}

#[test]
fn test_text_match_is_substring_of_some_field() {
    let hotels = catalog();
    let queries = ["taj", "BAY", "delhi", "pune", "road", "zzz", "  mumbai  ", "a"];

    for query in queries {
        let needle = query.trim().to_lowercase();
        for h in &hotels {
            let expected = [&h.name, &h.state, &h.city, &h.address]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            assert_eq!(matches_text(h, &needle), expected, "query {:?} on {}", query, h.id);
            assert_eq!(MatchCriteria::new().with_text(query).matches(h), expected);
        }
    }
}

#[test]
fn test_query_is_case_insensitive() {
    let hotels = catalog();
    let engine = SearchEngine::default();

    let lower = engine.filter(&hotels, &SearchParams { query: "taj".into(), ..Default::default() });
    let upper = engine.filter(&hotels, &SearchParams { query: "TAJ".into(), ..Default::default() });

    assert_eq!(lower.hotels.len(), 1);
    assert_eq!(lower.hotels[0].hotel.name, "Taj Palace");
    assert_eq!(upper.hotels, lower.hotels);
}

#[test]
fn test_region_selection_filters_by_state() {
    let hotels = catalog();
    let engine = SearchEngine::new(RegionGranularity::State);

    let result = engine.filter(&hotels, &SearchParams { region: Some("Delhi".into()), ..Default::default() });
    let ids: Vec<_> = result.hotels.iter().map(|h| h.hotel.id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "d2"]);
}

#[test]
fn test_region_selection_by_city_granularity() {
    let hotels = catalog();
    let engine = SearchEngine::new(RegionGranularity::City);

    let result = engine.filter(&hotels, &SearchParams { region: Some("Mumbai".into()), ..Default::default() });
    assert_eq!(result.hotels.len(), 2);

    // State names are not regions at city granularity
    let result = engine.filter(&hotels, &SearchParams { region: Some("Maharashtra".into()), ..Default::default() });
    assert!(result.hotels.is_empty());
}

#[test]
fn test_radius_results_within_radius_and_sorted() {
    let hotels = catalog();
    let engine = SearchEngine::default();
    let mut rng = Lcg(99);

    for _ in 0..50 {
        // Reference points scattered over western and northern India
        let lat = 17.0 + rng.next_unit() * 13.0;
        let lon = 71.0 + rng.next_unit() * 8.0;
        let radius = 1.0 + rng.next_unit() * 499.0;

        let result = engine.filter(&hotels, &SearchParams {
            reference_point: Some(Coordinates::new(lat, lon)),
            radius_km: Some(radius),
            ..Default::default()
        });

        let distances: Vec<f64> = result.hotels.iter().map(|h| h.distance.unwrap()).collect();
        assert!(distances.iter().all(|d| *d <= radius));
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        // Nothing inside the radius was dropped by the pre-filter
        let expected = hotels
            .iter()
            .filter(|h| haversine_distance(lat, lon, h.coordinates.latitude, h.coordinates.longitude) <= radius)
            .count();
        assert_eq!(result.hotels.len(), expected);
    }
}

#[test]
fn test_resolve_exact_name_over_city() {
    let mut hotels = catalog();
    hotels.push(hotel("x1", "Mumbai", "Maharashtra", "Thane", "Ghodbunder Road", 19.2183, 72.9781));

    match resolve_focus(&hotels, "mumbai") {
        FocusTarget::SingleHotel { hotel_id, .. } => assert_eq!(hotel_id, "x1"),
        other => panic!("expected single hotel, got {:?}", other),
    }
}

#[test]
fn test_resolve_state_bounds() {
    let hotels = catalog();

    match resolve_focus(&hotels, "Maharashtra") {
        FocusTarget::RegionBounds { bounds } => {
            assert!((bounds.min_lat - 18.5362).abs() < 1e-9);
            assert!((bounds.max_lat - 19.0596).abs() < 1e-9);
            assert!((bounds.max_lon - 73.8940).abs() < 1e-9);
        }
        other => panic!("expected region bounds, got {:?}", other),
    }

    assert_eq!(resolve_focus(&hotels, "Atlantis"), FocusTarget::None);
    assert_eq!(resolve_focus(&hotels, "   "), FocusTarget::None);
}

#[test]
fn test_place_label_resolves_single_hotel() {
    let hotels = catalog();

    match resolve_focus(&hotels, "Janpath, Connaught Place (Connaught Inn)") {
        FocusTarget::SingleHotel { hotel_id, coordinates } => {
            assert_eq!(hotel_id, "d1");
            assert_eq!(coordinates, Coordinates::new(28.6315, 77.2167));
        }
        other => panic!("expected single hotel, got {:?}", other),
    }
}

#[test]
fn test_index_suggestions_ordering() {
    let index = CatalogIndex::build(&catalog(), RegionGranularity::State);

    let suggestions = index.suggestions("delhi");
    assert_eq!(suggestions[0].label, "Delhi");
    assert_eq!(suggestions[0].kind, SuggestionKind::Region);
    assert!(suggestions[1..].iter().all(|s| s.kind == SuggestionKind::Place));

    assert_eq!(index.region_count("Maharashtra"), 3);
    assert_eq!(index.region_count("Delhi"), 2);
    assert_eq!(index.unique_regions(), &["Maharashtra".to_string(), "Delhi".to_string()]);
}

#[test]
fn test_reported_location_from_request() {
    let position = ReportedLocation::from(&LocateRequest {
        latitude: Some(19.0760),
        longitude: Some(72.8777),
        error: None,
    });
    assert_eq!(
        tokio_test::block_on(position.current_position()),
        Ok(Coordinates::new(19.0760, 72.8777))
    );

    let partial = ReportedLocation::from(&LocateRequest { latitude: Some(19.0), ..Default::default() });
    assert!(matches!(tokio_test::block_on(partial.current_position()), Err(GeolocationError::Failed(_))));

    let unsupported = ReportedLocation::from(&LocateRequest::default());
    assert_eq!(
        tokio_test::block_on(unsupported.current_position()),
        Err(GeolocationError::Unavailable)
    );
}

use crate::models::{CameraCommand, CameraSettings, FocusTarget, Hotel, HotelWithDistance, RegionGranularity};
use crate::core::distance::bounding_box_of;

/// Resolve a location string onto a map focus target
///
/// Rules are tried in a fixed order and the first that matches wins:
/// 1. hotel name (exact, case-insensitive)
/// 2. hotel address, or the `"address (name)"` place label
/// 3. city, covering every hotel in it
/// 4. state, covering every hotel in it
pub fn resolve_focus(hotels: &[Hotel], location: &str) -> FocusTarget {
    let needle = location.trim().to_lowercase();
    if needle.is_empty() {
        return FocusTarget::None;
    }

    let single = |hotel: &Hotel| FocusTarget::SingleHotel {
        coordinates: hotel.coordinates,
        hotel_id: hotel.id.clone(),
    };

    if let Some(hotel) = hotels.iter().find(|h| h.name.trim().to_lowercase() == needle) {
        return single(hotel);
    }

    if let Some(hotel) = hotels.iter().find(|h| {
        h.address.trim().to_lowercase() == needle || h.place_label().to_lowercase() == needle
    }) {
        return single(hotel);
    }

    let region_bounds = |field: fn(&Hotel) -> &str| {
        bounding_box_of(
            hotels
                .iter()
                .filter(|h| field(h).trim().to_lowercase() == needle)
                .map(|h| h.coordinates),
        )
        .map(|bounds| FocusTarget::RegionBounds { bounds })
    };

    region_bounds(city_of)
        .or_else(|| region_bounds(state_of))
        .unwrap_or(FocusTarget::None)
}

fn city_of(hotel: &Hotel) -> &str {
    &hotel.city
}

fn state_of(hotel: &Hotel) -> &str {
    &hotel.state
}

/// Bounds of every hotel in `region`, matched exactly on the granularity field
pub fn region_focus(hotels: &[Hotel], region: &str, granularity: RegionGranularity) -> FocusTarget {
    bounding_box_of(
        hotels
            .iter()
            .filter(|h| granularity.region_of(h) == region)
            .map(|h| h.coordinates),
    )
    .map_or(FocusTarget::None, |bounds| FocusTarget::RegionBounds { bounds })
}

/// Camera animation for a focus target; `None` leaves the viewport as is
pub fn camera_for(target: &FocusTarget, settings: &CameraSettings) -> Option<CameraCommand> {
    match target {
        FocusTarget::SingleHotel { coordinates, .. } => Some(CameraCommand::FlyTo {
            center: *coordinates,
            zoom: settings.close_zoom,
            duration_ms: settings.fly_duration_ms,
        }),
        FocusTarget::RegionBounds { bounds } => Some(CameraCommand::FitBounds {
            bounds: *bounds,
            padding_px: settings.padding_px,
            max_zoom: settings.region_max_zoom,
            duration_ms: settings.fly_duration_ms,
        }),
        FocusTarget::None => None,
    }
}

/// Viewport fitting every result marker, applied when the result set changes
pub fn results_camera(results: &[HotelWithDistance], settings: &CameraSettings) -> Option<CameraCommand> {
    bounding_box_of(results.iter().map(|h| h.hotel.coordinates)).map(|bounds| CameraCommand::FitBounds {
        bounds,
        padding_px: settings.padding_px,
        max_zoom: settings.results_max_zoom,
        duration_ms: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn create_hotel(id: &str, name: &str, city: &str, state: &str, lat: f64, lon: f64) -> Hotel {
        Hotel {
            id: id.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            city: city.to_string(),
            address: format!("{} Street", id),
            description: String::new(),
            rating: 4.2,
            price: 3000.0,
            amenities: vec![],
            images: vec![],
            coordinates: Coordinates::new(lat, lon),
        }
    }

    fn catalog() -> Vec<Hotel> {
        vec![
            create_hotel("a", "Harbour Lights", "Mumbai", "Maharashtra", 18.92, 72.83),
            create_hotel("b", "Juhu Sands", "Mumbai", "Maharashtra", 19.10, 72.82),
            create_hotel("c", "Pune Grand", "Pune", "Maharashtra", 18.52, 73.85),
            // Name equals a city elsewhere in the catalog
            create_hotel("d", "Pune", "Lonavala", "Maharashtra", 18.75, 73.40),
        ]
    }

    #[test]
    fn test_region_focus_ignores_same_named_hotel() {
        let hotels = catalog();

        let FocusTarget::RegionBounds { bounds } = region_focus(&hotels, "Pune", RegionGranularity::City) else {
            panic!("expected region bounds");
        };
        assert_eq!(bounds.min_lat, 18.52);
        assert_eq!(bounds.max_lat, 18.52);

        assert!(region_focus(&hotels, "Goa", RegionGranularity::State).is_none());
    }

    #[test]
    fn test_name_match() {
        let target = resolve_focus(&catalog(), "  juhu SANDS ");
        assert_eq!(
            target,
            FocusTarget::SingleHotel {
                coordinates: Coordinates::new(19.10, 72.82),
                hotel_id: "b".to_string(),
            }
        );
    }

    #[test]
    fn test_address_and_place_label_match() {
        let hotels = catalog();
        assert!(matches!(
            resolve_focus(&hotels, "a street"),
            FocusTarget::SingleHotel { ref hotel_id, .. } if hotel_id == "a"
        ));
        assert!(matches!(
            resolve_focus(&hotels, "c Street (Pune Grand)"),
            FocusTarget::SingleHotel { ref hotel_id, .. } if hotel_id == "c"
        ));
    }

    #[test]
    fn test_name_beats_city() {
        let target = resolve_focus(&catalog(), "Pune");
        assert!(matches!(target, FocusTarget::SingleHotel { ref hotel_id, .. } if hotel_id == "d"));
    }

    #[test]
    fn test_city_bounds() {
        let target = resolve_focus(&catalog(), "mumbai");
        let FocusTarget::RegionBounds { bounds } = target else {
            panic!("expected region bounds, got {:?}", target);
        };
        assert_eq!(bounds.min_lat, 18.92);
        assert_eq!(bounds.max_lat, 19.10);
        assert_eq!(bounds.min_lon, 72.82);
        assert_eq!(bounds.max_lon, 72.83);
    }

    #[test]
    fn test_state_bounds_cover_all() {
        let FocusTarget::RegionBounds { bounds } = resolve_focus(&catalog(), "Maharashtra") else {
            panic!("expected region bounds");
        };
        assert_eq!(bounds.min_lat, 18.52);
        assert_eq!(bounds.max_lon, 73.85);
    }

    #[test]
    fn test_no_match() {
        assert!(resolve_focus(&catalog(), "Goa").is_none());
        assert!(resolve_focus(&catalog(), "   ").is_none());
        // Substrings never resolve
        assert!(resolve_focus(&catalog(), "Mum").is_none());
    }

    #[test]
    fn test_camera_for_targets() {
        let settings = CameraSettings::default();
        let hotels = catalog();

        let fly = camera_for(&resolve_focus(&hotels, "Harbour Lights"), &settings);
        assert_eq!(
            fly,
            Some(CameraCommand::FlyTo {
                center: Coordinates::new(18.92, 72.83),
                zoom: 14,
                duration_ms: 1500,
            })
        );

        let fit = camera_for(&resolve_focus(&hotels, "Mumbai"), &settings);
        assert!(matches!(fit, Some(CameraCommand::FitBounds { max_zoom: 10, padding_px: 50, .. })));

        assert!(camera_for(&FocusTarget::None, &settings).is_none());
    }

    #[test]
    fn test_results_camera() {
        let settings = CameraSettings::default();
        assert!(results_camera(&[], &settings).is_none());

        let results: Vec<HotelWithDistance> = catalog()
            .into_iter()
            .map(|h| HotelWithDistance::new(h, None))
            .collect();
        assert!(matches!(
            results_camera(&results, &settings),
            Some(CameraCommand::FitBounds { max_zoom: 12, duration_ms: 0, .. })
        ));
    }
}

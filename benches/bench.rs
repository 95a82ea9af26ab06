// Criterion benchmarks for Hotel Scout

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use hotel_scout::core::{resolve_focus, SearchEngine, distance::{haversine_distance, calculate_bounding_box}};
use hotel_scout::models::{Coordinates, Hotel, SearchParams};

const STATES: [(&str, &str); 4] = [
    ("Maharashtra", "Mumbai"),
    ("Delhi", "New Delhi"),
    ("Karnataka", "Bengaluru"),
    ("Goa", "Panaji"),
];

fn create_hotel(id: usize, lat: f64, lon: f64) -> Hotel {
    let (state, city) = STATES[id % STATES.len()];
    Hotel {
        id: format!("h-{}", id),
        name: format!("Hotel {}", id),
        state: state.to_string(),
        city: city.to_string(),
        address: format!("{} Station Road", id),
        description: String::new(),
        rating: 3.0 + (id % 20) as f64 / 10.0,
        price: 2000.0 + (id % 50) as f64 * 150.0,
        amenities: vec!["Free WiFi".to_string()],
        images: vec![],
        coordinates: Coordinates::new(lat, lon),
    }
}

fn create_catalog(count: usize) -> Vec<Hotel> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.003) % 1.0;
            let lon_offset = (i as f64 * 0.007) % 1.0;
            create_hotel(i, 18.6 + lat_offset, 72.5 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(19.0760),
                black_box(72.8777),
                black_box(18.5204),
                black_box(73.8567),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| {
            calculate_bounding_box(
                black_box(19.0760),
                black_box(72.8777),
                black_box(10.0),
            )
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::default();
    let text = SearchParams {
        query: "road".to_string(),
        region: Some("Maharashtra".to_string()),
        ..Default::default()
    };
    let nearby = SearchParams {
        reference_point: Some(Coordinates::new(19.0760, 72.8777)),
        radius_km: Some(10.0),
        ..Default::default()
    };

    let mut group = c.benchmark_group("search");

    for hotel_count in [100, 1000, 10_000].iter() {
        let hotels = create_catalog(*hotel_count);

        group.bench_with_input(BenchmarkId::new("text_and_region", hotel_count), hotel_count, |b, _| {
            b.iter(|| engine.filter(black_box(&hotels), black_box(&text)));
        });

        group.bench_with_input(BenchmarkId::new("radius_10km", hotel_count), hotel_count, |b, _| {
            b.iter(|| engine.filter(black_box(&hotels), black_box(&nearby)));
        });
    }

    group.finish();
}

fn bench_resolve_focus(c: &mut Criterion) {
    let hotels = create_catalog(1000);

    c.bench_function("resolve_focus_state_1000_hotels", |b| {
        b.iter(|| resolve_focus(black_box(&hotels), black_box("Karnataka")));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_search,
    bench_resolve_focus
);

criterion_main!(benches);

// Criterion benchmarks for the ClubHive query engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use clubhive_query::core::{query, AggregationSpec, QuerySpec, SortSpec};
use clubhive_query::models::{Venue, VenueFilters};

fn create_venue(id: usize) -> Venue {
    let kinds = ["Rooftop Bar", "Nightclub", "Lounge Bar", "Pub", "Brewery"];
    let features: Vec<String> = ["Live Music", "Cocktails", "Dance Floor", "Karaoke"]
        .iter()
        .take(1 + id % 4)
        .map(|f| f.to_string())
        .collect();

    Venue {
        id: id.to_string(),
        name: format!("Venue {}", id),
        kind: kinds[id % kinds.len()].to_string(),
        description: "A place to be at night".to_string(),
        city: if id % 2 == 0 { "Mumbai" } else { "Delhi" }.to_string(),
        address: format!("{} Test Street", id),
        rating: 1.0 + (id % 40) as f64 * 0.1,
        review_count: (id % 500) as u32,
        features,
        typical_spend: 500 + (id % 20) as u32 * 250,
        capacity: 80 + (id % 10) as u32 * 50,
        crowd_level: "Moderate".to_string(),
        music_genres: vec!["House".to_string()],
        dress_code: "Casual".to_string(),
        age_restriction: "21+".to_string(),
        hours: Default::default(),
        pay_later_enabled: id % 3 == 0,
        booking_enabled: id % 2 == 0,
        open_now: id % 2 == 0,
    }
}

fn search_filters() -> VenueFilters {
    VenueFilters {
        query: "venue".to_string(),
        min_rating: 3.0,
        features: vec!["Live Music".to_string()],
        ..VenueFilters::default()
    }
}

fn bench_predicate(c: &mut Criterion) {
    let venues: Vec<Venue> = (0..100).map(create_venue).collect();
    let spec = QuerySpec {
        criteria: search_filters().criteria(),
        sort: None,
        aggregate: None,
    };

    c.bench_function("filter_100_venues", |b| {
        b.iter(|| query(black_box(&venues), black_box(&spec)));
    });
}

fn bench_full_query(c: &mut Criterion) {
    let spec = QuerySpec {
        criteria: search_filters().criteria(),
        sort: Some(SortSpec::descending("rating")),
        aggregate: Some(AggregationSpec::new("rating", 1..=5)),
    };

    let mut group = c.benchmark_group("query");

    for venue_count in [10, 50, 100, 500, 1000].iter() {
        let venues: Vec<Venue> = (0..*venue_count).map(create_venue).collect();

        group.bench_with_input(
            BenchmarkId::new("filter_sort_aggregate", venue_count),
            venue_count,
            |b, _| {
                b.iter(|| query(black_box(&venues), black_box(&spec)));
            },
        );
    }

    group.finish();
}

fn bench_sort_only(c: &mut Criterion) {
    let venues: Vec<Venue> = (0..1000).map(create_venue).collect();
    let spec = QuerySpec {
        criteria: vec![],
        sort: Some(SortSpec::descending("rating")),
        aggregate: None,
    };

    c.bench_function("sort_1000_venues", |b| {
        b.iter(|| query(black_box(&venues), black_box(&spec)));
    });
}

criterion_group!(benches, bench_predicate, bench_full_query, bench_sort_only);

criterion_main!(benches);

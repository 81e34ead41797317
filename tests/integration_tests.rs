// Integration tests: seeded catalog driven through the query engine the
// same way the route handlers drive it.

use clubhive_query::core::{query, AggregationSpec, Criterion, QuerySpec, SortSpec};
use clubhive_query::models::{HistoryFilters, ReviewFilters, TransactionStatus, VenueFilters};
use clubhive_query::services::Catalog;

fn catalog() -> Catalog {
    // Zero latency keeps the suite fast; the delay is presentation-only.
    Catalog::seed(0)
}

#[tokio::test]
async fn test_end_to_end_venue_search() {
    let catalog = catalog();
    let venues = catalog.venues().await;

    let filters = VenueFilters {
        min_rating: 4.0,
        ..VenueFilters::default()
    };
    let spec = QuerySpec {
        criteria: filters.criteria(),
        sort: Some(SortSpec::descending("rating")),
        aggregate: Some(AggregationSpec::new("rating", 1..=5)),
    };

    let result = query(&venues, &spec);

    // Everything returned clears the threshold and is ordered by rating.
    assert!(!result.items.is_empty());
    for venue in &result.items {
        assert!(venue.rating >= 4.0);
    }
    for pair in result.items.windows(2) {
        assert!(pair[0].rating >= pair[1].rating);
    }

    // Stats describe the filtered set only: no bucket below 4 is populated.
    let stats = result.stats.unwrap();
    assert_eq!(stats.count(3), 0);
    assert_eq!(stats.count(4), result.items.len() as u64);
}

#[tokio::test]
async fn test_category_and_feature_search() {
    let catalog = catalog();
    let venues = catalog.venues().await;

    let filters = VenueFilters {
        category: "Nightclub".to_string(),
        ..VenueFilters::default()
    };
    let result = query(
        &venues,
        &QuerySpec { criteria: filters.criteria(), sort: None, aggregate: None },
    );

    let names: Vec<&str> = result.items.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Neon Club", "Pulse Nightclub"]);

    // Feature filter is ALL semantics: both features must be present.
    let filters = VenueFilters {
        features: vec!["Live Music".to_string(), "Karaoke".to_string()],
        ..VenueFilters::default()
    };
    let result = query(
        &venues,
        &QuerySpec { criteria: filters.criteria(), sort: None, aggregate: None },
    );

    let names: Vec<&str> = result.items.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Velvet Underground"]);
}

#[tokio::test]
async fn test_text_search_matches_name_and_kind() {
    let catalog = catalog();
    let venues = catalog.venues().await;

    let filters = VenueFilters {
        query: "nightclub".to_string(),
        ..VenueFilters::default()
    };
    let result = query(
        &venues,
        &QuerySpec { criteria: filters.criteria(), sort: None, aggregate: None },
    );

    // Case-insensitive, and "Neon Club" is matched via its kind field.
    assert!(result.items.iter().any(|v| v.name == "Pulse Nightclub"));
    assert!(result.items.iter().any(|v| v.name == "Neon Club"));
}

#[tokio::test]
async fn test_review_band_filter_and_histogram() {
    let catalog = catalog();
    let reviews = catalog.reviews("1").await.unwrap();
    assert_eq!(reviews.len(), 8);

    let filters = ReviewFilters { band: "1-2".to_string() };
    let spec = QuerySpec {
        criteria: filters.criteria(),
        sort: Some(SortSpec::descending("date")),
        aggregate: Some(AggregationSpec::new("rating", 1..=5)),
    };
    let result = query(&reviews, &spec);

    // Exactly one seeded review sits in the 1-2 band.
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].author, "Riley Garcia");

    let stats = result.stats.unwrap();
    assert_eq!(stats.count(2), 1);
    assert_eq!(stats.total(), 1);
    assert!((stats.percentage(2) - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_review_sort_newest_first() {
    let catalog = catalog();
    let reviews = catalog.reviews("1").await.unwrap();

    let spec = QuerySpec {
        criteria: vec![],
        sort: Some(SortSpec::descending("date")),
        aggregate: None,
    };
    let result = query(&reviews, &spec);

    for pair in result.items.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }
}

#[tokio::test]
async fn test_history_status_filter_and_order() {
    let catalog = catalog();
    let account = catalog.account().await;

    let filters = HistoryFilters {
        query: String::new(),
        status: "paid".to_string(),
    };
    let spec = QuerySpec {
        criteria: filters.criteria(),
        sort: Some(SortSpec::ascending("date")),
        aggregate: None,
    };
    let result = query(&account.history, &spec);

    assert_eq!(result.items.len(), 2);
    for transaction in &result.items {
        assert_eq!(transaction.status, TransactionStatus::Paid);
    }
    // Oldest first under ascending date order.
    assert_eq!(result.items[0].venue, "Velvet Underground");
    assert_eq!(result.items[1].venue, "Skyline Lounge");
}

#[tokio::test]
async fn test_history_venue_search() {
    let catalog = catalog();
    let account = catalog.account().await;

    let filters = HistoryFilters {
        query: "sky".to_string(),
        status: "all".to_string(),
    };
    let result = query(
        &account.history,
        &QuerySpec { criteria: filters.criteria(), sort: None, aggregate: None },
    );

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].venue, "Skyline Lounge");
}

#[tokio::test]
async fn test_event_schedule_round_trip() {
    let catalog = catalog();
    let event = catalog.event("e1").await.unwrap();

    // 8:00 PM doors, 2:00 AM close: an overnight event.
    assert_eq!(event.duration_hours().unwrap(), 6);

    let slots = event.set_times().unwrap();
    assert_eq!(slots.len(), event.lineup.len());
    assert_eq!(slots[0].start, event.start_time);
}

#[tokio::test]
async fn test_friends_presence_filter() {
    let catalog = catalog();
    let friends = catalog.friends().await;

    let spec = QuerySpec {
        criteria: vec![Criterion::Equals {
            field: "status",
            value: "online".to_string(),
        }],
        sort: Some(SortSpec::descending("mutual_friends")),
        aggregate: None,
    };
    let result = query(&friends, &spec);

    assert_eq!(result.items.len(), 2);
    // Most mutual friends first.
    assert_eq!(result.items[0].name, "Alex Johnson");
    assert_eq!(result.items[1].name, "Morgan Lee");
}

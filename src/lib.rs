//! ClubHive Query - venue discovery and query service for the ClubHive
//! nightlife app
//!
//! This library provides the in-memory collection query engine behind the
//! app's search, reviews, Pay Later and friends views: composable filter
//! predicates, stable single-field sorting, histogram aggregation, and the
//! wall-clock utilities used for event scheduling display.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    add_minutes, duration_hours, query, AggregationSpec, Criterion, Direction, Histogram,
    QueryResult, QuerySpec, Record, SortSpec,
};
pub use models::{
    EventListing, Friend, PayLaterAccount, PayLaterTransaction, Review, ReviewFilters, Venue,
    VenueFilters,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(duration_hours("8:00 PM", "2:00 AM").unwrap(), 6);
    }
}

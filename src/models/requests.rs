use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ordering::SortSpec;
use crate::models::domain::VenueFilters;

/// Request to search venues
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchVenuesRequest {
    #[serde(default)]
    pub filters: VenueFilters,
    /// One of "relevance", "rating", "price-low", "price-high".
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u16,
}

impl Default for SearchVenuesRequest {
    fn default() -> Self {
        Self {
            filters: VenueFilters::default(),
            sort: default_sort(),
            limit: default_limit(),
        }
    }
}

impl SearchVenuesRequest {
    /// Resolve the sort parameter. "relevance" (and anything unrecognized)
    /// keeps catalog order.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        match self.sort.as_str() {
            "rating" => Some(SortSpec::descending("rating")),
            "price-low" => Some(SortSpec::ascending("typical_spend")),
            "price-high" => Some(SortSpec::descending("typical_spend")),
            _ => None,
        }
    }
}

fn default_sort() -> String {
    "relevance".to_string()
}

fn default_limit() -> u16 {
    20
}

/// Query parameters for a venue's reviews
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsQuery {
    /// Rating band: "all", "5", "4", "3", or "1-2".
    #[serde(default = "default_band")]
    pub band: String,
    /// "newest" or "oldest".
    #[serde(default = "default_review_sort")]
    pub sort: String,
}

impl ReviewsQuery {
    pub fn sort_spec(&self) -> SortSpec {
        match self.sort.as_str() {
            "oldest" => SortSpec::ascending("date"),
            _ => SortSpec::descending("date"),
        }
    }
}

fn default_band() -> String {
    "all".to_string()
}

fn default_review_sort() -> String {
    "newest".to_string()
}

/// Query parameters for Pay Later transaction history
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub query: String,
    /// "all", "paid", "pending", or "overdue".
    #[serde(default = "default_status")]
    pub status: String,
    /// "asc" (oldest first) or "desc" (newest first).
    #[serde(default = "default_order")]
    pub order: String,
}

impl HistoryQuery {
    pub fn sort_spec(&self) -> SortSpec {
        match self.order.as_str() {
            "asc" => SortSpec::ascending("date"),
            _ => SortSpec::descending("date"),
        }
    }
}

fn default_status() -> String {
    "all".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}

/// Query parameters for the friends list
#[derive(Debug, Clone, Deserialize)]
pub struct FriendsQuery {
    #[serde(default)]
    pub query: String,
    /// "all", "online", "offline", or "at-venue".
    #[serde(default = "default_status")]
    pub status: String,
}

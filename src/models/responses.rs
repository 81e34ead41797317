use serde::{Deserialize, Serialize};

use crate::core::aggregate::Histogram;
use crate::models::domain::{
    Friend, PayLaterAccount, PayLaterTransaction, Review, SetSlot, Venue,
};

/// Response for the venue search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchVenuesResponse {
    pub venues: Vec<Venue>,
    /// Matches before the limit was applied.
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    /// Floor-rating histogram over the filtered set.
    #[serde(rename = "ratingStats")]
    pub rating_stats: Option<Histogram>,
}

/// Response for a venue's reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    /// Mean rating of the reviews shown; 0 when none match the band.
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    pub histogram: Histogram,
    #[serde(rename = "totalReviews")]
    pub total_reviews: usize,
}

/// Response for toggling a review like
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    /// Interaction id handed to analytics.
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub review: Review,
}

/// Response for Pay Later transaction history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub transactions: Vec<PayLaterTransaction>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the Pay Later account snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(flatten)]
    pub account: PayLaterAccount,
    #[serde(rename = "creditUsagePercent")]
    pub credit_usage_percent: f64,
}

/// Response for the friends list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendsResponse {
    pub friends: Vec<Friend>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for an event's schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "durationHours")]
    pub duration_hours: i64,
    #[serde(rename = "setTimes")]
    pub set_times: Vec<SetSlot>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

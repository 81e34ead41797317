// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Artist, CreditTier, EventListing, Friend, FriendFilters, HistoryFilters, PayLaterAccount,
    PayLaterTransaction, PresenceStatus, Review, ReviewFilters, SetSlot, TransactionStatus, Venue,
    VenueFilters, PRICE_RANGE_FULL, RATING_BAND_FULL,
};
pub use requests::{FriendsQuery, HistoryQuery, ReviewsQuery, SearchVenuesRequest};
pub use responses::{
    AccountResponse, ErrorResponse, FriendsResponse, HealthResponse, HistoryResponse, LikeResponse,
    ReviewsResponse, ScheduleResponse, SearchVenuesResponse,
};

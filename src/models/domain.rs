use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::clock::{self, ClockError, ClockSpan, ClockTime};
use crate::core::ordering::SortSpec;
use crate::core::predicate::Criterion;
use crate::core::record::{FieldValue, Record};

/// Full bounds of the price-range slider, in rupees. A filter still at
/// these bounds is inactive.
pub const PRICE_RANGE_FULL: (u32, u32) = (0, 10_000);

/// Full bounds of the review rating band. Band "all" maps here.
pub const RATING_BAND_FULL: (f64, f64) = (1.0, 5.0);

/// A nightlife venue snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub city: String,
    pub address: String,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    pub features: Vec<String>,
    /// Typical per-person spend in rupees; what the price-range filter
    /// runs against.
    #[serde(rename = "typicalSpend")]
    pub typical_spend: u32,
    pub capacity: u32,
    #[serde(rename = "crowdLevel")]
    pub crowd_level: String,
    #[serde(rename = "musicGenres")]
    pub music_genres: Vec<String>,
    #[serde(rename = "dressCode")]
    pub dress_code: String,
    #[serde(rename = "ageRestriction")]
    pub age_restriction: String,
    /// Opening hours per lowercase weekday name, e.g.
    /// "friday" -> "6:00 PM - 3:00 AM".
    pub hours: HashMap<String, String>,
    #[serde(rename = "payLaterEnabled")]
    pub pay_later_enabled: bool,
    #[serde(rename = "bookingEnabled")]
    pub booking_enabled: bool,
    /// Stamped from `hours` by the catalog when the venue is served.
    #[serde(rename = "openNow", default)]
    pub open_now: bool,
}

impl Venue {
    /// Whether the venue is open at the given weekday/time according to its
    /// hours table. Missing or unparseable entries degrade to closed.
    pub fn is_open_at(&self, weekday: &str, time: ClockTime) -> bool {
        self.hours
            .get(weekday)
            .and_then(|span| span.parse::<ClockSpan>().ok())
            .map(|span| span.contains(time))
            .unwrap_or(false)
    }
}

impl Record for Venue {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "kind",
        "description",
        "city",
        "address",
        "rating",
        "review_count",
        "typical_spend",
        "capacity",
        "features",
        "crowd_level",
        "music_genres",
        "dress_code",
        "age_restriction",
        "open_now",
        "pay_later_enabled",
        "booking_enabled",
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "kind" => Some(FieldValue::Text(&self.kind)),
            "description" => Some(FieldValue::Text(&self.description)),
            "city" => Some(FieldValue::Text(&self.city)),
            "address" => Some(FieldValue::Text(&self.address)),
            "rating" => Some(FieldValue::Number(self.rating)),
            "review_count" => Some(FieldValue::Number(self.review_count as f64)),
            "typical_spend" => Some(FieldValue::Number(self.typical_spend as f64)),
            "capacity" => Some(FieldValue::Number(self.capacity as f64)),
            "features" => Some(FieldValue::Tags(&self.features)),
            "music_genres" => Some(FieldValue::Tags(&self.music_genres)),
            "crowd_level" => Some(FieldValue::Text(&self.crowd_level)),
            "dress_code" => Some(FieldValue::Text(&self.dress_code)),
            "age_restriction" => Some(FieldValue::Text(&self.age_restriction)),
            "open_now" => Some(FieldValue::Flag(self.open_now)),
            "pay_later_enabled" => Some(FieldValue::Flag(self.pay_later_enabled)),
            "booking_enabled" => Some(FieldValue::Flag(self.booking_enabled)),
            _ => None,
        }
    }
}

/// Venue search filters, shaped exactly as the UI holds them. Defaults are
/// the "no filter" sentinels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueFilters {
    pub query: String,
    pub location: String,
    pub category: String,
    #[serde(rename = "priceRange")]
    pub price_range: (u32, u32),
    #[serde(rename = "minRating")]
    pub min_rating: f64,
    pub features: Vec<String>,
    #[serde(rename = "openNow")]
    pub open_now: bool,
}

impl Default for VenueFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            category: String::new(),
            price_range: PRICE_RANGE_FULL,
            min_rating: 0.0,
            features: vec![],
            open_now: false,
        }
    }
}

impl VenueFilters {
    pub fn criteria(&self) -> Vec<Criterion> {
        vec![
            Criterion::Text {
                fields: &["name", "kind", "description"],
                query: self.query.clone(),
            },
            Criterion::Text {
                fields: &["city", "address"],
                query: self.location.clone(),
            },
            Criterion::Equals {
                field: "kind",
                value: self.category.clone(),
            },
            Criterion::AtLeast {
                field: "rating",
                threshold: self.min_rating,
            },
            Criterion::Within {
                field: "typical_spend",
                range: (self.price_range.0 as f64, self.price_range.1 as f64),
                full: (PRICE_RANGE_FULL.0 as f64, PRICE_RANGE_FULL.1 as f64),
            },
            Criterion::HasAll {
                field: "features",
                required: self.features.clone(),
            },
            Criterion::Enabled {
                field: "open_now",
                on: self.open_now,
            },
        ]
    }
}

/// A venue review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub author: String,
    pub rating: f64,
    pub date: DateTime<Utc>,
    pub content: String,
    pub likes: u32,
    #[serde(rename = "isLiked", default)]
    pub is_liked: bool,
}

impl Record for Review {
    const FIELDS: &'static [&'static str] = &["author", "rating", "date", "content", "likes"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "author" => Some(FieldValue::Text(&self.author)),
            "rating" => Some(FieldValue::Number(self.rating)),
            "date" => Some(FieldValue::Instant(self.date)),
            "content" => Some(FieldValue::Text(&self.content)),
            "likes" => Some(FieldValue::Number(self.likes as f64)),
            _ => None,
        }
    }
}

/// Map a review rating band name onto an inclusive range. Band "all" (and
/// anything unrecognized) maps to the full bounds, i.e. inactive.
pub fn rating_band(band: &str) -> (f64, f64) {
    match band {
        "5" => (5.0, 5.0),
        "4" => (4.0, 4.0),
        "3" => (3.0, 3.0),
        "1-2" => (1.0, 2.0),
        _ => RATING_BAND_FULL,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilters {
    pub band: String,
}

impl ReviewFilters {
    pub fn criteria(&self) -> Vec<Criterion> {
        vec![Criterion::Within {
            field: "rating",
            range: rating_band(&self.band),
            full: RATING_BAND_FULL,
        }]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Overdue,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Overdue => "overdue",
        }
    }
}

/// One Pay Later purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayLaterTransaction {
    pub id: String,
    pub venue: String,
    pub amount: u32,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    #[serde(rename = "dueDate")]
    pub due_date: DateTime<Utc>,
}

impl Record for PayLaterTransaction {
    const FIELDS: &'static [&'static str] = &["venue", "amount", "date", "status", "due_date"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "venue" => Some(FieldValue::Text(&self.venue)),
            "amount" => Some(FieldValue::Number(self.amount as f64)),
            "date" => Some(FieldValue::Instant(self.date)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "due_date" => Some(FieldValue::Instant(self.due_date)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryFilters {
    pub query: String,
    pub status: String,
}

impl HistoryFilters {
    pub fn criteria(&self) -> Vec<Criterion> {
        vec![
            Criterion::Text {
                fields: &["venue"],
                query: self.query.clone(),
            },
            Criterion::Equals {
                field: "status",
                value: self.status.clone(),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Pay Later account snapshot, history included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayLaterAccount {
    #[serde(rename = "creditLimit")]
    pub credit_limit: u32,
    #[serde(rename = "availableCredit")]
    pub available_credit: u32,
    #[serde(rename = "currentBalance")]
    pub current_balance: u32,
    #[serde(rename = "nextPaymentDate")]
    pub next_payment_date: DateTime<Utc>,
    #[serde(rename = "creditScore")]
    pub credit_score: u32,
    pub tier: CreditTier,
    pub history: Vec<PayLaterTransaction>,
}

impl PayLaterAccount {
    /// Share of the credit limit currently in use, in percent. A zero limit
    /// yields 0, never a division error.
    pub fn credit_usage_percent(&self) -> f64 {
        if self.credit_limit == 0 {
            return 0.0;
        }
        self.current_balance as f64 / self.credit_limit as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresenceStatus {
    Online,
    Offline,
    AtVenue,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Online => "online",
            PresenceStatus::Offline => "offline",
            PresenceStatus::AtVenue => "at-venue",
        }
    }
}

/// A friend on the user's list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub status: PresenceStatus,
    #[serde(rename = "currentVenue")]
    pub current_venue: Option<String>,
    #[serde(rename = "mutualFriends")]
    pub mutual_friends: u32,
    #[serde(rename = "nightOutPreferences")]
    pub night_out_preferences: Vec<String>,
}

impl Record for Friend {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "status",
        "current_venue",
        "mutual_friends",
        "night_out_preferences",
    ];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            // Absent while the friend is not checked in anywhere.
            "current_venue" => self.current_venue.as_deref().map(FieldValue::Text),
            "mutual_friends" => Some(FieldValue::Number(self.mutual_friends as f64)),
            "night_out_preferences" => Some(FieldValue::Tags(&self.night_out_preferences)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FriendFilters {
    pub query: String,
    pub status: String,
}

impl FriendFilters {
    pub fn criteria(&self) -> Vec<Criterion> {
        vec![
            Criterion::Text {
                fields: &["name"],
                query: self.query.clone(),
            },
            Criterion::Equals {
                field: "status",
                value: self.status.clone(),
            },
        ]
    }

    /// Friends list order: most mutual friends first.
    pub fn sort() -> SortSpec {
        SortSpec::descending("mutual_friends")
    }
}

/// A lineup artist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genre: String,
    #[serde(rename = "spotifyUrl", default)]
    pub spotify_url: Option<String>,
    #[serde(rename = "instagramUrl", default)]
    pub instagram_url: Option<String>,
}

/// A scheduled event at a venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListing {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "venueId")]
    pub venue_id: String,
    #[serde(rename = "venueName")]
    pub venue_name: String,
    pub date: DateTime<Utc>,
    /// Wall-clock strings like "8:00 PM"; `date` carries the day.
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(rename = "ticketFloor")]
    pub ticket_floor: u32,
    #[serde(rename = "ticketCeiling")]
    pub ticket_ceiling: u32,
    pub lineup: Vec<Artist>,
    pub attendees: u32,
    #[serde(rename = "maxCapacity")]
    pub max_capacity: u32,
    pub tags: Vec<String>,
    #[serde(rename = "ageRestriction")]
    pub age_restriction: String,
    #[serde(rename = "dressCode")]
    pub dress_code: String,
}

/// One lineup slot with display times
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSlot {
    pub artist: String,
    pub start: String,
    pub end: String,
}

impl EventListing {
    /// Whole hours between doors and close, overnight events included.
    pub fn duration_hours(&self) -> Result<i64, ClockError> {
        clock::duration_hours(&self.start_time, &self.end_time)
    }

    /// Display set times for the lineup: the opener holds the first 90
    /// minutes from doors, each later slot runs start+30+60i to
    /// start+90+60i.
    pub fn set_times(&self) -> Result<Vec<SetSlot>, ClockError> {
        self.lineup
            .iter()
            .enumerate()
            .map(|(index, artist)| {
                let (start, end) = if index == 0 {
                    (
                        self.start_time.clone(),
                        clock::add_minutes(&self.start_time, 90)?,
                    )
                } else {
                    let offset = (index * 60) as u32;
                    (
                        clock::add_minutes(&self.start_time, 30 + offset)?,
                        clock::add_minutes(&self.start_time, 90 + offset)?,
                    )
                };

                Ok(SetSlot {
                    artist: artist.name.clone(),
                    start,
                    end,
                })
            })
            .collect()
    }
}

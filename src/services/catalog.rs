use std::collections::HashMap;
use std::time::Duration;

use chrono::{Local, Timelike, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::core::clock::ClockTime;
use crate::models::{
    Artist, CreditTier, EventListing, Friend, PayLaterAccount, PayLaterTransaction,
    PresenceStatus, Review, TransactionStatus, Venue,
};

/// Errors that can occur reading from the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("not found: {0}")]
    NotFound(String),
}

/// In-memory data source for the whole app.
///
/// Everything is seeded at startup and served after a configurable
/// artificial latency, standing in for the real backend during
/// development. Reviews are the only mutable collection (the like toggle);
/// everything else is handed out as fresh clones.
pub struct Catalog {
    venues: Vec<Venue>,
    events: Vec<EventListing>,
    reviews: RwLock<HashMap<String, Vec<Review>>>,
    account: PayLaterAccount,
    friends: Vec<Friend>,
    latency: Duration,
}

impl Catalog {
    pub fn seed(latency_ms: u64) -> Self {
        Self {
            venues: seed_venues(),
            events: seed_events(),
            reviews: RwLock::new(seed_reviews()),
            account: seed_account(),
            friends: seed_friends(),
            latency: Duration::from_millis(latency_ms),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// All venues, with `open_now` stamped from each venue's hours table
    /// against the local wall clock.
    pub async fn venues(&self) -> Vec<Venue> {
        self.simulate_latency().await;

        let now = Local::now();
        let weekday = now.format("%A").to_string().to_ascii_lowercase();
        let time = ClockTime::from_hm24(now.hour(), now.minute());

        let mut venues = self.venues.clone();
        for venue in &mut venues {
            venue.open_now = venue.is_open_at(&weekday, time);
        }

        venues
    }

    /// Reviews for a venue, newest entries as seeded. An unknown venue id
    /// is an error; a venue without reviews yet is an empty list.
    pub async fn reviews(&self, venue_id: &str) -> Result<Vec<Review>, CatalogError> {
        self.simulate_latency().await;

        if !self.venues.iter().any(|venue| venue.id == venue_id) {
            return Err(CatalogError::NotFound(format!("venue {}", venue_id)));
        }

        let reviews = self.reviews.read().await;
        Ok(reviews.get(venue_id).cloned().unwrap_or_default())
    }

    /// Flip the like state of a review and adjust its like count. Returns
    /// the updated review.
    pub async fn toggle_review_like(
        &self,
        venue_id: &str,
        review_id: &str,
    ) -> Result<Review, CatalogError> {
        self.simulate_latency().await;

        let mut reviews = self.reviews.write().await;
        let review = reviews
            .get_mut(venue_id)
            .and_then(|list| list.iter_mut().find(|review| review.id == review_id))
            .ok_or_else(|| CatalogError::NotFound(format!("review {}", review_id)))?;

        review.is_liked = !review.is_liked;
        if review.is_liked {
            review.likes += 1;
        } else {
            review.likes = review.likes.saturating_sub(1);
        }

        tracing::debug!(
            "Toggled like on review {} (now liked={}, likes={})",
            review_id,
            review.is_liked,
            review.likes
        );

        Ok(review.clone())
    }

    pub async fn event(&self, event_id: &str) -> Result<EventListing, CatalogError> {
        self.simulate_latency().await;

        self.events
            .iter()
            .find(|event| event.id == event_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("event {}", event_id)))
    }

    pub async fn account(&self) -> PayLaterAccount {
        self.simulate_latency().await;
        self.account.clone()
    }

    pub async fn friends(&self) -> Vec<Friend> {
        self.simulate_latency().await;
        self.friends.clone()
    }
}

fn weekly_hours(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(day, span)| (day.to_string(), span.to_string()))
        .collect()
}

fn seed_venues() -> Vec<Venue> {
    vec![
        Venue {
            id: "1".to_string(),
            name: "Skyline Lounge".to_string(),
            kind: "Rooftop Bar".to_string(),
            description: "Premium rooftop experience with panoramic city views and craft cocktails"
                .to_string(),
            city: "Mumbai".to_string(),
            address: "123 High Street, Downtown".to_string(),
            rating: 4.8,
            review_count: 324,
            features: vec![
                "Live Music".to_string(),
                "Cocktails".to_string(),
                "City View".to_string(),
                "Outdoor Seating".to_string(),
                "VIP Tables".to_string(),
            ],
            typical_spend: 2500,
            capacity: 200,
            crowd_level: "High".to_string(),
            music_genres: vec![
                "Jazz".to_string(),
                "Lounge".to_string(),
                "Electronic".to_string(),
            ],
            dress_code: "Smart Casual".to_string(),
            age_restriction: "21+".to_string(),
            hours: weekly_hours(&[
                ("monday", "6:00 PM - 2:00 AM"),
                ("tuesday", "6:00 PM - 2:00 AM"),
                ("wednesday", "6:00 PM - 2:00 AM"),
                ("thursday", "6:00 PM - 2:00 AM"),
                ("friday", "6:00 PM - 3:00 AM"),
                ("saturday", "6:00 PM - 3:00 AM"),
                ("sunday", "6:00 PM - 1:00 AM"),
            ]),
            pay_later_enabled: true,
            booking_enabled: true,
            open_now: false,
        },
        Venue {
            id: "2".to_string(),
            name: "Neon Club".to_string(),
            kind: "Nightclub".to_string(),
            description: "High-energy dance floors with resident DJs every weekend".to_string(),
            city: "Mumbai".to_string(),
            address: "45 Marine Drive, City Center".to_string(),
            rating: 4.2,
            review_count: 512,
            features: vec![
                "Dance Floor".to_string(),
                "VIP Tables".to_string(),
                "Smoking Area".to_string(),
            ],
            typical_spend: 3000,
            capacity: 450,
            crowd_level: "High".to_string(),
            music_genres: vec!["EDM".to_string(), "House".to_string()],
            dress_code: "Club Wear".to_string(),
            age_restriction: "21+".to_string(),
            // Closed early in the week; missing days read as closed.
            hours: weekly_hours(&[
                ("thursday", "10:00 PM - 4:00 AM"),
                ("friday", "10:00 PM - 5:00 AM"),
                ("saturday", "10:00 PM - 5:00 AM"),
                ("sunday", "9:00 PM - 3:00 AM"),
            ]),
            pay_later_enabled: true,
            booking_enabled: true,
            open_now: false,
        },
        Venue {
            id: "3".to_string(),
            name: "Velvet Underground".to_string(),
            kind: "Lounge Bar".to_string(),
            description: "Intimate lounge with live jazz, soul nights and a serious whisky list"
                .to_string(),
            city: "Mumbai".to_string(),
            address: "8 Gallery Row, Arts District".to_string(),
            rating: 4.5,
            review_count: 189,
            features: vec![
                "Live Music".to_string(),
                "Cocktails".to_string(),
                "Karaoke".to_string(),
            ],
            typical_spend: 1800,
            capacity: 120,
            crowd_level: "Low".to_string(),
            music_genres: vec!["Jazz".to_string(), "Soul".to_string()],
            dress_code: "Smart Casual".to_string(),
            age_restriction: "25+".to_string(),
            hours: weekly_hours(&[
                ("wednesday", "7:00 PM - 1:00 AM"),
                ("thursday", "7:00 PM - 1:00 AM"),
                ("friday", "7:00 PM - 2:00 AM"),
                ("saturday", "7:00 PM - 2:00 AM"),
            ]),
            pay_later_enabled: true,
            booking_enabled: false,
            open_now: false,
        },
        Venue {
            id: "4".to_string(),
            name: "Pulse Nightclub".to_string(),
            kind: "Nightclub".to_string(),
            description: "Three floors of EDM and hip hop with stadium-grade sound".to_string(),
            city: "Delhi".to_string(),
            address: "200 Ring Road, Connaught".to_string(),
            rating: 3.9,
            review_count: 276,
            features: vec![
                "Dance Floor".to_string(),
                "Sports Screening".to_string(),
                "Smoking Area".to_string(),
            ],
            typical_spend: 2200,
            capacity: 500,
            crowd_level: "High".to_string(),
            music_genres: vec!["EDM".to_string(), "Hip Hop".to_string()],
            dress_code: "Casual".to_string(),
            age_restriction: "21+".to_string(),
            hours: weekly_hours(&[
                ("friday", "9:00 PM - 4:00 AM"),
                ("saturday", "9:00 PM - 4:00 AM"),
            ]),
            pay_later_enabled: true,
            booking_enabled: true,
            open_now: false,
        },
        Venue {
            id: "5".to_string(),
            name: "Oak & Barrel".to_string(),
            kind: "Brewery".to_string(),
            description: "Craft brewery taproom with garden seating and weekend screenings"
                .to_string(),
            city: "Delhi".to_string(),
            address: "12 Mill Lane, Cyber Hub".to_string(),
            rating: 4.1,
            review_count: 98,
            features: vec![
                "Outdoor Seating".to_string(),
                "Sports Screening".to_string(),
            ],
            typical_spend: 1200,
            capacity: 150,
            crowd_level: "Moderate".to_string(),
            music_genres: vec!["Rock".to_string()],
            dress_code: "Casual".to_string(),
            age_restriction: "18+".to_string(),
            hours: weekly_hours(&[
                ("monday", "12:00 PM - 11:00 PM"),
                ("tuesday", "12:00 PM - 11:00 PM"),
                ("wednesday", "12:00 PM - 11:00 PM"),
                ("thursday", "12:00 PM - 11:00 PM"),
                ("friday", "12:00 PM - 1:00 AM"),
                ("saturday", "12:00 PM - 1:00 AM"),
                ("sunday", "12:00 PM - 10:00 PM"),
            ]),
            pay_later_enabled: false,
            booking_enabled: true,
            open_now: false,
        },
        Venue {
            id: "6".to_string(),
            name: "The Hidden Door".to_string(),
            kind: "Pub".to_string(),
            description: "Neighbourhood pub with karaoke booths and pocket-friendly pints"
                .to_string(),
            city: "Mumbai".to_string(),
            address: "77 Station Road, Bandra".to_string(),
            rating: 3.2,
            review_count: 45,
            features: vec!["Karaoke".to_string(), "Smoking Area".to_string()],
            typical_spend: 800,
            capacity: 80,
            crowd_level: "Low".to_string(),
            music_genres: vec!["Pop".to_string()],
            dress_code: "Casual".to_string(),
            age_restriction: "18+".to_string(),
            hours: weekly_hours(&[
                ("monday", "5:00 PM - 12:00 AM"),
                ("tuesday", "5:00 PM - 12:00 AM"),
                ("wednesday", "5:00 PM - 12:00 AM"),
                ("thursday", "5:00 PM - 12:00 AM"),
                ("friday", "5:00 PM - 1:30 AM"),
                ("saturday", "5:00 PM - 1:30 AM"),
                ("sunday", "5:00 PM - 11:00 PM"),
            ]),
            pay_later_enabled: false,
            booking_enabled: false,
            open_now: false,
        },
    ]
}

fn seed_events() -> Vec<EventListing> {
    let artists = [
        Artist {
            id: "a1".to_string(),
            name: "DJ Pulse".to_string(),
            genre: "EDM".to_string(),
            spotify_url: Some("https://open.spotify.com/artist/djpulse".to_string()),
            instagram_url: Some("https://instagram.com/djpulse".to_string()),
        },
        Artist {
            id: "a2".to_string(),
            name: "Melody Makers".to_string(),
            genre: "Jazz".to_string(),
            spotify_url: Some("https://open.spotify.com/artist/melodymakers".to_string()),
            instagram_url: None,
        },
        Artist {
            id: "a3".to_string(),
            name: "Rhythm Collective".to_string(),
            genre: "Hip Hop".to_string(),
            spotify_url: None,
            instagram_url: Some("https://instagram.com/rhythmcollective".to_string()),
        },
    ];

    vec![
        EventListing {
            id: "e1".to_string(),
            name: "Summer Beats Festival".to_string(),
            description: "The ultimate summer EDM festival featuring top DJs and performers."
                .to_string(),
            venue_id: "1".to_string(),
            venue_name: "Skyline Lounge".to_string(),
            date: Utc::now() + chrono::Duration::days(7),
            start_time: "8:00 PM".to_string(),
            end_time: "2:00 AM".to_string(),
            ticket_floor: 1500,
            ticket_ceiling: 5000,
            lineup: vec![artists[0].clone(), artists[2].clone()],
            attendees: 234,
            max_capacity: 500,
            tags: vec![
                "EDM".to_string(),
                "Festival".to_string(),
                "Rooftop".to_string(),
            ],
            age_restriction: "21+".to_string(),
            dress_code: "Smart Casual".to_string(),
        },
        EventListing {
            id: "e2".to_string(),
            name: "Jazz Nights".to_string(),
            description: "An intimate evening of live jazz standards and originals.".to_string(),
            venue_id: "3".to_string(),
            venue_name: "Velvet Underground".to_string(),
            date: Utc::now() + chrono::Duration::days(3),
            start_time: "7:00 PM".to_string(),
            end_time: "12:00 AM".to_string(),
            ticket_floor: 800,
            ticket_ceiling: 2000,
            lineup: vec![artists[1].clone()],
            attendees: 85,
            max_capacity: 120,
            tags: vec!["Jazz".to_string(), "Live Music".to_string()],
            age_restriction: "25+".to_string(),
            dress_code: "Smart Casual".to_string(),
        },
    ]
}

fn seed_reviews() -> HashMap<String, Vec<Review>> {
    let review = |id: &str, venue_id: &str, author: &str, rating: f64, days_ago: i64,
                  content: &str, likes: u32, is_liked: bool| Review {
        id: id.to_string(),
        venue_id: venue_id.to_string(),
        author: author.to_string(),
        rating,
        date: Utc::now() - chrono::Duration::days(days_ago),
        content: content.to_string(),
        likes,
        is_liked,
    };

    let mut reviews = HashMap::new();
    reviews.insert(
        "1".to_string(),
        vec![
            review(
                "r1", "1", "Alex Johnson", 5.0, 2,
                "Amazing atmosphere and great cocktails! The rooftop view is absolutely stunning, \
                 especially during sunset.",
                12, false,
            ),
            review(
                "r2", "1", "Jamie Smith", 4.0, 5,
                "Great place for a night out with friends. The drinks are a bit pricey but the \
                 quality is excellent.",
                8, true,
            ),
            review(
                "r3", "1", "Taylor Rodriguez", 5.0, 7,
                "Perfect venue for special occasions! The VIP section was worth every penny.",
                15, false,
            ),
            review(
                "r4", "1", "Morgan Lee", 3.0, 10,
                "Decent place but nothing extraordinary. The music was too loud for conversation \
                 and the crowd was quite young.",
                3, false,
            ),
            review(
                "r5", "1", "Casey Thompson", 4.0, 12,
                "Love the ambiance and the live music nights are fantastic! The jazz performances \
                 on Thursdays are a must-see.",
                9, true,
            ),
            review(
                "r6", "1", "Jordan Williams", 5.0, 15,
                "The outdoor seating area is beautiful and the city views are incredible. Perfect \
                 for date nights.",
                18, false,
            ),
            review(
                "r7", "1", "Riley Garcia", 2.0, 18,
                "Disappointing experience. Waited 30 minutes just to get a drink and the dance \
                 floor was uncomfortably packed.",
                2, false,
            ),
            review(
                "r8", "1", "Avery Brown", 4.0, 20,
                "Great spot for weekend parties! The DJ lineup is always impressive and the sound \
                 system is top quality.",
                7, true,
            ),
        ],
    );
    reviews.insert(
        "3".to_string(),
        vec![
            review(
                "r9", "3", "Sam Kapoor", 5.0, 4,
                "Best jazz room in the city, full stop. Get there early for the window booths.",
                11, false,
            ),
            review(
                "r10", "3", "Dana Mehta", 4.0, 9,
                "Lovely intimate vibe and a whisky list that goes on forever.",
                5, false,
            ),
        ],
    );

    reviews
}

fn seed_account() -> PayLaterAccount {
    let transaction = |id: &str, venue: &str, amount: u32, days_ago: i64,
                       status: TransactionStatus, due_in_days: i64| PayLaterTransaction {
        id: id.to_string(),
        venue: venue.to_string(),
        amount,
        date: Utc::now() - chrono::Duration::days(days_ago),
        status,
        due_date: Utc::now() + chrono::Duration::days(due_in_days),
    };

    PayLaterAccount {
        credit_limit: 10_000,
        available_credit: 7_500,
        current_balance: 2_500,
        next_payment_date: Utc::now() + chrono::Duration::days(7),
        credit_score: 780,
        tier: CreditTier::Gold,
        history: vec![
            transaction("pl-1", "Skyline Lounge", 1500, 10, TransactionStatus::Paid, -3),
            transaction("pl-2", "Neon Club", 2500, 3, TransactionStatus::Pending, 7),
            transaction("pl-3", "Velvet Underground", 800, 15, TransactionStatus::Paid, -8),
            transaction("pl-4", "Pulse Nightclub", 1200, 20, TransactionStatus::Overdue, -5),
        ],
    }
}

fn seed_friends() -> Vec<Friend> {
    vec![
        Friend {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            status: PresenceStatus::Online,
            current_venue: None,
            mutual_friends: 12,
            night_out_preferences: vec![
                "EDM".to_string(),
                "Cocktails".to_string(),
                "Rooftop Bars".to_string(),
            ],
        },
        Friend {
            id: "2".to_string(),
            name: "Jamie Smith".to_string(),
            status: PresenceStatus::AtVenue,
            current_venue: Some("Skyline Lounge".to_string()),
            mutual_friends: 8,
            night_out_preferences: vec![
                "Jazz".to_string(),
                "Wine Bars".to_string(),
                "Live Music".to_string(),
            ],
        },
        Friend {
            id: "3".to_string(),
            name: "Taylor Rodriguez".to_string(),
            status: PresenceStatus::Offline,
            current_venue: None,
            mutual_friends: 5,
            night_out_preferences: vec![
                "Hip Hop".to_string(),
                "Clubs".to_string(),
                "Dancing".to_string(),
            ],
        },
        Friend {
            id: "4".to_string(),
            name: "Morgan Lee".to_string(),
            status: PresenceStatus::Online,
            current_venue: None,
            mutual_friends: 3,
            night_out_preferences: vec![
                "Karaoke".to_string(),
                "Craft Beer".to_string(),
                "Casual".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        // Zero latency keeps the tests instant.
        Catalog::seed(0)
    }

    #[tokio::test]
    async fn test_seeded_venues_present() {
        let venues = catalog().venues().await;

        assert_eq!(venues.len(), 6);
        assert!(venues.iter().any(|venue| venue.name == "Skyline Lounge"));
    }

    #[tokio::test]
    async fn test_reviews_unknown_venue_is_not_found() {
        let result = catalog().reviews("no-such-venue").await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reviews_venue_without_entries_is_empty() {
        let reviews = catalog().reviews("6").await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_like_round_trip() {
        let catalog = catalog();

        let before = catalog.reviews("1").await.unwrap();
        let first = before.first().unwrap().clone();
        assert!(!first.is_liked);

        let liked = catalog.toggle_review_like("1", &first.id).await.unwrap();
        assert!(liked.is_liked);
        assert_eq!(liked.likes, first.likes + 1);

        let unliked = catalog.toggle_review_like("1", &first.id).await.unwrap();
        assert!(!unliked.is_liked);
        assert_eq!(unliked.likes, first.likes);
    }

    #[tokio::test]
    async fn test_event_lookup() {
        let catalog = catalog();

        let event = catalog.event("e1").await.unwrap();
        assert_eq!(event.venue_name, "Skyline Lounge");

        assert!(matches!(
            catalog.event("e99").await,
            Err(CatalogError::NotFound(_))
        ));
    }
}

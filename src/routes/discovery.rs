use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{self, AggregationSpec, QuerySpec, SortSpec};
use crate::models::{
    AccountResponse, ErrorResponse, FriendFilters, FriendsQuery, FriendsResponse, HealthResponse,
    HistoryFilters, HistoryQuery, HistoryResponse, LikeResponse, ReviewFilters, ReviewsQuery,
    ReviewsResponse, ScheduleResponse, SearchVenuesRequest, SearchVenuesResponse,
};
use crate::services::{CacheKey, Catalog, CatalogError, ResponseCache};

/// How many venues the popular shelf shows.
const POPULAR_SHELF_SIZE: usize = 6;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub cache: Arc<ResponseCache>,
    pub max_limit: u16,
}

/// Configure all discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/venues/search", web::post().to(search_venues))
        .route("/venues/popular", web::get().to(popular_venues))
        .route("/venues/{venue_id}/reviews", web::get().to(venue_reviews))
        .route(
            "/venues/{venue_id}/reviews/{review_id}/like",
            web::post().to(like_review),
        )
        .route("/paylater/account", web::get().to(pay_later_account))
        .route("/paylater/history", web::get().to(pay_later_history))
        .route("/events/{event_id}/schedule", web::get().to(event_schedule))
        .route("/friends", web::get().to(search_friends));
}

fn not_found(what: &str, err: CatalogError) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: format!("{} not found", what),
        message: err.to_string(),
        status_code: 404,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Venue search endpoint
///
/// POST /api/v1/venues/search
///
/// Request body:
/// ```json
/// {
///   "filters": {
///     "query": "sky",
///     "category": "Rooftop Bar",
///     "priceRange": [0, 10000],
///     "minRating": 4,
///     "features": ["Live Music"],
///     "openNow": false
///   },
///   "sort": "rating",
///   "limit": 20
/// }
/// ```
///
/// Omitted filters stay at their defaults, which deactivate them.
async fn search_venues(
    state: web::Data<AppState>,
    req: web::Json<SearchVenuesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for venue search: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = req.limit.min(state.max_limit) as usize;

    let cache_key = CacheKey::venue_search(&req);
    if let Ok(cached) = state.cache.get::<SearchVenuesResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let venues = state.catalog.venues().await;

    let spec = QuerySpec {
        criteria: req.filters.criteria(),
        sort: req.sort_spec(),
        aggregate: Some(AggregationSpec::new("rating", 1..=5)),
    };
    let result = core::query(&venues, &spec);

    let total_results = result.items.len();
    let mut matched = result.items;
    matched.truncate(limit);

    tracing::info!(
        "Venue search returned {} of {} matches (query: {:?})",
        matched.len(),
        total_results,
        req.filters.query
    );

    let response = SearchVenuesResponse {
        venues: matched,
        total_results,
        rating_stats: result.stats,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache venue search: {}", e);
    }

    HttpResponse::Ok().json(response)
}

/// Popular venues endpoint: top venues by rating
///
/// GET /api/v1/venues/popular
async fn popular_venues(state: web::Data<AppState>) -> impl Responder {
    let cache_key = CacheKey::popular_venues();
    if let Ok(cached) = state.cache.get::<SearchVenuesResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let venues = state.catalog.venues().await;

    let spec = QuerySpec {
        criteria: vec![],
        sort: Some(SortSpec::descending("rating")),
        aggregate: None,
    };
    let result = core::query(&venues, &spec);

    let total_results = result.items.len();
    let mut shelf = result.items;
    shelf.truncate(POPULAR_SHELF_SIZE);

    let response = SearchVenuesResponse {
        venues: shelf,
        total_results,
        rating_stats: None,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache popular venues: {}", e);
    }

    HttpResponse::Ok().json(response)
}

/// Reviews endpoint with rating-band filter and histogram
///
/// GET /api/v1/venues/{venue_id}/reviews?band=4&sort=newest
async fn venue_reviews(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ReviewsQuery>,
) -> impl Responder {
    let venue_id = path.into_inner();

    let cache_key = CacheKey::reviews(&venue_id, &query.band, &query.sort);
    if let Ok(cached) = state.cache.get::<ReviewsResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let reviews = match state.catalog.reviews(&venue_id).await {
        Ok(reviews) => reviews,
        Err(e) => return not_found("Venue", e),
    };

    let filters = ReviewFilters { band: query.band.clone() };
    let spec = QuerySpec {
        criteria: filters.criteria(),
        sort: Some(query.sort_spec()),
        aggregate: Some(AggregationSpec::new("rating", 1..=5)),
    };
    let result = core::query(&reviews, &spec);

    // Average over what the user actually sees, like the histogram.
    let average_rating = if result.items.is_empty() {
        0.0
    } else {
        result.items.iter().map(|review| review.rating).sum::<f64>() / result.items.len() as f64
    };

    let total_reviews = result.items.len();
    let histogram = result.stats.unwrap_or_else(|| {
        core::Histogram::over(&result.items, &AggregationSpec::new("rating", 1..=5))
    });

    let response = ReviewsResponse {
        reviews: result.items,
        average_rating,
        histogram,
        total_reviews,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache reviews: {}", e);
    }

    HttpResponse::Ok().json(response)
}

/// Toggle whether the current user finds a review helpful
///
/// POST /api/v1/venues/{venue_id}/reviews/{review_id}/like
async fn like_review(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (venue_id, review_id) = path.into_inner();

    match state.catalog.toggle_review_like(&venue_id, &review_id).await {
        Ok(review) => {
            // Cached review lists now carry stale like counts.
            state.cache.purge();

            HttpResponse::Ok().json(LikeResponse {
                success: true,
                event_id: uuid::Uuid::new_v4().to_string(),
                review,
            })
        }
        Err(e) => not_found("Review", e),
    }
}

/// Pay Later account snapshot
///
/// GET /api/v1/paylater/account
async fn pay_later_account(state: web::Data<AppState>) -> impl Responder {
    let account = state.catalog.account().await;
    let credit_usage_percent = account.credit_usage_percent();

    HttpResponse::Ok().json(AccountResponse {
        account,
        credit_usage_percent,
    })
}

/// Pay Later transaction history with search, status filter and date sort
///
/// GET /api/v1/paylater/history?query=sky&status=paid&order=desc
async fn pay_later_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let cache_key = CacheKey::history(&query.query, &query.status, &query.order);
    if let Ok(cached) = state.cache.get::<HistoryResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let account = state.catalog.account().await;

    let filters = HistoryFilters {
        query: query.query.clone(),
        status: query.status.clone(),
    };
    let spec = QuerySpec {
        criteria: filters.criteria(),
        sort: Some(query.sort_spec()),
        aggregate: None,
    };
    let result = core::query(&account.history, &spec);

    let response = HistoryResponse {
        total_results: result.items.len(),
        transactions: result.items,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache history: {}", e);
    }

    HttpResponse::Ok().json(response)
}

/// Event schedule: duration and lineup set times
///
/// GET /api/v1/events/{event_id}/schedule
async fn event_schedule(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let event_id = path.into_inner();

    let event = match state.catalog.event(&event_id).await {
        Ok(event) => event,
        Err(e) => return not_found("Event", e),
    };

    let (duration_hours, set_times) = match (event.duration_hours(), event.set_times()) {
        (Ok(duration), Ok(slots)) => (duration, slots),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Event {} has invalid times: {}", event_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Invalid event times".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    HttpResponse::Ok().json(ScheduleResponse {
        event_id: event.id,
        duration_hours,
        set_times,
    })
}

/// Friends list with name search and presence filter
///
/// GET /api/v1/friends?query=alex&status=online
async fn search_friends(
    state: web::Data<AppState>,
    query: web::Query<FriendsQuery>,
) -> impl Responder {
    let cache_key = CacheKey::friends(&query.query, &query.status);
    if let Ok(cached) = state.cache.get::<FriendsResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let friends = state.catalog.friends().await;

    let filters = FriendFilters {
        query: query.query.clone(),
        status: query.status.clone(),
    };
    let spec = QuerySpec {
        criteria: filters.criteria(),
        sort: Some(FriendFilters::sort()),
        aggregate: None,
    };
    let result = core::query(&friends, &spec);

    let response = FriendsResponse {
        total_results: result.items.len(),
        friends: result.items,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache friends: {}", e);
    }

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}

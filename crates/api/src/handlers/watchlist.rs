//! # Watchlist Handlers
//!
//! Ranked fill-in suggestions for a groomer-day: waitlisted customers are
//! scored against the target date's area assignment and the stops already
//! on the route. Hard filters (reliability floor, value-tier allow-list,
//! distance cap) exclude candidates before any scoring.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use groomroute_core::{
    areas::find_matching_area,
    clock,
    errors::GroomError,
    geo::GeoPoint,
    models::{
        area::ServiceArea,
        customer::{ReliabilityTier, ValueTier},
    },
    watchlist::{
        rank_watchlist, RankerWeights, WatchlistCandidate, WatchlistContext, WatchlistFilters,
        WatchlistSuggestion,
    },
};
use uuid::Uuid;

use crate::{
    handlers::common::{account_tz, require_groomer},
    middleware::{error_handling::AppError, tenant::TenantId},
    ApiState,
};

/// Suggestions returned when the caller does not say how many they want.
const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Query parameters for the watchlist suggestions endpoint
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub groomer_id: Uuid,

    /// Target day, `YYYY-MM-DD` in the account's timezone
    pub date: String,

    /// Maximum number of suggestions to return (default 10)
    pub limit: Option<usize>,

    /// Reliability floor: `RELIABLE`, `FAIR`, or `UNRELIABLE`
    pub min_reliability_tier: Option<String>,

    /// Comma-separated value-tier allow-list: `HIGH,STANDARD,LOW`
    pub value_tiers: Option<String>,

    /// Exclude candidates farther than this from the day's route
    pub max_distance_miles: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub groomer_id: Uuid,
    pub date: String,
    pub area_id: Option<Uuid>,
    pub suggestions: Vec<WatchlistSuggestion>,
}

fn parse_reliability(value: &str) -> Result<ReliabilityTier, AppError> {
    match value.trim().to_ascii_uppercase().as_str() {
        "RELIABLE" => Ok(ReliabilityTier::Reliable),
        "FAIR" => Ok(ReliabilityTier::Fair),
        "UNRELIABLE" => Ok(ReliabilityTier::Unreliable),
        other => Err(AppError(GroomError::Validation(format!(
            "Unknown reliability tier: {}",
            other
        )))),
    }
}

fn parse_value_tiers(value: &str) -> Result<Vec<ValueTier>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.to_ascii_uppercase().as_str() {
            "HIGH" => Ok(ValueTier::High),
            "STANDARD" => Ok(ValueTier::Standard),
            "LOW" => Ok(ValueTier::Low),
            other => Err(AppError(GroomError::Validation(format!(
                "Unknown value tier: {}",
                other
            )))),
        })
        .collect()
}

/// Ranks waitlisted customers as fill-ins for a groomer-day
///
/// # Endpoint
///
/// ```text
/// GET /api/watchlist/suggestions?groomer_id=...&date=2025-06-02&limit=5
/// ```
#[axum::debug_handler]
pub async fn get_suggestions(
    State(state): State<Arc<ApiState>>,
    TenantId(account_id): TenantId,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    // STEP 1: validate inputs
    let date = clock::parse_date(&query.date)?;
    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);

    let filters = WatchlistFilters {
        min_reliability_tier: query
            .min_reliability_tier
            .as_deref()
            .map(parse_reliability)
            .transpose()?,
        value_tiers: query
            .value_tiers
            .as_deref()
            .map(parse_value_tiers)
            .transpose()?,
        max_distance_miles: query.max_distance_miles,
    };

    let _groomer = require_groomer(&state.db_pool, account_id, query.groomer_id).await?;
    let tz = account_tz(&state.db_pool, account_id).await?;

    // STEP 2: resolve the groomer's area for the target date
    let groomer_area_id = groomroute_db::repositories::areas::resolve_area_for_date(
        &state.db_pool,
        query.groomer_id,
        date,
    )
    .await
    .map_err(GroomError::Database)?;

    let area_center = match groomer_area_id {
        Some(area_id) => groomroute_db::repositories::areas::get_area_by_id(
            &state.db_pool,
            account_id,
            area_id,
        )
        .await
        .map_err(GroomError::Database)?
        .and_then(|area| match (area.center_lat, area.center_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }),
        None => None,
    };

    // STEP 3: collect the day's geocoded stops as proximity anchors
    let (window_start, window_end) = clock::utc_day_window(tz, date)?;
    let scheduled_stops: Vec<GeoPoint> =
        groomroute_db::repositories::appointments::list_stops_for_groomer_window(
            &state.db_pool,
            account_id,
            query.groomer_id,
            window_start,
            window_end,
            None,
        )
        .await
        .map_err(GroomError::Database)?
        .into_iter()
        .filter_map(|stop| match (stop.customer_lat, stop.customer_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        })
        .collect();

    // STEP 4: join waitlist entries against customer history, resolving an
    // area for candidates that were never explicitly assigned one
    let areas: Vec<ServiceArea> = groomroute_db::repositories::areas::list_areas_for_account(
        &state.db_pool,
        account_id,
    )
    .await
    .map_err(GroomError::Database)?
    .into_iter()
    .map(ServiceArea::from)
    .collect();

    let candidates: Vec<WatchlistCandidate> =
        groomroute_db::repositories::waitlist::list_candidates_for_account(
            &state.db_pool,
            account_id,
        )
        .await
        .map_err(GroomError::Database)?
        .into_iter()
        .map(|row| {
            let matched_area_id = row.service_area_id.or_else(|| {
                let location = groomroute_core::geo::CustomerLocation {
                    zip_code: row.zip_code.clone(),
                    lat: row.lat,
                    lng: row.lng,
                };
                find_matching_area(&areas, &location).map(|(area, _)| area.id)
            });
            let location = match (row.lat, row.lng) {
                (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
                _ => None,
            };
            WatchlistCandidate {
                customer_id: row.customer_id,
                customer_name: row.customer_name,
                preferred_days: row.preferred_days,
                earliest_time: row.earliest_time,
                latest_time: row.latest_time,
                location,
                matched_area_id,
                lifetime_spend_cents: row.lifetime_spend_cents,
                cancellation_count: row.cancellation_count,
                no_show_count: row.no_show_count,
            }
        })
        .collect();

    // STEP 5: rank
    let ctx = WatchlistContext {
        target_date: date,
        groomer_area_id,
        scheduled_stops,
        area_center,
    };
    let suggestions = rank_watchlist(
        &candidates,
        &ctx,
        &filters,
        &RankerWeights::default(),
        limit,
    );

    Ok(Json(SuggestionsResponse {
        groomer_id: query.groomer_id,
        date: query.date,
        area_id: groomer_area_id,
        suggestions,
    }))
}

//! # Watchlist Suggestion Ranker
//!
//! Scores waitlisted customers against a target groomer-day to produce a
//! ranked fill-in list. Each candidate is scored along independent axes
//! (day/time preference, area alignment, proximity to the day's existing
//! stops, value tier, reliability tier) and the axes are combined with
//! configurable weights. Hard filters are applied before ranking and are
//! never soft-penalized: a candidate either survives the filter set or is
//! excluded outright.
//!
//! Ranking is deterministic for identical inputs: descending score with
//! ties broken by ascending customer id.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::areas::day_of_week_index;
use crate::geo::{haversine_miles, GeoPoint};
use crate::models::customer::{ReliabilityTier, ValueTier};

/// Distance at which proximity score reaches zero.
const PROXIMITY_FULL_PENALTY_MILES: f64 = 25.0;

/// Relative weight of each scoring axis. `Default` is the product's
/// standard blend; accounts can tune it without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerWeights {
    pub preferred_day: f64,
    pub preferred_time: f64,
    pub area_alignment: f64,
    pub proximity: f64,
    pub value: f64,
    pub reliability: f64,
}

impl Default for RankerWeights {
    fn default() -> Self {
        Self {
            preferred_day: 2.0,
            preferred_time: 1.0,
            area_alignment: 2.0,
            proximity: 1.5,
            value: 1.0,
            reliability: 1.5,
        }
    }
}

/// Hard excludes applied before any scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchlistFilters {
    pub min_reliability_tier: Option<ReliabilityTier>,
    /// When present, only these value tiers survive.
    pub value_tiers: Option<Vec<ValueTier>>,
    pub max_distance_miles: Option<f64>,
}

/// One waitlisted customer as the ranker sees them, already joined against
/// customer history by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistCandidate {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub preferred_days: Vec<i16>,
    pub earliest_time: Option<NaiveTime>,
    pub latest_time: Option<NaiveTime>,
    pub location: Option<GeoPoint>,
    pub matched_area_id: Option<Uuid>,
    pub lifetime_spend_cents: i64,
    pub cancellation_count: i32,
    pub no_show_count: i32,
}

/// The groomer-day being filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistContext {
    pub target_date: NaiveDate,
    /// Area the groomer covers on the target date, after override
    /// resolution. None when the day has no assignment.
    pub groomer_area_id: Option<Uuid>,
    /// Geocoded stops already scheduled that day.
    pub scheduled_stops: Vec<GeoPoint>,
    /// Fallback anchor when the day has no scheduled stops yet.
    pub area_center: Option<GeoPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistSuggestion {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub score: f64,
    pub value_tier: ValueTier,
    pub reliability_tier: ReliabilityTier,
    pub distance_miles: Option<f64>,
    pub preferred_day_match: bool,
    pub area_match: bool,
}

/// Distance from a candidate to the day's route: nearest scheduled stop,
/// else the area center, else unknown.
fn candidate_distance(candidate: &WatchlistCandidate, ctx: &WatchlistContext) -> Option<f64> {
    let point = candidate.location?;
    let nearest_stop = ctx
        .scheduled_stops
        .iter()
        .map(|stop| haversine_miles(point, *stop))
        .min_by(|a, b| a.total_cmp(b));
    nearest_stop.or_else(|| ctx.area_center.map(|c| haversine_miles(point, c)))
}

fn tier_score(value: ValueTier) -> f64 {
    match value {
        ValueTier::High => 1.0,
        ValueTier::Standard => 0.5,
        ValueTier::Low => 0.0,
    }
}

fn reliability_score(tier: ReliabilityTier) -> f64 {
    match tier {
        ReliabilityTier::Reliable => 1.0,
        ReliabilityTier::Fair => 0.5,
        ReliabilityTier::Unreliable => 0.0,
    }
}

/// Rank waitlisted customers for a target day.
///
/// Filters exclude; weights rank; `limit` truncates. The result is stable
/// for identical inputs.
pub fn rank_watchlist(
    candidates: &[WatchlistCandidate],
    ctx: &WatchlistContext,
    filters: &WatchlistFilters,
    weights: &RankerWeights,
    limit: usize,
) -> Vec<WatchlistSuggestion> {
    let target_day = day_of_week_index(ctx.target_date);

    let mut suggestions: Vec<WatchlistSuggestion> = candidates
        .iter()
        .filter_map(|candidate| {
            let value_tier = ValueTier::from_lifetime_spend_cents(candidate.lifetime_spend_cents);
            let reliability_tier = ReliabilityTier::from_counts(
                candidate.cancellation_count,
                candidate.no_show_count,
            );
            let distance = candidate_distance(candidate, ctx);

            // Hard filters: excluded, never down-weighted.
            if let Some(min_reliability) = filters.min_reliability_tier {
                if reliability_tier < min_reliability {
                    return None;
                }
            }
            if let Some(allowed) = &filters.value_tiers {
                if !allowed.contains(&value_tier) {
                    return None;
                }
            }
            if let Some(max_distance) = filters.max_distance_miles {
                // A candidate with no known location cannot satisfy a
                // distance cap.
                match distance {
                    Some(d) if d <= max_distance => {}
                    _ => return None,
                }
            }

            let preferred_day_match = candidate.preferred_days.contains(&target_day);
            let has_time_window =
                candidate.earliest_time.is_some() || candidate.latest_time.is_some();
            let area_match = match (candidate.matched_area_id, ctx.groomer_area_id) {
                (Some(candidate_area), Some(groomer_area)) => candidate_area == groomer_area,
                _ => false,
            };
            let proximity = distance
                .map(|d| (1.0 - d / PROXIMITY_FULL_PENALTY_MILES).max(0.0))
                .unwrap_or(0.0);

            let score = weights.preferred_day * f64::from(u8::from(preferred_day_match))
                + weights.preferred_time * f64::from(u8::from(has_time_window))
                + weights.area_alignment * f64::from(u8::from(area_match))
                + weights.proximity * proximity
                + weights.value * tier_score(value_tier)
                + weights.reliability * reliability_score(reliability_tier);

            Some(WatchlistSuggestion {
                customer_id: candidate.customer_id,
                customer_name: candidate.customer_name.clone(),
                score,
                value_tier,
                reliability_tier,
                distance_miles: distance,
                preferred_day_match,
                area_match,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    suggestions.truncate(limit);
    suggestions
}

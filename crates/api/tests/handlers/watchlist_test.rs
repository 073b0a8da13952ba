use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use groomroute_api::middleware::error_handling::AppError;
use groomroute_core::geo::GeoPoint;
use groomroute_core::models::customer::ReliabilityTier;
use groomroute_core::watchlist::{
    rank_watchlist, RankerWeights, WatchlistCandidate, WatchlistContext, WatchlistFilters,
    WatchlistSuggestion,
};
use groomroute_db::models::DbWaitlistCandidate;

use crate::test_utils::TestContext;

// 2025-06-04 is a Wednesday (day index 3).
fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()
}

fn row_fixture(name: &str, preferred_days: Vec<i16>, area_id: Option<Uuid>) -> DbWaitlistCandidate {
    DbWaitlistCandidate {
        entry_id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        customer_name: name.to_string(),
        preferred_days,
        earliest_time: None,
        latest_time: None,
        service_minutes: 60,
        lat: None,
        lng: None,
        zip_code: None,
        service_area_id: area_id,
        lifetime_spend_cents: 0,
        cancellation_count: 0,
        no_show_count: 0,
    }
}

/// Mirrors the suggestions handler's candidate mapping and ranking: join
/// rows from the repo into ranker candidates and rank against the target
/// day.
async fn suggestions_wrapper(
    ctx: &TestContext,
    account_id: Uuid,
    target_date: NaiveDate,
    groomer_area_id: Option<Uuid>,
    filters: WatchlistFilters,
    limit: usize,
) -> Result<Vec<WatchlistSuggestion>, AppError> {
    let candidates: Vec<WatchlistCandidate> = ctx
        .waitlist_repo
        .list_candidates_for_account(account_id)
        .await?
        .into_iter()
        .map(|row| WatchlistCandidate {
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            preferred_days: row.preferred_days,
            earliest_time: row.earliest_time,
            latest_time: row.latest_time,
            location: match (row.lat, row.lng) {
                (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
                _ => None,
            },
            matched_area_id: row.service_area_id,
            lifetime_spend_cents: row.lifetime_spend_cents,
            cancellation_count: row.cancellation_count,
            no_show_count: row.no_show_count,
        })
        .collect();

    let ctx_day = WatchlistContext {
        target_date,
        groomer_area_id,
        scheduled_stops: Vec::new(),
        area_center: None,
    };
    Ok(rank_watchlist(
        &candidates,
        &ctx_day,
        &filters,
        &RankerWeights::default(),
        limit,
    ))
}

#[tokio::test]
async fn test_suggestions_rank_day_and_area_matches_first() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let area_id = Uuid::new_v4();

    let ideal = row_fixture("Avery", vec![3], Some(area_id));
    let ideal_customer = ideal.customer_id;
    let rows = vec![
        row_fixture("Blair", vec![1], None),
        ideal,
        row_fixture("Cameron", Vec::new(), None),
    ];

    ctx.waitlist_repo
        .expect_list_candidates_for_account()
        .returning(move |_| Ok(rows.clone()));

    let ranked = suggestions_wrapper(
        &ctx,
        account_id,
        wednesday(),
        Some(area_id),
        WatchlistFilters::default(),
        10,
    )
    .await
    .unwrap();

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].customer_id, ideal_customer);
    assert!(ranked[0].preferred_day_match);
    assert!(ranked[0].area_match);
}

#[tokio::test]
async fn test_suggestions_respect_limit_and_reliability_floor() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();

    let mut flaky = row_fixture("Avery", vec![3], None);
    flaky.cancellation_count = 3;
    flaky.no_show_count = 2;
    let steady = row_fixture("Blair", vec![3], None);
    let steady_customer = steady.customer_id;
    let rows = vec![flaky, steady, row_fixture("Cameron", Vec::new(), None)];

    ctx.waitlist_repo
        .expect_list_candidates_for_account()
        .returning(move |_| Ok(rows.clone()));

    let filters = WatchlistFilters {
        min_reliability_tier: Some(ReliabilityTier::Fair),
        value_tiers: None,
        max_distance_miles: None,
    };
    let ranked = suggestions_wrapper(&ctx, account_id, wednesday(), None, filters, 1)
        .await
        .unwrap();

    // The unreliable candidate is excluded outright, never down-weighted,
    // and the limit applies after ranking.
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].customer_id, steady_customer);
}

#[tokio::test]
async fn test_suggestions_empty_waitlist_is_empty_response() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();

    ctx.waitlist_repo
        .expect_list_candidates_for_account()
        .returning(|_| Ok(Vec::new()));

    let ranked = suggestions_wrapper(
        &ctx,
        account_id,
        wednesday(),
        None,
        WatchlistFilters::default(),
        10,
    )
    .await
    .unwrap();

    assert!(ranked.is_empty());
}

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use groomroute_api::handlers::availability::{SlotView, SlotsResponse};
use groomroute_api::middleware::error_handling::AppError;
use groomroute_core::clock;
use groomroute_core::errors::GroomError;
use groomroute_core::scheduling::slots::{
    clamp_duration, generate_slots, large_dog_capacity, OccupiedSlot, MAX_SLOT_MINUTES,
    MIN_SLOT_MINUTES, PUBLIC_SLOT_BUFFER_MINUTES,
};
use groomroute_db::models::{DbAppointment, DbAppointmentStop, DbGroomer};

use crate::test_utils::TestContext;

fn denver() -> Tz {
    "America/Denver".parse().unwrap()
}

fn groomer_fixture(account_id: Uuid) -> DbGroomer {
    DbGroomer {
        id: Uuid::new_v4(),
        account_id,
        name: "Jordan".to_string(),
        work_start: clock::parse_time("09:00").unwrap(),
        work_end: clock::parse_time("17:00").unwrap(),
        large_dog_daily_limit: Some(2),
        default_assistant: false,
        phone: None,
        email: None,
        booking_slug: "jordan".to_string(),
        created_at: Utc::now(),
    }
}

fn appointment_fixture(
    account_id: Uuid,
    groomer_id: Uuid,
    start_at: DateTime<Utc>,
    service_minutes: i32,
) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        account_id,
        groomer_id,
        customer_id: Uuid::new_v4(),
        pet_id: None,
        start_at,
        service_minutes,
        status: "SCHEDULED".to_string(),
        notes: None,
        created_at: Utc::now(),
    }
}

fn stop_fixture(
    account_id: Uuid,
    groomer_id: Uuid,
    start_at: DateTime<Utc>,
    pet_weight_lbs: Option<f64>,
) -> DbAppointmentStop {
    DbAppointmentStop {
        id: Uuid::new_v4(),
        account_id,
        groomer_id,
        customer_id: Uuid::new_v4(),
        pet_id: pet_weight_lbs.map(|_| Uuid::new_v4()),
        start_at,
        service_minutes: 60,
        status: "SCHEDULED".to_string(),
        pet_weight_lbs,
        customer_lat: None,
        customer_lng: None,
    }
}

/// Mirrors the slot-grid handler: validate inputs, convert working hours
/// to instants, fetch the day's bookings through the repo, and run the
/// core grid generation with the public travel buffer.
async fn slots_wrapper(
    ctx: &TestContext,
    groomer: &DbGroomer,
    tz: Tz,
    date_str: &str,
    duration_minutes: Option<i64>,
) -> Result<SlotsResponse, AppError> {
    let date = clock::parse_date(date_str)?;
    if let Some(minutes) = duration_minutes {
        if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&minutes) {
            return Err(AppError(GroomError::Validation(
                "duration_minutes out of range".to_string(),
            )));
        }
    }
    let duration = clamp_duration(duration_minutes);

    let work_start = clock::local_instant(tz, date, groomer.work_start)?;
    let work_end = clock::local_instant(tz, date, groomer.work_end)?;
    let (window_start, window_end) = clock::utc_day_window(tz, date)?;

    let occupied: Vec<OccupiedSlot> = ctx
        .appointment_repo
        .list_active_for_groomer_window(groomer.account_id, groomer.id, window_start, window_end, None)
        .await?
        .into_iter()
        .map(|a| OccupiedSlot {
            appointment_id: a.id,
            start_at: a.start_at,
            service_minutes: a.service_minutes,
        })
        .collect();

    let grid = generate_slots(
        work_start,
        work_end,
        duration,
        &occupied,
        PUBLIC_SLOT_BUFFER_MINUTES,
    );

    Ok(SlotsResponse {
        groomer_id: groomer.id,
        date: date_str.to_string(),
        duration_minutes: grid.duration_minutes,
        slots: grid
            .slots
            .iter()
            .map(|slot| SlotView {
                start_time: clock::local_hhmm(tz, slot.start_at),
                end_time: clock::local_hhmm(tz, slot.end_at),
            })
            .collect(),
        total_candidates: grid.total_candidates,
        available_count: grid.available_count,
    })
}

#[tokio::test]
async fn test_slots_empty_day_offers_full_grid() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let groomer = groomer_fixture(account_id);

    ctx.appointment_repo
        .expect_list_active_for_groomer_window()
        .returning(|_, _, _, _, _| Ok(Vec::new()));

    let response = slots_wrapper(&ctx, &groomer, denver(), "2025-06-02", None)
        .await
        .unwrap();

    // 09:00 through 16:00 every half hour for 60-minute visits
    assert_eq!(response.slots.len(), 15);
    assert_eq!(response.slots.first().unwrap().start_time, "09:00");
    assert_eq!(response.slots.last().unwrap().start_time, "16:00");
    assert_eq!(response.slots.last().unwrap().end_time, "17:00");
    assert_eq!(response.available_count, 15);
}

#[tokio::test]
async fn test_slots_duration_out_of_range_rejected() {
    let ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let groomer = groomer_fixture(account_id);

    let result = slots_wrapper(&ctx, &groomer, denver(), "2025-06-02", Some(200)).await;

    let err = result.expect_err("expected validation error");
    assert!(matches!(err.0, GroomError::Validation(_)));
}

#[tokio::test]
async fn test_slots_invalid_date_rejected() {
    let ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let groomer = groomer_fixture(account_id);

    let result = slots_wrapper(&ctx, &groomer, denver(), "06/02/2025", None).await;

    let err = result.expect_err("expected validation error");
    assert!(matches!(err.0, GroomError::Validation(_)));
}

#[tokio::test]
async fn test_slots_travel_buffer_blocks_adjacent_start() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let groomer = groomer_fixture(account_id);
    let tz = denver();

    // A 10:00-11:00 local booking
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let booked_start = clock::local_instant(tz, date, clock::parse_time("10:00").unwrap()).unwrap();
    let booked = appointment_fixture(account_id, groomer.id, booked_start, 60);

    ctx.appointment_repo
        .expect_list_active_for_groomer_window()
        .returning(move |_, _, _, _, _| Ok(vec![booked.clone()]));

    let response = slots_wrapper(&ctx, &groomer, tz, "2025-06-02", None)
        .await
        .unwrap();

    let starts: Vec<&str> = response.slots.iter().map(|s| s.start_time.as_str()).collect();
    // The 15-minute travel buffer pushes the next offer past 11:00
    assert!(!starts.contains(&"10:00"));
    assert!(!starts.contains(&"11:00"));
    assert!(starts.contains(&"11:30"));
    // The buffer is one-directional: 09:00 is still offered
    assert!(starts.contains(&"09:00"));
}

#[tokio::test]
async fn test_large_dog_capacity_with_mocked_stops() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let groomer = groomer_fixture(account_id);
    let tz = denver();
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let (window_start, window_end) = clock::utc_day_window(tz, date).unwrap();

    let start = clock::local_instant(tz, date, clock::parse_time("09:00").unwrap()).unwrap();
    let stops = vec![
        stop_fixture(account_id, groomer.id, start, Some(60.0)),
        stop_fixture(account_id, groomer.id, start, Some(40.0)),
        stop_fixture(account_id, groomer.id, start, Some(70.0)),
    ];
    ctx.appointment_repo
        .expect_list_stops_for_groomer_window()
        .returning(move |_, _, _, _, _| Ok(stops.clone()));

    let fetched = ctx
        .appointment_repo
        .list_stops_for_groomer_window(account_id, groomer.id, window_start, window_end, None)
        .await
        .unwrap();
    let weights: Vec<Option<f64>> = fetched.iter().map(|s| s.pet_weight_lbs).collect();
    let capacity = large_dog_capacity(&weights, groomer.large_dog_daily_limit);

    assert_eq!(capacity.large_dog_count, 2);
    assert!(capacity.at_limit);
    assert!(!capacity.over_limit);
    assert_eq!(capacity.remaining_slots, Some(0));
}

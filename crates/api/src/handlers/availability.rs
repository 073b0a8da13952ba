//! # Availability Handlers
//!
//! Handlers for the slot/conflict engine: public availability grids for
//! booking pages, internal conflict checks for manually entered times, and
//! the large-dog daily cap. All interval math lives in
//! `groomroute_core::scheduling::slots`; these handlers translate between
//! the wire formats (`YYYY-MM-DD` dates, `HH:MM` times, minutes) and UTC
//! instants in the account's timezone.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use groomroute_core::{
    clock,
    errors::GroomError,
    scheduling::slots::{
        clamp_duration, classify_working_hours, generate_slots, intervals_overlap,
        large_dog_capacity, HoursCheck, LargeDogCapacity, OccupiedSlot, MAX_SLOT_MINUTES,
        MIN_SLOT_MINUTES, PUBLIC_SLOT_BUFFER_MINUTES,
    },
};
use uuid::Uuid;

use crate::{
    handlers::common::{account_tz, require_groomer},
    middleware::{error_handling::AppError, tenant::TenantId},
    ApiState,
};

/// Query parameters for the public slot grid endpoint
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Target day, `YYYY-MM-DD` in the account's timezone
    pub date: String,

    /// Requested appointment length in minutes (default 60, allowed 30-180)
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotView {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub groomer_id: Uuid,
    pub date: String,
    pub duration_minutes: i64,
    pub slots: Vec<SlotView>,
    pub total_candidates: usize,
    pub available_count: usize,
}

/// Validate a caller-supplied duration against the 30-180 minute clamp
/// range, then let the core default/clamp it.
fn checked_duration(requested: Option<i64>) -> Result<i64, AppError> {
    if let Some(minutes) = requested {
        if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&minutes) {
            return Err(AppError(GroomError::Validation(format!(
                "duration_minutes must be between {} and {}",
                MIN_SLOT_MINUTES, MAX_SLOT_MINUTES
            ))));
        }
    }
    Ok(clamp_duration(requested))
}

async fn occupied_slots_for_day(
    state: &ApiState,
    account_id: Uuid,
    groomer_id: Uuid,
    tz: chrono_tz::Tz,
    date: chrono::NaiveDate,
    exclude_id: Option<Uuid>,
) -> Result<Vec<OccupiedSlot>, AppError> {
    let (window_start, window_end) = clock::utc_day_window(tz, date)?;
    let appointments = groomroute_db::repositories::appointments::list_active_for_groomer_window(
        &state.db_pool,
        account_id,
        groomer_id,
        window_start,
        window_end,
        exclude_id,
    )
    .await
    .map_err(GroomError::Database)?;

    Ok(appointments
        .into_iter()
        .map(|a| OccupiedSlot {
            appointment_id: a.id,
            start_at: a.start_at,
            service_minutes: a.service_minutes,
        })
        .collect())
}

/// Enumerates open public booking slots for one groomer-day
///
/// # Endpoint
///
/// ```text
/// GET /api/groomers/:id/slots?date=2025-06-02&duration_minutes=60
/// ```
///
/// Candidates step every 30 minutes across the groomer's working hours; a
/// 15-minute travel buffer after each existing appointment keeps
/// back-to-back public bookings drivable.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(groomer_id): Path<Uuid>,
    TenantId(account_id): TenantId,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    // Validate inputs before touching storage
    let date = clock::parse_date(&query.date)?;
    let duration_minutes = checked_duration(query.duration_minutes)?;

    let groomer = require_groomer(&state.db_pool, account_id, groomer_id).await?;
    let tz = account_tz(&state.db_pool, account_id).await?;

    // Working hours as UTC instants for the requested date
    let work_start = clock::local_instant(tz, date, groomer.work_start)?;
    let work_end = clock::local_instant(tz, date, groomer.work_end)?;

    let occupied =
        occupied_slots_for_day(&state, account_id, groomer_id, tz, date, None).await?;

    let grid = generate_slots(
        work_start,
        work_end,
        duration_minutes,
        &occupied,
        PUBLIC_SLOT_BUFFER_MINUTES,
    );

    let response = SlotsResponse {
        groomer_id,
        date: query.date,
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
    };

    Ok(Json(response))
}

/// Query parameters for the internal conflict check endpoint
#[derive(Debug, Deserialize)]
pub struct ConflictQuery {
    /// Target day, `YYYY-MM-DD` in the account's timezone
    pub date: String,

    /// Candidate start time, `HH:MM` 24-hour local
    pub time: String,

    /// Appointment length in minutes (default 60, allowed 30-180)
    pub duration_minutes: Option<i64>,

    /// Appointment to leave out of the check, for edit flows
    pub exclude_appointment_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub conflict: bool,
    pub conflicting_appointment_ids: Vec<Uuid>,
    #[serde(flatten)]
    pub hours: HoursCheck,
}

/// Checks a manually entered time against existing bookings and working
/// hours
///
/// # Endpoint
///
/// ```text
/// GET /api/groomers/:id/conflicts?date=2025-06-02&time=10:30&duration_minutes=60
/// ```
///
/// Unlike the public slot grid, internal checks apply no travel buffer;
/// the office staff may deliberately book tighter than the public page
/// offers.
#[axum::debug_handler]
pub async fn check_conflict(
    State(state): State<Arc<ApiState>>,
    Path(groomer_id): Path<Uuid>,
    TenantId(account_id): TenantId,
    Query(query): Query<ConflictQuery>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    let date = clock::parse_date(&query.date)?;
    let time = clock::parse_time(&query.time)?;
    let duration_minutes = checked_duration(query.duration_minutes)?;

    let groomer = require_groomer(&state.db_pool, account_id, groomer_id).await?;
    let tz = account_tz(&state.db_pool, account_id).await?;

    let candidate_start = clock::local_instant(tz, date, time)?;
    let candidate_end = candidate_start + chrono::Duration::minutes(duration_minutes);

    let occupied = occupied_slots_for_day(
        &state,
        account_id,
        groomer_id,
        tz,
        date,
        query.exclude_appointment_id,
    )
    .await?;

    let conflicting_appointment_ids: Vec<Uuid> = occupied
        .iter()
        .filter(|slot| {
            intervals_overlap(candidate_start, candidate_end, slot.start_at, slot.end_at())
        })
        .map(|slot| slot.appointment_id)
        .collect();

    let hours = classify_working_hours(
        time,
        Some(duration_minutes),
        groomer.work_start,
        groomer.work_end,
    );

    let response = ConflictCheckResponse {
        conflict: !conflicting_appointment_ids.is_empty(),
        conflicting_appointment_ids,
        hours,
    };

    Ok(Json(response))
}

/// Query parameters for the large-dog capacity endpoint
#[derive(Debug, Deserialize)]
pub struct CapacityQuery {
    /// Target day, `YYYY-MM-DD` in the account's timezone
    pub date: String,

    /// Appointment to leave out of the count, for edit flows
    pub exclude_appointment_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CapacityResponse {
    pub groomer_id: Uuid,
    pub date: String,
    #[serde(flatten)]
    pub capacity: LargeDogCapacity,
}

/// Reports how many large dogs are booked against the groomer's daily cap
///
/// # Endpoint
///
/// ```text
/// GET /api/groomers/:id/large-dog-capacity?date=2025-06-02
/// ```
#[axum::debug_handler]
pub async fn get_large_dog_capacity(
    State(state): State<Arc<ApiState>>,
    Path(groomer_id): Path<Uuid>,
    TenantId(account_id): TenantId,
    Query(query): Query<CapacityQuery>,
) -> Result<Json<CapacityResponse>, AppError> {
    let date = clock::parse_date(&query.date)?;

    let groomer = require_groomer(&state.db_pool, account_id, groomer_id).await?;
    let tz = account_tz(&state.db_pool, account_id).await?;

    let (window_start, window_end) = clock::utc_day_window(tz, date)?;
    let stops = groomroute_db::repositories::appointments::list_stops_for_groomer_window(
        &state.db_pool,
        account_id,
        groomer_id,
        window_start,
        window_end,
        query.exclude_appointment_id,
    )
    .await
    .map_err(GroomError::Database)?;

    let pet_weights: Vec<Option<f64>> = stops.iter().map(|s| s.pet_weight_lbs).collect();
    let capacity = large_dog_capacity(&pet_weights, groomer.large_dog_daily_limit);

    Ok(Json(CapacityResponse {
        groomer_id,
        date: query.date,
        capacity,
    }))
}

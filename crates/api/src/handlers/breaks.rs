//! # Break Handlers
//!
//! Break tracking for a groomer-day plus the suggestion engine: stats on
//! breaks already taken and a recommendation of what to take next, driven
//! by worked time and cumulative pet weight since the last break.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use groomroute_core::{
    clock,
    errors::GroomError,
    models::breaks::{Break, BreakSummaryResponse, CreateBreakRequest, MarkBreakTakenRequest},
    scheduling::breaks::{break_outlook, BreakPolicy, WorkedStop},
};
use uuid::Uuid;

use crate::{
    handlers::common::{account_tz, require_groomer},
    middleware::{error_handling::AppError, tenant::TenantId},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct BreaksQuery {
    /// Target day, `YYYY-MM-DD` in the account's timezone
    pub date: String,
}

/// Reports break stats and the next suggested break for a groomer-day
///
/// # Endpoint
///
/// ```text
/// GET /api/groomers/:id/breaks?date=2025-06-02
/// ```
#[axum::debug_handler]
pub async fn get_breaks(
    State(state): State<Arc<ApiState>>,
    Path(groomer_id): Path<Uuid>,
    TenantId(account_id): TenantId,
    Query(query): Query<BreaksQuery>,
) -> Result<Json<BreakSummaryResponse>, AppError> {
    let date = clock::parse_date(&query.date)?;

    let _groomer = require_groomer(&state.db_pool, account_id, groomer_id).await?;
    let tz = account_tz(&state.db_pool, account_id).await?;

    let rows = groomroute_db::repositories::breaks::list_breaks_for_groomer_date(
        &state.db_pool,
        account_id,
        groomer_id,
        date,
    )
    .await
    .map_err(GroomError::Database)?;
    let breaks: Vec<Break> = rows
        .iter()
        .map(|row| row.to_core())
        .collect::<Result<_, _>>()?;

    let (window_start, window_end) = clock::utc_day_window(tz, date)?;
    let stops: Vec<WorkedStop> =
        groomroute_db::repositories::appointments::list_stops_for_groomer_window(
            &state.db_pool,
            account_id,
            groomer_id,
            window_start,
            window_end,
            None,
        )
        .await
        .map_err(GroomError::Database)?
        .into_iter()
        .map(|stop| WorkedStop {
            start_at: stop.start_at,
            service_minutes: stop.service_minutes,
            pet_weight_lbs: stop.pet_weight_lbs,
        })
        .collect();

    let (stats, suggestion) = break_outlook(&stops, &breaks, Utc::now(), &BreakPolicy::default());

    Ok(Json(BreakSummaryResponse {
        breaks_taken: stats.breaks_taken,
        total_break_minutes: stats.total_break_minutes,
        last_break_at: stats.last_break_at,
        suggestion,
    }))
}

/// Plans a break for a groomer-day
///
/// # Endpoint
///
/// ```text
/// POST /api/breaks
/// ```
#[axum::debug_handler]
pub async fn create_break(
    State(state): State<Arc<ApiState>>,
    TenantId(account_id): TenantId,
    Json(payload): Json<CreateBreakRequest>,
) -> Result<Json<Break>, AppError> {
    let date = clock::parse_date(&payload.date)?;

    if let (Some(start), Some(end)) = (payload.planned_start, payload.planned_end) {
        if end <= start {
            return Err(AppError(GroomError::Validation(
                "planned_end must be after planned_start".to_string(),
            )));
        }
    }

    let _groomer = require_groomer(&state.db_pool, account_id, payload.groomer_id).await?;

    let row = groomroute_db::repositories::breaks::create_break(
        &state.db_pool,
        account_id,
        payload.groomer_id,
        date,
        payload.break_type.as_str(),
        payload.planned_start,
        payload.planned_end,
    )
    .await
    .map_err(GroomError::Database)?;

    Ok(Json(row.to_core()?))
}

/// Records that a planned break was actually taken
///
/// # Endpoint
///
/// ```text
/// POST /api/breaks/:id/taken
/// ```
#[axum::debug_handler]
pub async fn mark_break_taken(
    State(state): State<Arc<ApiState>>,
    Path(break_id): Path<Uuid>,
    TenantId(account_id): TenantId,
    Json(payload): Json<MarkBreakTakenRequest>,
) -> Result<Json<Break>, AppError> {
    if payload.actual_minutes <= 0 {
        return Err(AppError(GroomError::Validation(
            "actual_minutes must be positive".to_string(),
        )));
    }

    let _existing = groomroute_db::repositories::breaks::get_break_by_id(
        &state.db_pool,
        account_id,
        break_id,
    )
    .await
    .map_err(GroomError::Database)?
    .ok_or_else(|| GroomError::NotFound(format!("Break with ID {} not found", break_id)))?;

    let row = groomroute_db::repositories::breaks::mark_break_taken(
        &state.db_pool,
        account_id,
        break_id,
        payload.actual_start,
        payload.actual_minutes,
    )
    .await
    .map_err(GroomError::Database)?;

    Ok(Json(row.to_core()?))
}

//! # Route Handlers
//!
//! Re-sequencing a groomer's daily stop list and tracking the workday
//! record. The reorder is a slot swap computed by
//! `groomroute_core::scheduling::reorder`; persistence is per-row, so the
//! response reports each appointment's outcome individually and the caller
//! retries the whole reorder with the same order if anything failed.

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use groomroute_core::{
    clock,
    errors::GroomError,
    models::route::{ReorderItemResult, ReorderRouteRequest, ReorderRouteResponse, RouteDay, UpsertRouteDayRequest},
    scheduling::reorder::plan_reorder,
};
use uuid::Uuid;

use crate::{
    handlers::common::{account_tz, require_groomer},
    middleware::{error_handling::AppError, tenant::TenantId},
    ApiState,
};

/// Re-sequences today's route for one groomer
///
/// # Endpoint
///
/// ```text
/// POST /api/routes/reorder
/// ```
///
/// The requested order must name exactly the appointments being moved; the
/// set of start times in use is preserved and only the appointment-to-slot
/// mapping changes. Validation happens before any write: every id must
/// resolve within the account, belong to the groomer, sit on the requested
/// date, and be in a reorderable status. Only today's route (in the
/// account's timezone) may be re-sequenced.
///
/// Persistence is per-row with no transaction. A mid-loop failure is
/// reported in the per-item results rather than rolled back; retrying the
/// same request is safe because the slot assignment is deterministic.
#[axum::debug_handler]
pub async fn reorder_route(
    State(state): State<Arc<ApiState>>,
    TenantId(account_id): TenantId,
    Json(payload): Json<ReorderRouteRequest>,
) -> Result<Json<ReorderRouteResponse>, AppError> {
    // STEP 1: validate the request shape
    let date = clock::parse_date(&payload.date)?;
    if payload.ordered_appointment_ids.is_empty() {
        return Err(AppError(GroomError::Validation(
            "ordered_appointment_ids must not be empty".to_string(),
        )));
    }

    let _groomer = require_groomer(&state.db_pool, account_id, payload.groomer_id).await?;
    let tz = account_tz(&state.db_pool, account_id).await?;

    // STEP 2: policy - only today's route may be re-sequenced
    let today = clock::local_date(tz, Utc::now());
    if date != today {
        return Err(AppError(GroomError::Policy(format!(
            "Routes can only be reordered for today ({})",
            today
        ))));
    }

    // STEP 3: fetch and screen every named appointment before any write
    let appointments = groomroute_db::repositories::appointments::get_appointments_by_ids(
        &state.db_pool,
        account_id,
        &payload.ordered_appointment_ids,
    )
    .await
    .map_err(GroomError::Database)?;

    if appointments.len() != payload.ordered_appointment_ids.len() {
        let found: Vec<Uuid> = appointments.iter().map(|a| a.id).collect();
        let missing: Vec<String> = payload
            .ordered_appointment_ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();
        return Err(AppError(GroomError::NotFound(format!(
            "Appointments not found: {}",
            missing.join(", ")
        ))));
    }

    for appointment in &appointments {
        if appointment.groomer_id != payload.groomer_id {
            return Err(AppError(GroomError::NotFound(format!(
                "Appointment {} does not belong to groomer {}",
                appointment.id, payload.groomer_id
            ))));
        }
        let status = appointment.status()?;
        if !status.is_reorderable() {
            return Err(AppError(GroomError::Policy(format!(
                "Appointment {} cannot be reordered (status {})",
                appointment.id,
                status.as_str()
            ))));
        }
        if clock::local_date(tz, appointment.start_at) != date {
            return Err(AppError(GroomError::Validation(format!(
                "Appointment {} is not scheduled on {}",
                appointment.id, date
            ))));
        }
    }

    // STEP 4: compute the slot-swap plan
    let current: Vec<(Uuid, chrono::DateTime<Utc>)> =
        appointments.iter().map(|a| (a.id, a.start_at)).collect();
    let plan = plan_reorder(&current, &payload.ordered_appointment_ids)?;

    // STEP 5: persist per-row, reporting each outcome
    let mut items = Vec::with_capacity(plan.len());
    let mut all_persisted = true;
    for assignment in plan {
        let persisted = if assignment.changed {
            match groomroute_db::repositories::appointments::update_start_at(
                &state.db_pool,
                account_id,
                assignment.appointment_id,
                assignment.new_start_at,
            )
            .await
            {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(
                        "Reorder persisted partially: appointment {} failed: {}",
                        assignment.appointment_id,
                        err
                    );
                    all_persisted = false;
                    false
                }
            }
        } else {
            true
        };

        items.push(ReorderItemResult {
            appointment_id: assignment.appointment_id,
            old_start_at: assignment.old_start_at,
            new_start_at: assignment.new_start_at,
            changed: assignment.changed,
            persisted,
        });
    }

    Ok(Json(ReorderRouteResponse {
        items,
        all_persisted,
    }))
}

/// Records that a workday started or that an assistant is riding along
///
/// # Endpoint
///
/// ```text
/// POST /api/routes/day
/// ```
///
/// The (groomer, date) row is created lazily the first time either fact is
/// recorded; omitted flags keep their previously recorded value.
#[axum::debug_handler]
pub async fn upsert_route_day(
    State(state): State<Arc<ApiState>>,
    TenantId(account_id): TenantId,
    Json(payload): Json<UpsertRouteDayRequest>,
) -> Result<Json<RouteDay>, AppError> {
    let date = clock::parse_date(&payload.date)?;

    let _groomer = require_groomer(&state.db_pool, account_id, payload.groomer_id).await?;

    let row = groomroute_db::repositories::routes::upsert_route_day(
        &state.db_pool,
        payload.groomer_id,
        date,
        payload.day_started,
        payload.has_assistant,
    )
    .await
    .map_err(GroomError::Database)?;

    Ok(Json(RouteDay {
        groomer_id: row.groomer_id,
        route_date: row.route_date,
        day_started: row.day_started,
        has_assistant: row.has_assistant,
    }))
}

//! # Customer Handlers
//!
//! Service-area matching and assignment for customers, and the skip flow
//! that pushes an appointment to the next day the groomer is back in the
//! customer's area. Area/skip actions append rows to the customer's
//! structured event log.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use groomroute_core::{
    areas::{find_matching_area, find_next_area_day_date, DEFAULT_AREA_DAY_HORIZON},
    clock,
    errors::GroomError,
    models::{
        appointment::{SkipAppointmentRequest, SkipAppointmentResponse},
        area::{MatchingAreaResponse, ServiceArea},
        customer::{AssignAreaRequest, AssignAreaResponse, CustomerAction},
    },
};
use uuid::Uuid;

use crate::{
    handlers::common::{account_tz, require_customer},
    middleware::{error_handling::AppError, tenant::TenantId},
    ApiState,
};

/// Actor recorded on events this API writes on its own behalf.
const API_ACTOR: &str = "api";

async fn core_areas_for_account(
    state: &ApiState,
    account_id: Uuid,
) -> Result<Vec<ServiceArea>, AppError> {
    let areas = groomroute_db::repositories::areas::list_areas_for_account(
        &state.db_pool,
        account_id,
    )
    .await
    .map_err(GroomError::Database)?;
    Ok(areas.into_iter().map(ServiceArea::from).collect())
}

/// Resolves which service area a customer belongs to
///
/// # Endpoint
///
/// ```text
/// GET /api/customers/:id/matching-area
/// ```
///
/// Zip-exact match wins over radius containment; areas are tested in name
/// order so repeated calls resolve ties the same way. A customer with no
/// zip and no geocoded point matches nothing.
#[axum::debug_handler]
pub async fn get_matching_area(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
    TenantId(account_id): TenantId,
) -> Result<Json<MatchingAreaResponse>, AppError> {
    let customer = require_customer(&state.db_pool, account_id, customer_id).await?;
    let areas = core_areas_for_account(&state, account_id).await?;

    let matched = find_matching_area(&areas, &customer.location());

    let response = match matched {
        Some((area, kind)) => MatchingAreaResponse {
            area_id: Some(area.id),
            area_name: Some(area.name.clone()),
            matched_by: Some(kind),
        },
        None => MatchingAreaResponse {
            area_id: None,
            area_name: None,
            matched_by: None,
        },
    };

    Ok(Json(response))
}

/// Assigns a customer to a service area
///
/// # Endpoint
///
/// ```text
/// POST /api/customers/:id/area
/// ```
#[axum::debug_handler]
pub async fn assign_area(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
    TenantId(account_id): TenantId,
    Json(payload): Json<AssignAreaRequest>,
) -> Result<Json<AssignAreaResponse>, AppError> {
    let _customer = require_customer(&state.db_pool, account_id, customer_id).await?;

    let area = groomroute_db::repositories::areas::get_area_by_id(
        &state.db_pool,
        account_id,
        payload.area_id,
    )
    .await
    .map_err(GroomError::Database)?
    .ok_or_else(|| {
        GroomError::NotFound(format!("Service area with ID {} not found", payload.area_id))
    })?;

    groomroute_db::repositories::customers::update_service_area(
        &state.db_pool,
        account_id,
        customer_id,
        area.id,
    )
    .await
    .map_err(GroomError::Database)?;

    groomroute_db::repositories::events::append_customer_event(
        &state.db_pool,
        account_id,
        customer_id,
        API_ACTOR,
        CustomerAction::AreaAssigned.as_str(),
        Some(&format!("Assigned to area {}", area.name)),
    )
    .await
    .map_err(GroomError::Database)?;

    Ok(Json(AssignAreaResponse {
        customer_id,
        area_id: area.id,
    }))
}

/// Skips an appointment to the next day the groomer covers the customer's
/// area
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/:id/skip
/// ```
///
/// The appointment keeps its local wall-clock time and moves forward to
/// the first area day after its current date, scanning up to 30 days out.
/// The skip is recorded in the customer's event log.
#[axum::debug_handler]
pub async fn skip_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
    TenantId(account_id): TenantId,
    Json(payload): Json<SkipAppointmentRequest>,
) -> Result<Json<SkipAppointmentResponse>, AppError> {
    let appointment = groomroute_db::repositories::appointments::get_appointment_by_id(
        &state.db_pool,
        account_id,
        appointment_id,
    )
    .await
    .map_err(GroomError::Database)?
    .ok_or_else(|| {
        GroomError::NotFound(format!("Appointment with ID {} not found", appointment_id))
    })?;

    let status = appointment.status()?;
    if !status.is_reorderable() {
        return Err(AppError(GroomError::Policy(format!(
            "Appointment {} cannot be skipped (status {})",
            appointment_id,
            status.as_str()
        ))));
    }

    let customer = require_customer(&state.db_pool, account_id, appointment.customer_id).await?;
    let area_id = customer.service_area_id.ok_or_else(|| {
        GroomError::Policy(format!(
            "Customer {} has no service area; assign one before skipping",
            customer.id
        ))
    })?;

    let tz = account_tz(&state.db_pool, account_id).await?;
    let old_start_at = appointment.start_at;
    let local_start = old_start_at.with_timezone(&tz);
    let current_date = local_start.date_naive();

    // Scan forward from the day after the current visit
    let assigned_days = groomroute_db::repositories::areas::list_assigned_days_for_area(
        &state.db_pool,
        appointment.groomer_id,
        area_id,
    )
    .await
    .map_err(GroomError::Database)?;

    let scan_start = current_date
        .succ_opt()
        .ok_or_else(|| GroomError::Validation(format!("Date out of range: {}", current_date)))?;
    let next_date = find_next_area_day_date(&assigned_days, scan_start, DEFAULT_AREA_DAY_HORIZON)
        .ok_or_else(|| {
            GroomError::Policy(format!(
                "No upcoming day in the customer's area within {} days",
                DEFAULT_AREA_DAY_HORIZON
            ))
        })?;

    let new_start_at = clock::local_instant(tz, next_date, local_start.time())?;

    groomroute_db::repositories::appointments::update_start_at(
        &state.db_pool,
        account_id,
        appointment_id,
        new_start_at,
    )
    .await
    .map_err(GroomError::Database)?;

    groomroute_db::repositories::events::append_customer_event(
        &state.db_pool,
        account_id,
        customer.id,
        API_ACTOR,
        CustomerAction::Skipped.as_str(),
        payload.reason.as_deref(),
    )
    .await
    .map_err(GroomError::Database)?;

    Ok(Json(SkipAppointmentResponse {
        appointment_id,
        old_start_at,
        new_start_at,
        rescheduled_date: next_date.format(clock::DATE_FORMAT).to_string(),
    }))
}

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use groomroute_api::middleware::error_handling::AppError;
use groomroute_core::clock;
use groomroute_core::errors::GroomError;
use groomroute_core::models::route::{ReorderItemResult, ReorderRouteRequest, ReorderRouteResponse};
use groomroute_core::scheduling::reorder::plan_reorder;
use groomroute_db::models::DbAppointment;

use crate::test_utils::TestContext;

fn denver() -> Tz {
    "America/Denver".parse().unwrap()
}

fn appointment_fixture(
    account_id: Uuid,
    groomer_id: Uuid,
    start_at: DateTime<Utc>,
    status: &str,
) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        account_id,
        groomer_id,
        customer_id: Uuid::new_v4(),
        pet_id: None,
        start_at,
        service_minutes: 60,
        status: status.to_string(),
        notes: None,
        created_at: Utc::now(),
    }
}

fn local_start(tz: Tz, date: NaiveDate, hhmm: &str) -> DateTime<Utc> {
    clock::local_instant(tz, date, clock::parse_time(hhmm).unwrap()).unwrap()
}

/// Mirrors the reorder handler: screen every named appointment before any
/// write, compute the slot-swap plan, persist per-row through the repo,
/// and report each outcome.
async fn reorder_wrapper(
    ctx: &TestContext,
    tz: Tz,
    today: NaiveDate,
    payload: ReorderRouteRequest,
) -> Result<ReorderRouteResponse, AppError> {
    let date = clock::parse_date(&payload.date)?;
    if payload.ordered_appointment_ids.is_empty() {
        return Err(AppError(GroomError::Validation(
            "ordered_appointment_ids must not be empty".to_string(),
        )));
    }
    if date != today {
        return Err(AppError(GroomError::Policy(
            "Routes can only be reordered for today".to_string(),
        )));
    }

    let account_id = Uuid::new_v4();
    let appointments = ctx
        .appointment_repo
        .get_appointments_by_ids(account_id, payload.ordered_appointment_ids.clone())
        .await?;

    if appointments.len() != payload.ordered_appointment_ids.len() {
        return Err(AppError(GroomError::NotFound(
            "Appointments not found".to_string(),
        )));
    }
    for appointment in &appointments {
        if appointment.groomer_id != payload.groomer_id {
            return Err(AppError(GroomError::NotFound(
                "Appointment does not belong to groomer".to_string(),
            )));
        }
        let status = appointment.status()?;
        if !status.is_reorderable() {
            return Err(AppError(GroomError::Policy(format!(
                "Appointment {} cannot be reordered",
                appointment.id
            ))));
        }
        if clock::local_date(tz, appointment.start_at) != date {
            return Err(AppError(GroomError::Validation(format!(
                "Appointment {} is not scheduled on {}",
                appointment.id, date
            ))));
        }
    }

    let current: Vec<(Uuid, DateTime<Utc>)> =
        appointments.iter().map(|a| (a.id, a.start_at)).collect();
    let plan = plan_reorder(&current, &payload.ordered_appointment_ids)?;

    let mut items = Vec::with_capacity(plan.len());
    let mut all_persisted = true;
    for assignment in plan {
        let persisted = if assignment.changed {
            match ctx
                .appointment_repo
                .update_start_at(account_id, assignment.appointment_id, assignment.new_start_at)
                .await
            {
                Ok(()) => true,
                Err(_) => {
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

    Ok(ReorderRouteResponse { items, all_persisted })
}

#[tokio::test]
async fn test_reorder_preserves_slot_set() {
    let mut ctx = TestContext::new();
    let tz = denver();
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let account_id = Uuid::new_v4();
    let groomer_id = Uuid::new_v4();

    // A@9:00, B@10:00, C@11:00
    let a = appointment_fixture(account_id, groomer_id, local_start(tz, today, "09:00"), "SCHEDULED");
    let b = appointment_fixture(account_id, groomer_id, local_start(tz, today, "10:00"), "SCHEDULED");
    let c = appointment_fixture(account_id, groomer_id, local_start(tz, today, "11:00"), "CONFIRMED");
    let fixtures = vec![a.clone(), b.clone(), c.clone()];

    ctx.appointment_repo
        .expect_get_appointments_by_ids()
        .returning(move |_, _| Ok(fixtures.clone()));
    ctx.appointment_repo
        .expect_update_start_at()
        .returning(|_, _, _| Ok(()));

    // Reordered to [C, A, B]
    let payload = ReorderRouteRequest {
        groomer_id,
        date: "2025-06-02".to_string(),
        ordered_appointment_ids: vec![c.id, a.id, b.id],
    };
    let response = reorder_wrapper(&ctx, tz, today, payload).await.unwrap();

    assert!(response.all_persisted);
    assert_eq!(response.items.len(), 3);

    // C@9:00, A@10:00, B@11:00
    let by_id = |id: Uuid| response.items.iter().find(|i| i.appointment_id == id).unwrap();
    assert_eq!(by_id(c.id).new_start_at, a.start_at);
    assert_eq!(by_id(a.id).new_start_at, b.start_at);
    assert_eq!(by_id(b.id).new_start_at, c.start_at);
    assert!(by_id(c.id).changed);

    // The multiset of start times is unchanged
    let mut before: Vec<DateTime<Utc>> = vec![a.start_at, b.start_at, c.start_at];
    let mut after: Vec<DateTime<Utc>> = response.items.iter().map(|i| i.new_start_at).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_reorder_rejects_non_today_date() {
    let ctx = TestContext::new();
    let tz = denver();
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

    let payload = ReorderRouteRequest {
        groomer_id: Uuid::new_v4(),
        date: "2025-06-03".to_string(),
        ordered_appointment_ids: vec![Uuid::new_v4()],
    };
    let result = reorder_wrapper(&ctx, tz, today, payload).await;

    let err = result.expect_err("expected policy error");
    assert!(matches!(err.0, GroomError::Policy(_)));
}

#[tokio::test]
async fn test_reorder_rejects_completed_appointment() {
    let mut ctx = TestContext::new();
    let tz = denver();
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let account_id = Uuid::new_v4();
    let groomer_id = Uuid::new_v4();

    let a = appointment_fixture(account_id, groomer_id, local_start(tz, today, "09:00"), "SCHEDULED");
    let b = appointment_fixture(account_id, groomer_id, local_start(tz, today, "10:00"), "COMPLETED");
    let fixtures = vec![a.clone(), b.clone()];

    ctx.appointment_repo
        .expect_get_appointments_by_ids()
        .returning(move |_, _| Ok(fixtures.clone()));
    // No update expectation: the whole operation must fail before any write

    let payload = ReorderRouteRequest {
        groomer_id,
        date: "2025-06-02".to_string(),
        ordered_appointment_ids: vec![b.id, a.id],
    };
    let result = reorder_wrapper(&ctx, tz, today, payload).await;

    let err = result.expect_err("expected policy error");
    assert!(matches!(err.0, GroomError::Policy(_)));
}

#[tokio::test]
async fn test_reorder_rejects_unknown_id() {
    let mut ctx = TestContext::new();
    let tz = denver();
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let account_id = Uuid::new_v4();
    let groomer_id = Uuid::new_v4();

    let a = appointment_fixture(account_id, groomer_id, local_start(tz, today, "09:00"), "SCHEDULED");
    let only_a = vec![a.clone()];

    ctx.appointment_repo
        .expect_get_appointments_by_ids()
        .returning(move |_, _| Ok(only_a.clone()));

    let payload = ReorderRouteRequest {
        groomer_id,
        date: "2025-06-02".to_string(),
        ordered_appointment_ids: vec![a.id, Uuid::new_v4()],
    };
    let result = reorder_wrapper(&ctx, tz, today, payload).await;

    let err = result.expect_err("expected not-found error");
    assert!(matches!(err.0, GroomError::NotFound(_)));
}

#[tokio::test]
async fn test_reorder_reports_partial_persistence() {
    let mut ctx = TestContext::new();
    let tz = denver();
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let account_id = Uuid::new_v4();
    let groomer_id = Uuid::new_v4();

    let a = appointment_fixture(account_id, groomer_id, local_start(tz, today, "09:00"), "SCHEDULED");
    let b = appointment_fixture(account_id, groomer_id, local_start(tz, today, "10:00"), "SCHEDULED");
    let fixtures = vec![a.clone(), b.clone()];
    let failing_id = a.id;

    ctx.appointment_repo
        .expect_get_appointments_by_ids()
        .returning(move |_, _| Ok(fixtures.clone()));
    ctx.appointment_repo
        .expect_update_start_at()
        .returning(move |_, id, _| {
            if id == failing_id {
                Err(eyre::eyre!("connection reset"))
            } else {
                Ok(())
            }
        });

    let payload = ReorderRouteRequest {
        groomer_id,
        date: "2025-06-02".to_string(),
        ordered_appointment_ids: vec![b.id, a.id],
    };
    let response = reorder_wrapper(&ctx, tz, today, payload).await.unwrap();

    assert!(!response.all_persisted);
    let failed = response
        .items
        .iter()
        .find(|i| i.appointment_id == failing_id)
        .unwrap();
    assert!(!failed.persisted);
    let succeeded = response
        .items
        .iter()
        .find(|i| i.appointment_id == b.id)
        .unwrap();
    assert!(succeeded.persisted);
}

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use groomroute_api::middleware::error_handling::AppError;
use groomroute_core::areas::{find_matching_area, find_next_area_day_date, DEFAULT_AREA_DAY_HORIZON};
use groomroute_core::clock;
use groomroute_core::errors::GroomError;
use groomroute_core::models::area::{AreaMatchKind, MatchingAreaResponse, ServiceArea};
use groomroute_core::models::customer::CustomerAction;
use groomroute_db::models::{DbAppointment, DbCustomer, DbCustomerEvent, DbServiceArea};

use crate::test_utils::TestContext;

fn denver() -> Tz {
    "America/Denver".parse().unwrap()
}

fn customer_fixture(account_id: Uuid, zip: Option<&str>, area_id: Option<Uuid>) -> DbCustomer {
    DbCustomer {
        id: Uuid::new_v4(),
        account_id,
        name: "Casey".to_string(),
        lat: None,
        lng: None,
        zip_code: zip.map(|z| z.to_string()),
        cancellation_count: 0,
        no_show_count: 0,
        lifetime_spend_cents: 0,
        service_area_id: area_id,
        notes: None,
        created_at: Utc::now(),
    }
}

fn db_area_fixture(account_id: Uuid, name: &str, zips: &[&str]) -> DbServiceArea {
    DbServiceArea {
        id: Uuid::new_v4(),
        account_id,
        name: name.to_string(),
        color: "#2f9e44".to_string(),
        zip_codes: zips.iter().map(|z| z.to_string()).collect(),
        center_lat: None,
        center_lng: None,
        radius_miles: None,
        created_at: Utc::now(),
    }
}

fn event_fixture(account_id: Uuid, customer_id: Uuid, action: &str) -> DbCustomerEvent {
    DbCustomerEvent {
        id: Uuid::new_v4(),
        account_id,
        customer_id,
        actor: "api".to_string(),
        action: action.to_string(),
        reason: None,
        created_at: Utc::now(),
    }
}

/// Mirrors the matching-area handler: fetch the customer and the account's
/// areas (name order) through the repos, then run the structural matcher.
async fn matching_area_wrapper(
    ctx: &TestContext,
    account_id: Uuid,
    customer_id: Uuid,
) -> Result<MatchingAreaResponse, AppError> {
    let customer = ctx
        .customer_repo
        .get_customer_by_id(account_id, customer_id)
        .await?
        .ok_or_else(|| GroomError::NotFound(format!("Customer with ID {} not found", customer_id)))?;

    let areas: Vec<ServiceArea> = ctx
        .area_repo
        .list_areas_for_account(account_id)
        .await?
        .into_iter()
        .map(ServiceArea::from)
        .collect();

    let matched = find_matching_area(&areas, &customer.location());

    Ok(match matched {
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
    })
}

#[tokio::test]
async fn test_matching_area_by_zip() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let customer = customer_fixture(account_id, Some("80301"), None);
    let customer_id = customer.id;

    let north = db_area_fixture(account_id, "North", &["80301", "80302"]);
    let south = db_area_fixture(account_id, "South", &["80905"]);
    let north_id = north.id;
    let areas = vec![north, south];

    ctx.customer_repo
        .expect_get_customer_by_id()
        .returning(move |_, _| Ok(Some(customer.clone())));
    ctx.area_repo
        .expect_list_areas_for_account()
        .returning(move |_| Ok(areas.clone()));

    let response = matching_area_wrapper(&ctx, account_id, customer_id).await.unwrap();

    assert_eq!(response.area_id, Some(north_id));
    assert_eq!(response.area_name.as_deref(), Some("North"));
    assert_eq!(response.matched_by, Some(AreaMatchKind::ZipCode));
}

#[tokio::test]
async fn test_matching_area_none_for_unplaceable_customer() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let customer = customer_fixture(account_id, None, None);
    let customer_id = customer.id;

    let areas = vec![db_area_fixture(account_id, "North", &["80301"])];

    ctx.customer_repo
        .expect_get_customer_by_id()
        .returning(move |_, _| Ok(Some(customer.clone())));
    ctx.area_repo
        .expect_list_areas_for_account()
        .returning(move |_| Ok(areas.clone()));

    let response = matching_area_wrapper(&ctx, account_id, customer_id).await.unwrap();

    assert_eq!(response.area_id, None);
    assert_eq!(response.matched_by, None);
}

#[tokio::test]
async fn test_matching_area_unknown_customer_not_found() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();

    ctx.customer_repo
        .expect_get_customer_by_id()
        .returning(|_, _| Ok(None));

    let result = matching_area_wrapper(&ctx, account_id, Uuid::new_v4()).await;

    let err = result.expect_err("expected not-found error");
    assert!(matches!(err.0, GroomError::NotFound(_)));
}

/// Mirrors the skip handler's scheduling decision: push the visit to the
/// first upcoming weekday the groomer covers the customer's area, keeping
/// the local wall-clock time, and record the skip in the event log.
async fn skip_wrapper(
    ctx: &TestContext,
    account_id: Uuid,
    tz: Tz,
    appointment: &DbAppointment,
) -> Result<(DateTime<Utc>, NaiveDate), AppError> {
    let status = appointment.status()?;
    if !status.is_reorderable() {
        return Err(AppError(GroomError::Policy("cannot skip".to_string())));
    }

    let customer = ctx
        .customer_repo
        .get_customer_by_id(account_id, appointment.customer_id)
        .await?
        .ok_or_else(|| GroomError::NotFound("customer".to_string()))?;
    let area_id = customer
        .service_area_id
        .ok_or_else(|| GroomError::Policy("Customer has no service area".to_string()))?;

    let assigned_days = ctx
        .area_repo
        .list_assigned_days_for_area(appointment.groomer_id, area_id)
        .await?;

    let local_start = appointment.start_at.with_timezone(&tz);
    let scan_start = local_start.date_naive().succ_opt().unwrap();
    let next_date = find_next_area_day_date(&assigned_days, scan_start, DEFAULT_AREA_DAY_HORIZON)
        .ok_or_else(|| GroomError::Policy("No upcoming area day".to_string()))?;

    let new_start_at = clock::local_instant(tz, next_date, local_start.time())?;
    ctx.appointment_repo
        .update_start_at(account_id, appointment.id, new_start_at)
        .await?;
    ctx.event_repo
        .append_customer_event(
            account_id,
            customer.id,
            "api".to_string(),
            CustomerAction::Skipped.as_str().to_string(),
            None,
        )
        .await?;

    Ok((new_start_at, next_date))
}

#[tokio::test]
async fn test_skip_moves_to_next_area_day_same_local_time() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let tz = denver();
    let area_id = Uuid::new_v4();
    let groomer_id = Uuid::new_v4();

    let customer = customer_fixture(account_id, Some("80301"), Some(area_id));
    let customer_id = customer.id;

    // Monday 2025-06-02 at 10:00 local; the groomer covers this area on
    // Wednesdays (3) and Fridays (5).
    let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let start = clock::local_instant(tz, monday, clock::parse_time("10:00").unwrap()).unwrap();
    let appointment = DbAppointment {
        id: Uuid::new_v4(),
        account_id,
        groomer_id,
        customer_id,
        pet_id: None,
        start_at: start,
        service_minutes: 60,
        status: "SCHEDULED".to_string(),
        notes: None,
        created_at: Utc::now(),
    };

    ctx.customer_repo
        .expect_get_customer_by_id()
        .returning(move |_, _| Ok(Some(customer.clone())));
    ctx.area_repo
        .expect_list_assigned_days_for_area()
        .returning(|_, _| Ok(vec![3, 5]));
    ctx.appointment_repo
        .expect_update_start_at()
        .returning(|_, _, _| Ok(()));
    ctx.event_repo
        .expect_append_customer_event()
        .returning(move |acc, cust, _, action, _| Ok(event_fixture(acc, cust, &action)));

    let (new_start_at, next_date) = skip_wrapper(&ctx, account_id, tz, &appointment)
        .await
        .unwrap();

    // Wednesday 2025-06-04, still 10:00 local
    assert_eq!(next_date, NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
    let expected =
        clock::local_instant(tz, next_date, clock::parse_time("10:00").unwrap()).unwrap();
    assert_eq!(new_start_at, expected);
}

#[tokio::test]
async fn test_skip_requires_service_area() {
    let mut ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let tz = denver();

    let customer = customer_fixture(account_id, Some("80301"), None);
    let customer_id = customer.id;

    let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let start = clock::local_instant(tz, monday, clock::parse_time("10:00").unwrap()).unwrap();
    let appointment = DbAppointment {
        id: Uuid::new_v4(),
        account_id,
        groomer_id: Uuid::new_v4(),
        customer_id,
        pet_id: None,
        start_at: start,
        service_minutes: 60,
        status: "SCHEDULED".to_string(),
        notes: None,
        created_at: Utc::now(),
    };

    ctx.customer_repo
        .expect_get_customer_by_id()
        .returning(move |_, _| Ok(Some(customer.clone())));

    let result = skip_wrapper(&ctx, account_id, tz, &appointment).await;

    let err = result.expect_err("expected policy error");
    assert!(matches!(err.0, GroomError::Policy(_)));
}

#[tokio::test]
async fn test_skip_rejects_cancelled_appointment() {
    let ctx = TestContext::new();
    let account_id = Uuid::new_v4();
    let tz = denver();

    let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let start = clock::local_instant(tz, monday, clock::parse_time("10:00").unwrap()).unwrap();
    let appointment = DbAppointment {
        id: Uuid::new_v4(),
        account_id,
        groomer_id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        pet_id: None,
        start_at: start,
        service_minutes: 60,
        status: "CANCELLED".to_string(),
        notes: None,
        created_at: Utc::now(),
    };

    let result = skip_wrapper(&ctx, account_id, tz, &appointment).await;

    let err = result.expect_err("expected policy error");
    assert!(matches!(err.0, GroomError::Policy(_)));
}

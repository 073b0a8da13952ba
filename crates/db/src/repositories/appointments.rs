use crate::models::{DbAppointment, DbAppointmentStop};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Non-cancelled appointments for one groomer inside a UTC window. The
/// caller computes the window from the account's timezone; cancelled and
/// no-show rows never participate in conflict or slot math.
pub async fn list_active_for_groomer_window(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    groomer_id: Uuid,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    exclude_id: Option<Uuid>,
) -> Result<Vec<DbAppointment>> {
    tracing::debug!(
        "Listing active appointments: groomer={}, window={}..{}",
        groomer_id,
        window_start,
        window_end
    );

    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, account_id, groomer_id, customer_id, pet_id, start_at,
               service_minutes, status, notes, created_at
        FROM appointments
        WHERE account_id = $1
          AND groomer_id = $2
          AND start_at >= $3
          AND start_at < $4
          AND status NOT IN ('CANCELLED', 'NO_SHOW')
          AND ($5::uuid IS NULL OR id <> $5)
        ORDER BY start_at ASC
        "#,
    )
    .bind(account_id)
    .bind(groomer_id)
    .bind(window_start)
    .bind(window_end)
    .bind(exclude_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Same window as [`list_active_for_groomer_window`] but joined with pet
/// weight and customer location, for the break engine, large-dog cap, and
/// watchlist proximity.
pub async fn list_stops_for_groomer_window(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    groomer_id: Uuid,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    exclude_id: Option<Uuid>,
) -> Result<Vec<DbAppointmentStop>> {
    let stops = sqlx::query_as::<_, DbAppointmentStop>(
        r#"
        SELECT a.id, a.account_id, a.groomer_id, a.customer_id, a.pet_id,
               a.start_at, a.service_minutes, a.status,
               p.weight_lbs AS pet_weight_lbs,
               c.lat AS customer_lat,
               c.lng AS customer_lng
        FROM appointments a
        LEFT JOIN pets p ON p.id = a.pet_id
        JOIN customers c ON c.id = a.customer_id
        WHERE a.account_id = $1
          AND a.groomer_id = $2
          AND a.start_at >= $3
          AND a.start_at < $4
          AND a.status NOT IN ('CANCELLED', 'NO_SHOW')
          AND ($5::uuid IS NULL OR a.id <> $5)
        ORDER BY a.start_at ASC
        "#,
    )
    .bind(account_id)
    .bind(groomer_id)
    .bind(window_start)
    .bind(window_end)
    .bind(exclude_id)
    .fetch_all(pool)
    .await?;

    Ok(stops)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, account_id, groomer_id, customer_id, pet_id, start_at,
               service_minutes, status, notes, created_at
        FROM appointments
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Fetch a set of appointments by id, account-scoped. Rows the account does
/// not own are simply absent from the result; the caller decides whether
/// that is an error.
pub async fn get_appointments_by_ids(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    ids: &[Uuid],
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, account_id, groomer_id, customer_id, pet_id, start_at,
               service_minutes, status, notes, created_at
        FROM appointments
        WHERE account_id = $1 AND id = ANY($2)
        "#,
    )
    .bind(account_id)
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn update_start_at(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
    start_at: DateTime<Utc>,
) -> Result<()> {
    tracing::debug!("Updating appointment start: id={}, start_at={}", id, start_at);

    let result = sqlx::query(
        r#"
        UPDATE appointments
        SET start_at = $3
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(id)
    .bind(start_at)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre::eyre!("Appointment not found: {}", id));
    }

    Ok(())
}

pub async fn update_status(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
    status: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE appointments
        SET status = $3
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(id)
    .bind(status)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre::eyre!("Appointment not found: {}", id));
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    groomer_id: Uuid,
    customer_id: Uuid,
    pet_id: Option<Uuid>,
    start_at: DateTime<Utc>,
    service_minutes: i32,
    notes: Option<&str>,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, account_id, groomer_id, customer_id, pet_id,
                                  start_at, service_minutes, status, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'SCHEDULED', $8, $9)
        RETURNING id, account_id, groomer_id, customer_id, pet_id, start_at,
                  service_minutes, status, notes, created_at
        "#,
    )
    .bind(id)
    .bind(account_id)
    .bind(groomer_id)
    .bind(customer_id)
    .bind(pet_id)
    .bind(start_at)
    .bind(service_minutes)
    .bind(notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(appointment)
}

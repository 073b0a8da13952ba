use crate::models::DbRouteDay;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Lazily create or update the (groomer, date) workday record. Passing
/// None for a flag leaves any previously recorded value untouched.
pub async fn upsert_route_day(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
    route_date: NaiveDate,
    day_started: Option<bool>,
    has_assistant: Option<bool>,
) -> Result<DbRouteDay> {
    tracing::debug!(
        "Upserting route day: groomer={}, date={}, day_started={:?}, has_assistant={:?}",
        groomer_id,
        route_date,
        day_started,
        has_assistant
    );

    let route_day = sqlx::query_as::<_, DbRouteDay>(
        r#"
        INSERT INTO route_days (groomer_id, route_date, day_started, has_assistant)
        VALUES ($1, $2, COALESCE($3, FALSE), COALESCE($4, FALSE))
        ON CONFLICT (groomer_id, route_date) DO UPDATE SET
            day_started = COALESCE($3, route_days.day_started),
            has_assistant = COALESCE($4, route_days.has_assistant)
        RETURNING groomer_id, route_date, day_started, has_assistant
        "#,
    )
    .bind(groomer_id)
    .bind(route_date)
    .bind(day_started)
    .bind(has_assistant)
    .fetch_one(pool)
    .await?;

    Ok(route_day)
}

pub async fn get_route_day(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
    route_date: NaiveDate,
) -> Result<Option<DbRouteDay>> {
    let route_day = sqlx::query_as::<_, DbRouteDay>(
        r#"
        SELECT groomer_id, route_date, day_started, has_assistant
        FROM route_days
        WHERE groomer_id = $1 AND route_date = $2
        "#,
    )
    .bind(groomer_id)
    .bind(route_date)
    .fetch_optional(pool)
    .await?;

    Ok(route_day)
}

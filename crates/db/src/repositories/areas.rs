use crate::models::{DbAreaDateOverride, DbAreaDayAssignment, DbServiceArea};
use chrono::NaiveDate;
use eyre::Result;
use groomroute_core::areas::day_of_week_index;
use groomroute_core::models::area::{AreaDateOverride, AreaDayAssignment, ResolvedAreaDay};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Areas for one account, ordered by name so the matcher's first-hit-wins
/// rule stays deterministic across runs.
pub async fn list_areas_for_account(
    pool: &Pool<Postgres>,
    account_id: Uuid,
) -> Result<Vec<DbServiceArea>> {
    let areas = sqlx::query_as::<_, DbServiceArea>(
        r#"
        SELECT id, account_id, name, color, zip_codes, center_lat, center_lng,
               radius_miles, created_at
        FROM service_areas
        WHERE account_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(areas)
}

pub async fn get_area_by_id(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
) -> Result<Option<DbServiceArea>> {
    let area = sqlx::query_as::<_, DbServiceArea>(
        r#"
        SELECT id, account_id, name, color, zip_codes, center_lat, center_lng,
               radius_miles, created_at
        FROM service_areas
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(area)
}

/// The single weekday default for (groomer, day), if one is planned.
pub async fn get_assignment_for_day(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
    day_of_week: i16,
) -> Result<Option<DbAreaDayAssignment>> {
    let assignment = sqlx::query_as::<_, DbAreaDayAssignment>(
        r#"
        SELECT groomer_id, day_of_week, area_id
        FROM area_day_assignments
        WHERE groomer_id = $1 AND day_of_week = $2
        "#,
    )
    .bind(groomer_id)
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    Ok(assignment)
}

pub async fn list_day_assignments_for_groomer(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
) -> Result<Vec<DbAreaDayAssignment>> {
    let assignments = sqlx::query_as::<_, DbAreaDayAssignment>(
        r#"
        SELECT groomer_id, day_of_week, area_id
        FROM area_day_assignments
        WHERE groomer_id = $1
        ORDER BY day_of_week ASC
        "#,
    )
    .bind(groomer_id)
    .fetch_all(pool)
    .await?;

    Ok(assignments)
}

/// Weekdays on which a groomer covers the given area, for forward scans
/// like "next day we are in the customer's area".
pub async fn list_assigned_days_for_area(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
    area_id: Uuid,
) -> Result<Vec<i16>> {
    let days = sqlx::query_scalar::<_, i16>(
        r#"
        SELECT day_of_week
        FROM area_day_assignments
        WHERE groomer_id = $1 AND area_id = $2
        ORDER BY day_of_week ASC
        "#,
    )
    .bind(groomer_id)
    .bind(area_id)
    .fetch_all(pool)
    .await?;

    Ok(days)
}

pub async fn list_date_overrides_in_range(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbAreaDateOverride>> {
    let overrides = sqlx::query_as::<_, DbAreaDateOverride>(
        r#"
        SELECT groomer_id, override_date, area_id
        FROM area_date_overrides
        WHERE groomer_id = $1 AND override_date >= $2 AND override_date <= $3
        ORDER BY override_date ASC
        "#,
    )
    .bind(groomer_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(overrides)
}

/// Resolve the groomer's area for each date in `[from, to]` inclusive,
/// with a date-specific override replacing the weekday default for that
/// single date. The precedence logic itself lives in the core crate; this
/// just feeds it the stored plan.
pub async fn resolve_area_days(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<ResolvedAreaDay>> {
    let assignments: Vec<AreaDayAssignment> = list_day_assignments_for_groomer(pool, groomer_id)
        .await?
        .into_iter()
        .map(AreaDayAssignment::from)
        .collect();
    let overrides: Vec<AreaDateOverride> = list_date_overrides_in_range(pool, groomer_id, from, to)
        .await?
        .into_iter()
        .map(AreaDateOverride::from)
        .collect();

    Ok(groomroute_core::areas::resolve_area_days(
        &assignments,
        &overrides,
        from,
        to,
    ))
}

/// The area a groomer covers on one concrete date, override first.
pub async fn resolve_area_for_date(
    pool: &Pool<Postgres>,
    groomer_id: Uuid,
    date: NaiveDate,
) -> Result<Option<Uuid>> {
    let overrides = list_date_overrides_in_range(pool, groomer_id, date, date).await?;
    if let Some(o) = overrides.first() {
        return Ok(Some(o.area_id));
    }

    let assignment = get_assignment_for_day(pool, groomer_id, day_of_week_index(date)).await?;
    Ok(assignment.map(|a| a.area_id))
}

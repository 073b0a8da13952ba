use crate::models::DbBreak;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_breaks_for_groomer_date(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    groomer_id: Uuid,
    break_date: NaiveDate,
) -> Result<Vec<DbBreak>> {
    let breaks = sqlx::query_as::<_, DbBreak>(
        r#"
        SELECT id, account_id, groomer_id, break_date, break_type, planned_start,
               planned_end, taken, actual_start, actual_minutes
        FROM breaks
        WHERE account_id = $1 AND groomer_id = $2 AND break_date = $3
        ORDER BY planned_start ASC NULLS LAST
        "#,
    )
    .bind(account_id)
    .bind(groomer_id)
    .bind(break_date)
    .fetch_all(pool)
    .await?;

    Ok(breaks)
}

pub async fn get_break_by_id(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
) -> Result<Option<DbBreak>> {
    let row = sqlx::query_as::<_, DbBreak>(
        r#"
        SELECT id, account_id, groomer_id, break_date, break_type, planned_start,
               planned_end, taken, actual_start, actual_minutes
        FROM breaks
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create_break(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    groomer_id: Uuid,
    break_date: NaiveDate,
    break_type: &str,
    planned_start: Option<DateTime<Utc>>,
    planned_end: Option<DateTime<Utc>>,
) -> Result<DbBreak> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating break: groomer={}, date={}, type={}",
        groomer_id,
        break_date,
        break_type
    );

    let row = sqlx::query_as::<_, DbBreak>(
        r#"
        INSERT INTO breaks (id, account_id, groomer_id, break_date, break_type,
                            planned_start, planned_end, taken)
        VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
        RETURNING id, account_id, groomer_id, break_date, break_type, planned_start,
                  planned_end, taken, actual_start, actual_minutes
        "#,
    )
    .bind(id)
    .bind(account_id)
    .bind(groomer_id)
    .bind(break_date)
    .bind(break_type)
    .bind(planned_start)
    .bind(planned_end)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn mark_break_taken(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
    actual_start: DateTime<Utc>,
    actual_minutes: i32,
) -> Result<DbBreak> {
    let row = sqlx::query_as::<_, DbBreak>(
        r#"
        UPDATE breaks
        SET taken = TRUE, actual_start = $3, actual_minutes = $4
        WHERE account_id = $1 AND id = $2
        RETURNING id, account_id, groomer_id, break_date, break_type, planned_start,
                  planned_end, taken, actual_start, actual_minutes
        "#,
    )
    .bind(account_id)
    .bind(id)
    .bind(actual_start)
    .bind(actual_minutes)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

use crate::models::DbCustomerEvent;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Append one row to a customer's structured history. The log is
/// append-only; rows are never updated or deleted.
pub async fn append_customer_event(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    customer_id: Uuid,
    actor: &str,
    action: &str,
    reason: Option<&str>,
) -> Result<DbCustomerEvent> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let event = sqlx::query_as::<_, DbCustomerEvent>(
        r#"
        INSERT INTO customer_events (id, account_id, customer_id, actor, action, reason, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, account_id, customer_id, actor, action, reason, created_at
        "#,
    )
    .bind(id)
    .bind(account_id)
    .bind(customer_id)
    .bind(actor)
    .bind(action)
    .bind(reason)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(event)
}

pub async fn list_customer_events(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    customer_id: Uuid,
) -> Result<Vec<DbCustomerEvent>> {
    let events = sqlx::query_as::<_, DbCustomerEvent>(
        r#"
        SELECT id, account_id, customer_id, actor, action, reason, created_at
        FROM customer_events
        WHERE account_id = $1 AND customer_id = $2
        ORDER BY created_at DESC
        "#,
    )
    .bind(account_id)
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(events)
}

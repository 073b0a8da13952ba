use crate::models::DbCustomer;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_customer_by_id(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, account_id, name, lat, lng, zip_code, cancellation_count,
               no_show_count, lifetime_spend_cents, service_area_id, notes, created_at
        FROM customers
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

pub async fn update_service_area(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    customer_id: Uuid,
    area_id: Uuid,
) -> Result<()> {
    tracing::debug!(
        "Assigning customer {} to service area {}",
        customer_id,
        area_id
    );

    let result = sqlx::query(
        r#"
        UPDATE customers
        SET service_area_id = $3
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(customer_id)
    .bind(area_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(eyre::eyre!("Customer not found: {}", customer_id));
    }

    Ok(())
}

pub async fn record_cancellation(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    customer_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE customers
        SET cancellation_count = cancellation_count + 1
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(customer_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn record_no_show(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    customer_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE customers
        SET no_show_count = no_show_count + 1
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(customer_id)
    .execute(pool)
    .await?;

    Ok(())
}

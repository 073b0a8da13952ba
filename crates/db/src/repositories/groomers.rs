use crate::models::DbGroomer;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_groomer_by_id(
    pool: &Pool<Postgres>,
    account_id: Uuid,
    id: Uuid,
) -> Result<Option<DbGroomer>> {
    let groomer = sqlx::query_as::<_, DbGroomer>(
        r#"
        SELECT id, account_id, name, work_start, work_end, large_dog_daily_limit,
               default_assistant, phone, email, booking_slug, created_at
        FROM groomers
        WHERE account_id = $1 AND id = $2
        "#,
    )
    .bind(account_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(groomer)
}

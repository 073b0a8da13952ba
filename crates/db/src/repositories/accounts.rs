use crate::models::DbAccount;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_account_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAccount>> {
    let account = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, name, timezone, created_at
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

use crate::models::DbWaitlistCandidate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Waitlist entries joined with the customer history the ranker scores on.
/// Ordered by customer name so repeated runs see candidates in the same
/// order before ranking.
pub async fn list_candidates_for_account(
    pool: &Pool<Postgres>,
    account_id: Uuid,
) -> Result<Vec<DbWaitlistCandidate>> {
    let candidates = sqlx::query_as::<_, DbWaitlistCandidate>(
        r#"
        SELECT w.id AS entry_id,
               w.customer_id,
               c.name AS customer_name,
               w.preferred_days,
               w.earliest_time,
               w.latest_time,
               w.service_minutes,
               c.lat,
               c.lng,
               c.zip_code,
               c.service_area_id,
               c.lifetime_spend_cents,
               c.cancellation_count,
               c.no_show_count
        FROM waitlist_entries w
        JOIN customers c ON c.id = w.customer_id
        WHERE w.account_id = $1
        ORDER BY c.name ASC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(candidates)
}

//! Lookups shared by every handler: the requesting account's timezone and
//! account-scoped entity fetches that fail with NotFound before any use.

use chrono_tz::Tz;
use groomroute_core::errors::GroomError;
use groomroute_db::models::{DbAccount, DbCustomer, DbGroomer};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

pub(crate) async fn require_account(pool: &PgPool, account_id: Uuid) -> Result<DbAccount, AppError> {
    let account = groomroute_db::repositories::accounts::get_account_by_id(pool, account_id)
        .await
        .map_err(GroomError::Database)?
        .ok_or_else(|| GroomError::NotFound(format!("Account with ID {} not found", account_id)))?;
    Ok(account)
}

/// The account's timezone, parsed. Every date-boundary computation in the
/// handlers goes through this zone.
pub(crate) async fn account_tz(pool: &PgPool, account_id: Uuid) -> Result<Tz, AppError> {
    let account = require_account(pool, account_id).await?;
    let tz = account.to_core().tz()?;
    Ok(tz)
}

pub(crate) async fn require_groomer(
    pool: &PgPool,
    account_id: Uuid,
    groomer_id: Uuid,
) -> Result<DbGroomer, AppError> {
    let groomer = groomroute_db::repositories::groomers::get_groomer_by_id(pool, account_id, groomer_id)
        .await
        .map_err(GroomError::Database)?
        .ok_or_else(|| GroomError::NotFound(format!("Groomer with ID {} not found", groomer_id)))?;
    Ok(groomer)
}

pub(crate) async fn require_customer(
    pool: &PgPool,
    account_id: Uuid,
    customer_id: Uuid,
) -> Result<DbCustomer, AppError> {
    let customer =
        groomroute_db::repositories::customers::get_customer_by_id(pool, account_id, customer_id)
            .await
            .map_err(GroomError::Database)?
            .ok_or_else(|| {
                GroomError::NotFound(format!("Customer with ID {} not found", customer_id))
            })?;
    Ok(customer)
}

//! # GroomRoute DB
//!
//! PostgreSQL storage for the GroomRoute scheduling service: schema
//! bootstrap, row models, and the repository functions the API handlers
//! orchestrate. Every account-owned query takes the account id explicitly
//! so reads and writes stay inside one tenant.

pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

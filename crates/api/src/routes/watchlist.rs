use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/watchlist/suggestions",
        get(handlers::watchlist::get_suggestions),
    )
}

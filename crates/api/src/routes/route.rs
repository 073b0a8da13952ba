use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/routes/reorder", post(handlers::route::reorder_route))
        .route("/api/routes/day", post(handlers::route::upsert_route_day))
}

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/groomers/:id/breaks", get(handlers::breaks::get_breaks))
        .route("/api/breaks", post(handlers::breaks::create_break))
        .route(
            "/api/breaks/:id/taken",
            post(handlers::breaks::mark_break_taken),
        )
}

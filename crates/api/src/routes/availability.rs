use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/groomers/:id/slots",
            get(handlers::availability::get_available_slots),
        )
        .route(
            "/api/groomers/:id/conflicts",
            get(handlers::availability::check_conflict),
        )
        .route(
            "/api/groomers/:id/large-dog-capacity",
            get(handlers::availability::get_large_dog_capacity),
        )
}

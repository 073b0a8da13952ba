use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/customers/:id/matching-area",
            get(handlers::customer::get_matching_area),
        )
        .route(
            "/api/customers/:id/area",
            post(handlers::customer::assign_area),
        )
        .route(
            "/api/appointments/:id/skip",
            post(handlers::customer::skip_appointment),
        )
}

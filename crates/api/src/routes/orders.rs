use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/orders", post(handlers::orders::place_order))
        .route("/api/orders/:code", get(handlers::orders::track_order))
}

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

/// Per-customer routes. The path id is trusted, so these must sit behind an
/// authenticating proxy.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/customers", post(handlers::customers::ensure_profile))
        .route(
            "/api/customers/:id",
            get(handlers::customers::get_profile).put(handlers::customers::update_profile),
        )
        .route(
            "/api/customers/:id/orders",
            get(handlers::orders::recent_orders),
        )
        .route(
            "/api/customers/:id/loyalty",
            get(handlers::loyalty::get_loyalty),
        )
}

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/categories", get(handlers::catalog::list_categories))
        .route("/api/products", get(handlers::catalog::list_products))
}

//! # Error Handling Middleware
//!
//! Maps `ShopError` values to HTTP status codes and JSON error bodies so every
//! handler reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bakeshop_core::errors::ShopError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that yields a
/// `ShopError` or an `eyre::Report`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use bakeshop_api::middleware::error_handling::AppError;
/// use bakeshop_core::errors::ShopError;
///
/// async fn handler(code: String) -> Result<Json<String>, AppError> {
///     if code.is_empty() {
///         return Err(ShopError::NotFound("order".to_string()).into());
///     }
///     Ok(Json(code))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ShopError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ShopError::NotFound(_) => StatusCode::NOT_FOUND,
            ShopError::Validation(_) => StatusCode::BAD_REQUEST,
            ShopError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ShopError::Conflict(_) => StatusCode::CONFLICT,
            ShopError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ShopError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShopError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures are logged with their full cause chain
        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!(error = ?self.0, "Request failed");
        }

        // Database and internal causes stay in the log, never in the body
        let message = match &self.0 {
            ShopError::Database(_) | ShopError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<ShopError> for AppError {
    fn from(err: ShopError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ShopError::Database(err))
    }
}

/// Maps a ShopError straight to an HTTP response
pub fn map_error(err: ShopError) -> Response {
    AppError(err).into_response()
}

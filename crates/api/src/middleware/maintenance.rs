//! # Maintenance Gate
//!
//! While maintenance mode is on, every `/api` route answers 503 with the
//! shop's contact address. Staff can still reach the API by sending the
//! maintenance PIN in the `x-maintenance-pin` header; the PIN is only ever
//! stored as an Argon2 hash.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use eyre::Result;
use serde_json::json;
use tracing::{debug, warn};

use crate::ApiState;

pub const MAINTENANCE_PIN_HEADER: &str = "x-maintenance-pin";

#[derive(Debug, Clone, Default)]
pub struct MaintenanceConfig {
    pub enabled: bool,
    /// Argon2 PHC string of the bypass PIN
    pub pin_hash: Option<String>,
    pub contact_email: String,
}

impl MaintenanceConfig {
    /// True when `pin` matches the configured hash. Without a hash nobody bypasses.
    pub fn allows(&self, pin: Option<&str>) -> bool {
        match (self.pin_hash.as_deref(), pin) {
            (Some(hash), Some(pin)) => verify_pin(pin, hash),
            _ => false,
        }
    }
}

/// Hashes a PIN with Argon2 and a fresh random salt
///
/// # Returns
///
/// * `Result<String>` - The hash in PHC string format
pub fn hash_pin(pin: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing PIN: {}", e))?
        .to_string();

    Ok(hash)
}

/// Checks a PIN against a stored hash. A malformed hash never matches.
pub fn verify_pin(pin: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Configured maintenance PIN hash is malformed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(pin.trim().as_bytes(), &parsed)
        .is_ok()
}

pub async fn maintenance_gate(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Response {
    let maintenance = &state.maintenance;
    if !maintenance.enabled {
        return next.run(request).await;
    }

    let pin = request
        .headers()
        .get(MAINTENANCE_PIN_HEADER)
        .and_then(|value| value.to_str().ok());
    if maintenance.allows(pin) {
        debug!(path = %request.uri().path(), "Maintenance bypassed with PIN");
        return next.run(request).await;
    }

    let body = Json(json!({
        "error": format!(
            "The shop is closed for maintenance. Please contact {} about your order.",
            maintenance.contact_email
        ),
        "contact_email": maintenance.contact_email,
    }));
    (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
}

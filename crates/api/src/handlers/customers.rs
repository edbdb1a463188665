//! # Customer Profile Handlers
//!
//! Profiles carry the contact and delivery details a customer must complete
//! before ordering, plus the allergies used to hide products from their menu.
//!
//! These routes trust the customer id in the path. Deploy them behind a proxy
//! that authenticates the caller and checks the id belongs to them.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use bakeshop_core::{
    errors::ShopError,
    models::customer::{
        CustomerProfile, CustomerProfileResponse, EnsureCustomerRequest, UpdateProfileRequest,
    },
};
use bakeshop_db::repositories::customer::{
    ensure_customer, get_customer_by_id, update_customer_profile,
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Finds or creates the profile for a signed-in user
///
/// # Endpoint
///
/// ```text
/// POST /api/customers
/// ```
#[axum::debug_handler]
pub async fn ensure_profile(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<EnsureCustomerRequest>,
) -> Result<Json<CustomerProfileResponse>, AppError> {
    request.validate()?;

    let customer = ensure_customer(
        &state.db_pool,
        request.auth_user_id,
        &request.email,
        request.marketing_opt_in,
    )
    .await
    .map_err(ShopError::Database)?;

    Ok(Json(CustomerProfile::from(customer).into()))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerProfileResponse>, AppError> {
    let customer = get_customer_by_id(&state.db_pool, customer_id)
        .await
        .map_err(ShopError::Database)?
        .ok_or_else(|| ShopError::NotFound(format!("Customer {} not found", customer_id)))?;

    Ok(Json(CustomerProfile::from(customer).into()))
}

/// Replaces a customer's profile details and allergies
///
/// # Endpoint
///
/// ```text
/// PUT /api/customers/:id
/// ```
///
/// # Errors
///
/// * `ShopError::Validation` - A required field is blank or an allergy is unknown
/// * `ShopError::NotFound` - No customer has this id
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<CustomerProfileResponse>, AppError> {
    let update = request.normalize()?;

    let customer = update_customer_profile(&state.db_pool, customer_id, &update)
        .await
        .map_err(ShopError::Database)?
        .ok_or_else(|| ShopError::NotFound(format!("Customer {} not found", customer_id)))?;

    Ok(Json(CustomerProfile::from(customer).into()))
}

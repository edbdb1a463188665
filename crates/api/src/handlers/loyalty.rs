use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use bakeshop_core::{
    errors::ShopError,
    loyalty::LoyaltyProgress,
    models::loyalty::{LoyaltyAccount, LoyaltyResponse},
};
use bakeshop_db::repositories::loyalty::get_loyalty_account;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Points balance and progress along the offer ladder
///
/// Customers without an account row have not earned anything yet and get a
/// zero balance rather than a 404. The path id is trusted, so this route must
/// sit behind an authenticating proxy.
#[axum::debug_handler]
pub async fn get_loyalty(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<LoyaltyResponse>, AppError> {
    let account = get_loyalty_account(&state.db_pool, customer_id)
        .await
        .map_err(ShopError::Database)?
        .map(LoyaltyAccount::from)
        .unwrap_or_default();

    Ok(Json(LoyaltyResponse {
        progress: LoyaltyProgress::for_points(account.points_balance),
        points_balance: account.points_balance,
        lifetime_points: account.lifetime_points,
        tier: account.tier,
    }))
}

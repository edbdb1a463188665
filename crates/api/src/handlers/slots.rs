//! # Slot Handlers
//!
//! Lists the pickup and delivery slots offered for a date, each annotated with
//! how many orders already occupy it.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
};
use bakeshop_core::{
    errors::ShopError,
    models::time_slot::{SlotListResponse, TimeSlot},
    slots::{available_slots, parse_requested_date, with_bookings},
};
use bakeshop_db::{PgSlotConfig, repositories::order::count_orders_by_slot};
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::PgPool;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// Requested date, `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Lists slot availability for a date
///
/// # Endpoint
///
/// ```text
/// GET /api/slots?date=2025-01-15
/// ```
///
/// # Errors
///
/// * `ShopError::InvalidArgument` - The date is missing or malformed
/// * `ShopError::Database` - Booking counts could not be read
///
/// A closed day, a date past the horizon or a same-day request after the
/// cutoff is not an error; the slot list is simply empty.
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotListResponse>, AppError> {
    let date = parse_requested_date(query.date.as_deref())?;

    let source = PgSlotConfig::new(state.db_pool.clone());
    let slots = available_slots(&source, date, state.local_now()).await;
    let booked = booking_counts(&state.db_pool, &slots).await?;

    Ok(Json(SlotListResponse {
        date,
        slots: with_bookings(&slots, &booked),
    }))
}

/// Existing order counts for the span the slots cover.
async fn booking_counts(
    pool: &PgPool,
    slots: &[TimeSlot],
) -> Result<HashMap<NaiveDateTime, i64>, AppError> {
    let (Some(first), Some(last)) = (slots.first(), slots.last()) else {
        return Ok(HashMap::new());
    };

    let counts = count_orders_by_slot(pool, first.start, last.end)
        .await
        .map_err(ShopError::Database)?;

    Ok(counts
        .into_iter()
        .map(|count| (count.slot_start, count.booked))
        .collect())
}

//! # Order Handlers
//!
//! Placing an order re-checks everything the storefront showed the customer:
//! the slot must still be offered for its date, every product must still be on
//! sale, and the slot must have room when the order is written. Capacity is
//! enforced inside the same transaction that inserts the order.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use bakeshop_core::{
    catalog::{CartSummary, price_cart},
    errors::{ShopError, ShopResult},
    models::{
        order::{
            OrderLineResponse, OrderStatus, OrderSummary, PlaceOrderRequest, PlaceOrderResponse,
            TrackOrderResponse,
        },
        product::Product,
    },
    session::SessionContext,
    slots::{available_slots, find_offered_slot},
};
use bakeshop_db::{
    PgSlotConfig,
    repositories::{
        catalog::get_products_by_ids,
        customer::get_customer_by_id,
        order::{
            BookingOutcome, NewOrder, NewOrderItem, create_order, get_order_by_code,
            get_order_items, get_recent_orders_for_customer,
        },
    },
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub const DEFAULT_RECENT_ORDERS: i64 = 10;
pub const MAX_RECENT_ORDERS: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct RecentOrdersQuery {
    pub limit: Option<i64>,
}

/// Clamps a requested page size to `1..=MAX_RECENT_ORDERS`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_ORDERS)
        .clamp(1, MAX_RECENT_ORDERS)
}

/// Collapses the requested items into a cart, merging repeated products.
pub fn cart_from_request(request: &PlaceOrderRequest) -> SessionContext {
    request
        .items
        .iter()
        .fold(SessionContext::new(), |session, item| {
            session.with_item_added(item.product_id, i64::from(item.qty))
        })
}

/// Turns priced cart lines into order rows.
///
/// A quantity that does not fit the stored column is rejected rather than
/// clamped, so stored quantities always agree with the priced totals.
pub fn order_items(summary: &CartSummary) -> ShopResult<Vec<NewOrderItem>> {
    summary
        .lines
        .iter()
        .map(|line| {
            let qty = i32::try_from(line.qty).map_err(|_| {
                ShopError::Validation(format!(
                    "quantity {} for product {} is too large",
                    line.qty, line.product_id
                ))
            })?;
            Ok(NewOrderItem {
                product_id: line.product_id,
                product_name: line.name.clone(),
                qty,
                unit_price_inc_vat: line.unit_price_inc_vat(),
                line_total_inc_vat: line.line_inc_vat,
            })
        })
        .collect()
}

/// Places an order for one of the currently offered slots
///
/// # Endpoint
///
/// ```text
/// POST /api/orders
/// ```
///
/// # Errors
///
/// * `ShopError::Validation` - The request is incomplete, names an unknown
///   customer, a product is not on sale, or the slot is not offered for its date
/// * `ShopError::Conflict` - The slot filled up before the order was written
/// * `ShopError::Database` - Database error
#[axum::debug_handler]
pub async fn place_order(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), AppError> {
    request.validate()?;

    if let Some(customer_id) = request.customer_id {
        get_customer_by_id(&state.db_pool, customer_id)
            .await
            .map_err(ShopError::Database)?
            .ok_or_else(|| {
                ShopError::Validation(format!("customer {} not found", customer_id))
            })?;
    }

    let cart = cart_from_request(&request);
    let product_ids: Vec<i64> = cart.cart().keys().copied().collect();

    let products: HashMap<i64, Product> = get_products_by_ids(&state.db_pool, &product_ids)
        .await
        .map_err(ShopError::Database)?
        .into_iter()
        .map(Product::from)
        .map(|product| (product.id, product))
        .collect();

    if let Some(missing) = product_ids.iter().find(|id| !products.contains_key(*id)) {
        return Err(ShopError::Validation(format!("product {} is not available", missing)).into());
    }

    let summary = price_cart(cart.cart(), &products);
    let items = order_items(&summary)?;

    let now = state.local_now();
    let source = PgSlotConfig::new(state.db_pool.clone());
    let slots = available_slots(&source, request.slot_start.date(), now).await;
    let slot = find_offered_slot(&slots, request.slot_start, request.slot_end).ok_or_else(|| {
        ShopError::Validation(format!(
            "the slot {} - {} is not available",
            request.slot_start, request.slot_end
        ))
    })?;

    let new_order = NewOrder {
        customer_id: request.customer_id,
        order_type: request.order_type,
        slot_start: slot.start,
        slot_end: slot.end,
        payment_method: request.payment_method,
        customer_email: request.customer_email.trim().to_string(),
        customer_phone: request.customer_phone.trim().to_string(),
        delivery_address: request.delivery_address().map(str::to_string),
        notes: request.notes().map(str::to_string),
        subtotal_ex_vat: summary.subtotal_ex_vat,
        vat_total: summary.vat_total,
        total_inc_vat: summary.total_inc_vat,
        items,
    };

    let order = match create_order(&state.db_pool, &new_order, slot.capacity, now.date())
        .await
        .map_err(ShopError::Database)?
    {
        BookingOutcome::Created(order) => order,
        BookingOutcome::SlotFull { booked, capacity } => {
            info!(slot_start = %slot.start, booked, capacity, "Rejected order for full slot");
            return Err(ShopError::Conflict(format!(
                "the slot starting {} is fully booked",
                slot.start
            ))
            .into());
        }
    };

    let response = PlaceOrderResponse {
        id: order.id,
        order_code: order.order_code,
        status: OrderStatus::Pending,
        slot_start: order.slot_start,
        slot_end: order.slot_end,
        subtotal_ex_vat: order.subtotal_ex_vat,
        vat_total: order.vat_total,
        total_inc_vat: order.total_inc_vat,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Looks an order up by its public code
///
/// # Endpoint
///
/// ```text
/// GET /api/orders/WB-20250115-007
/// ```
///
/// The code alone unlocks the item list, so this route must sit behind an
/// authenticating proxy that checks the caller owns the order.
#[axum::debug_handler]
pub async fn track_order(
    State(state): State<Arc<ApiState>>,
    Path(code): Path<String>,
) -> Result<Json<TrackOrderResponse>, AppError> {
    let order = get_order_by_code(&state.db_pool, &code)
        .await
        .map_err(ShopError::Database)?
        .ok_or_else(|| ShopError::NotFound(format!("Order {} not found", code.trim())))?;

    let items = get_order_items(&state.db_pool, order.id)
        .await
        .map_err(ShopError::Database)?;

    Ok(Json(TrackOrderResponse {
        order_code: order.order_code,
        status: order.status,
        order_type: order.order_type,
        slot_start: order.slot_start,
        slot_end: order.slot_end,
        created_at: order.created_at,
        total_inc_vat: order.total_inc_vat,
        items: items.into_iter().map(OrderLineResponse::from).collect(),
    }))
}

/// Latest orders for a customer, newest first
///
/// # Endpoint
///
/// ```text
/// GET /api/customers/6f1c.../orders?limit=10
/// ```
///
/// The path id is trusted as given. Deploy behind an authenticating proxy
/// that only lets a customer reach their own id.
#[axum::debug_handler]
pub async fn recent_orders(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
    Query(query): Query<RecentOrdersQuery>,
) -> Result<Json<Vec<OrderSummary>>, AppError> {
    let orders = get_recent_orders_for_customer(&state.db_pool, customer_id, clamp_limit(query.limit))
        .await
        .map_err(ShopError::Database)?;

    Ok(Json(orders.iter().map(OrderSummary::from).collect()))
}

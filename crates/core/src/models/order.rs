use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ShopError, ShopResult};

pub const ORDER_CODE_PREFIX: &str = "WB";

/// Most units of one product a single order may carry, after repeated lines
/// for the same product are merged.
pub const MAX_ITEM_QTY: i32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Pickup,
    Delivery,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Pickup => "pickup",
            OrderType::Delivery => "delivery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

/// Lifecycle of an order. Cancelled orders no longer occupy their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub qty: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub order_type: OrderType,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
    pub payment_method: PaymentMethod,
    pub customer_id: Option<Uuid>,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub accepted_terms: bool,
}

impl PlaceOrderRequest {
    /// Checks the request before any slot or stock lookup is made.
    pub fn validate(&self) -> ShopResult<()> {
        let mut errors = Vec::new();

        if !self.accepted_terms {
            errors.push("terms and conditions must be accepted");
        }
        if self.items.is_empty() {
            errors.push("at least one item is required");
        } else if self.items.iter().any(|item| item.qty <= 0) {
            errors.push("item quantities must be positive");
        } else if self
            .merged_quantities()
            .values()
            .any(|&qty| qty > i64::from(MAX_ITEM_QTY))
        {
            errors.push("item quantities must not exceed 99 per product");
        }

        let email = self.customer_email.trim();
        if email.is_empty() {
            errors.push("email is required");
        } else if !email.contains('@') {
            errors.push("email is not valid");
        }
        if self.customer_phone.trim().is_empty() {
            errors.push("mobile number is required");
        }
        if self.order_type == OrderType::Delivery && self.delivery_address().is_none() {
            errors.push("delivery address is required for delivery orders");
        }
        if self.slot_end <= self.slot_start {
            errors.push("slot end must be after slot start");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ShopError::Validation(errors.join("; ")))
        }
    }

    /// Total quantity requested per product, summed across repeated lines.
    pub fn merged_quantities(&self) -> BTreeMap<i64, i64> {
        let mut merged = BTreeMap::new();
        for item in &self.items {
            *merged.entry(item.product_id).or_insert(0) += i64::from(item.qty);
        }
        merged
    }

    /// The trimmed delivery address, if one was given.
    pub fn delivery_address(&self) -> Option<&str> {
        self.delivery_address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub id: Uuid,
    pub order_code: String,
    pub status: OrderStatus,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
    pub subtotal_ex_vat: i64,
    pub vat_total: i64,
    pub total_inc_vat: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub product_id: i64,
    pub product_name: String,
    pub qty: i32,
    pub unit_price_inc_vat: i64,
    pub line_total_inc_vat: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackOrderResponse {
    pub order_code: String,
    pub status: String,
    pub order_type: String,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub total_inc_vat: i64,
    pub items: Vec<OrderLineResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_code: String,
    pub status: String,
    pub order_type: String,
    pub slot_start: NaiveDateTime,
    pub total_inc_vat: i64,
}

/// Formats the public tracking code, e.g. `WB-20250115-007`.
pub fn format_order_code(date: NaiveDate, sequence: i64) -> String {
    format!(
        "{}-{}-{:03}",
        ORDER_CODE_PREFIX,
        date.format("%Y%m%d"),
        sequence
    )
}

/// The code prefix shared by every order created on `date`.
pub fn order_code_day_prefix(date: NaiveDate) -> String {
    format!("{}-{}-", ORDER_CODE_PREFIX, date.format("%Y%m%d"))
}

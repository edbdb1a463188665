use bakeshop_core::models::{
    customer::CustomerProfile,
    loyalty::LoyaltyAccount,
    opening_hours::OpeningHoursRule,
    order::{OrderLineResponse, OrderSummary},
    product::{Category, PricingMode, Product},
    slot_policy::{
        DEFAULT_MAX_ORDERS_PER_SLOT, DEFAULT_MAX_PREORDER_DAYS, DEFAULT_SLOT_LENGTH_MINUTES,
        SlotPolicy,
    },
};
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOpeningHours {
    /// 0 = Monday .. 6 = Sunday
    pub weekday: i16,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_closed: bool,
}

impl DbOpeningHours {
    /// Converts a stored row, or `None` when the row cannot describe a day.
    pub fn into_rule(self) -> Option<OpeningHoursRule> {
        let weekday = u8::try_from(self.weekday)
            .ok()
            .and_then(|day| Weekday::try_from(day).ok())?;

        if self.is_closed {
            return Some(OpeningHoursRule::closed(weekday));
        }
        Some(OpeningHoursRule::open(weekday, self.open_time?, self.close_time?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotRule {
    pub slot_length_minutes: Option<i32>,
    pub max_orders_per_slot: Option<i32>,
    pub last_same_day_order_time: Option<NaiveTime>,
    pub max_preorder_days: Option<i32>,
}

impl From<DbSlotRule> for SlotPolicy {
    fn from(row: DbSlotRule) -> Self {
        Self {
            slot_length_minutes: row
                .slot_length_minutes
                .unwrap_or(DEFAULT_SLOT_LENGTH_MINUTES),
            max_orders_per_slot: row
                .max_orders_per_slot
                .unwrap_or(DEFAULT_MAX_ORDERS_PER_SLOT),
            last_same_day_order_time: row.last_same_day_order_time,
            max_preorder_days: row.max_preorder_days.unwrap_or(DEFAULT_MAX_PREORDER_DAYS),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<DbCategory> for Category {
    fn from(row: DbCategory) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProduct {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub pricing_mode: String,
    pub manual_price_ex_vat: Option<i64>,
    pub recommended_price_ex_vat: Option<i64>,
    pub base_price: Option<i64>,
    pub apply_vat: bool,
    pub custom_vat_rate: Option<i32>,
    pub allergens: Vec<String>,
    pub dietary_flags: Vec<String>,
}

impl From<DbProduct> for Product {
    fn from(row: DbProduct) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            pricing_mode: PricingMode::parse(&row.pricing_mode),
            manual_price_ex_vat: row.manual_price_ex_vat,
            recommended_price_ex_vat: row.recommended_price_ex_vat,
            base_price: row.base_price,
            apply_vat: row.apply_vat,
            custom_vat_rate: row.custom_vat_rate,
            allergens: row.allergens,
            dietary_flags: row.dietary_flags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOrder {
    pub id: Uuid,
    pub order_code: String,
    pub customer_id: Option<Uuid>,
    pub status: String,
    pub order_type: String,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
    pub payment_method: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub subtotal_ex_vat: i64,
    pub vat_total: i64,
    pub total_inc_vat: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&DbOrder> for OrderSummary {
    fn from(row: &DbOrder) -> Self {
        Self {
            order_code: row.order_code.clone(),
            status: row.status.clone(),
            order_type: row.order_type.clone(),
            slot_start: row.slot_start,
            total_inc_vat: row.total_inc_vat,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOrderItem {
    pub order_id: Uuid,
    pub product_id: i64,
    pub product_name: String,
    pub qty: i32,
    pub unit_price_inc_vat: i64,
    pub line_total_inc_vat: i64,
}

impl From<DbOrderItem> for OrderLineResponse {
    fn from(row: DbOrderItem) -> Self {
        Self {
            product_id: row.product_id,
            product_name: row.product_name,
            qty: row.qty,
            unit_price_inc_vat: row.unit_price_inc_vat,
            line_total_inc_vat: row.line_total_inc_vat,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotCount {
    pub slot_start: NaiveDateTime,
    pub booked: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLoyaltyAccount {
    pub customer_id: Uuid,
    pub points_balance: i32,
    pub lifetime_points: i32,
    pub tier: Option<String>,
}

impl From<DbLoyaltyAccount> for LoyaltyAccount {
    fn from(row: DbLoyaltyAccount) -> Self {
        Self {
            points_balance: row.points_balance,
            lifetime_points: row.lifetime_points,
            tier: row.tier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomer {
    pub id: Uuid,
    pub auth_user_id: Option<Uuid>,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub town: Option<String>,
    pub postcode: Option<String>,
    pub allergies: Vec<String>,
    pub marketing_opt_in: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbCustomer> for CustomerProfile {
    fn from(row: DbCustomer) -> Self {
        Self {
            id: row.id,
            auth_user_id: row.auth_user_id,
            email: row.email,
            full_name: row.full_name,
            phone: row.phone,
            address_line1: row.address_line1,
            address_line2: row.address_line2,
            town: row.town,
            postcode: row.postcode,
            allergies: row.allergies,
            marketing_opt_in: row.marketing_opt_in,
            created_at: row.created_at,
        }
    }
}

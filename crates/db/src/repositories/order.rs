use crate::models::{DbOrder, DbOrderItem, DbSlotCount};
use bakeshop_core::{
    models::order::{
        OrderStatus, OrderType, PaymentMethod, format_order_code, order_code_day_prefix,
    },
    slots::slot_has_room,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};
use uuid::Uuid;

/// Advisory lock namespaces, paired with a `YYYYMMDD` key.
const SLOT_DAY_LOCK: i32 = 0x534c_4f54;
const ORDER_CODE_DAY_LOCK: i32 = 0x434f_4445;

const ORDER_COLUMNS: &str = "id, order_code, customer_id, status, order_type, slot_start, slot_end, \
     payment_method, customer_email, customer_phone, delivery_address, notes, \
     subtotal_ex_vat, vat_total, total_inc_vat, created_at";

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub qty: i32,
    pub unit_price_inc_vat: i64,
    pub line_total_inc_vat: i64,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Option<Uuid>,
    pub order_type: OrderType,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
    pub payment_method: PaymentMethod,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub subtotal_ex_vat: i64,
    pub vat_total: i64,
    pub total_inc_vat: i64,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(DbOrder),
    SlotFull { booked: i64, capacity: u32 },
}

/// Integer `YYYYMMDD` used as an advisory lock key.
pub fn day_key(date: NaiveDate) -> i32 {
    date.year() * 10_000 + (date.month() as i32) * 100 + date.day() as i32
}

/// Non-cancelled order counts per slot start within `[from, to)`.
pub async fn count_orders_by_slot(
    pool: &Pool<Postgres>,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<DbSlotCount>> {
    let counts = sqlx::query_as::<_, DbSlotCount>(
        r#"
        SELECT slot_start, COUNT(*) AS booked
        FROM orders
        WHERE slot_start >= $1 AND slot_start < $2 AND status <> $3
        GROUP BY slot_start
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(OrderStatus::Cancelled.as_str())
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Creates an order if its slot still has room.
///
/// Bookings for the same slot date are serialized with a transaction-scoped
/// advisory lock, so the capacity count and the insert cannot interleave with
/// another booking for that day. Order codes are numbered per creation date
/// under a second lock.
pub async fn create_order(
    pool: &Pool<Postgres>,
    order: &NewOrder,
    capacity: u32,
    created_on: NaiveDate,
) -> Result<BookingOutcome> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(SLOT_DAY_LOCK)
        .bind(day_key(order.slot_start.date()))
        .execute(&mut *tx)
        .await?;

    let booked = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM orders
        WHERE slot_start = $1 AND status <> $2
        "#,
    )
    .bind(order.slot_start)
    .bind(OrderStatus::Cancelled.as_str())
    .fetch_one(&mut *tx)
    .await?;

    if !slot_has_room(booked, capacity) {
        debug!(slot_start = %order.slot_start, booked, capacity, "Slot is full");
        tx.rollback().await?;
        return Ok(BookingOutcome::SlotFull { booked, capacity });
    }

    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(ORDER_CODE_DAY_LOCK)
        .bind(day_key(created_on))
        .execute(&mut *tx)
        .await?;

    let placed_today = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM orders
        WHERE order_code LIKE $1 || '%'
        "#,
    )
    .bind(order_code_day_prefix(created_on))
    .fetch_one(&mut *tx)
    .await?;
    let order_code = format_order_code(created_on, placed_today + 1);

    let created = sqlx::query_as::<_, DbOrder>(&format!(
        r#"
        INSERT INTO orders (id, order_code, customer_id, status, order_type, slot_start, slot_end,
                            payment_method, customer_email, customer_phone, delivery_address, notes,
                            subtotal_ex_vat, vat_total, total_inc_vat)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&order_code)
    .bind(order.customer_id)
    .bind(OrderStatus::Pending.as_str())
    .bind(order.order_type.as_str())
    .bind(order.slot_start)
    .bind(order.slot_end)
    .bind(order.payment_method.as_str())
    .bind(&order.customer_email)
    .bind(&order.customer_phone)
    .bind(&order.delivery_address)
    .bind(&order.notes)
    .bind(order.subtotal_ex_vat)
    .bind(order.vat_total)
    .bind(order.total_inc_vat)
    .fetch_one(&mut *tx)
    .await?;

    for item in &order.items {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, product_name, qty, unit_price_inc_vat, line_total_inc_vat)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(created.id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.qty)
        .bind(item.unit_price_inc_vat)
        .bind(item.line_total_inc_vat)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(order_code = %created.order_code, slot_start = %created.slot_start, "Order created");
    Ok(BookingOutcome::Created(created))
}

pub async fn get_order_by_code(pool: &Pool<Postgres>, order_code: &str) -> Result<Option<DbOrder>> {
    let order = sqlx::query_as::<_, DbOrder>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE order_code = $1"
    ))
    .bind(order_code.trim())
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

pub async fn get_order_items(pool: &Pool<Postgres>, order_id: Uuid) -> Result<Vec<DbOrderItem>> {
    let items = sqlx::query_as::<_, DbOrderItem>(
        r#"
        SELECT order_id, product_id, product_name, qty, unit_price_inc_vat, line_total_inc_vat
        FROM order_items
        WHERE order_id = $1
        ORDER BY product_name ASC
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

pub async fn get_recent_orders_for_customer(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    limit: i64,
) -> Result<Vec<DbOrder>> {
    let orders = sqlx::query_as::<_, DbOrder>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at DESC LIMIT $2"
    ))
    .bind(customer_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

use crate::models::{DbOpeningHours, DbSlotRule};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_opening_hours(pool: &Pool<Postgres>) -> Result<Vec<DbOpeningHours>> {
    let rows = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        SELECT weekday, open_time, close_time, is_closed
        FROM opening_hours
        ORDER BY weekday ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_slot_rule(pool: &Pool<Postgres>) -> Result<Option<DbSlotRule>> {
    let rule = sqlx::query_as::<_, DbSlotRule>(
        r#"
        SELECT slot_length_minutes, max_orders_per_slot, last_same_day_order_time, max_preorder_days
        FROM slot_rules
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(rule)
}

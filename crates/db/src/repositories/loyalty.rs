use crate::models::DbLoyaltyAccount;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_loyalty_account(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Option<DbLoyaltyAccount>> {
    let account = sqlx::query_as::<_, DbLoyaltyAccount>(
        r#"
        SELECT customer_id, points_balance, lifetime_points, tier
        FROM loyalty_accounts
        WHERE customer_id = $1
        "#,
    )
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

use crate::models::DbCustomer;
use bakeshop_core::models::customer::ProfileUpdate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;
use uuid::Uuid;

const CUSTOMER_COLUMNS: &str = "id, auth_user_id, email, full_name, phone, address_line1, \
     address_line2, town, postcode, allergies, marketing_opt_in, created_at";

pub async fn get_customer_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

/// Finds the profile for a signed-in user, creating or linking one if needed.
///
/// Lookup order: a profile already linked to `auth_user_id`, then an unlinked
/// profile with the same email (e.g. created from an earlier guest order),
/// which gets linked, then a fresh profile.
pub async fn ensure_customer(
    pool: &Pool<Postgres>,
    auth_user_id: Uuid,
    email: &str,
    marketing_opt_in: bool,
) -> Result<DbCustomer> {
    let linked = sqlx::query_as::<_, DbCustomer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE auth_user_id = $1"
    ))
    .bind(auth_user_id)
    .fetch_optional(pool)
    .await?;
    if let Some(customer) = linked {
        return Ok(customer);
    }

    let claimed = sqlx::query_as::<_, DbCustomer>(&format!(
        r#"
        UPDATE customers
        SET auth_user_id = $1, updated_at = NOW()
        WHERE id = (
            SELECT id FROM customers
            WHERE LOWER(email) = LOWER($2) AND auth_user_id IS NULL
            ORDER BY created_at ASC
            LIMIT 1
        )
        RETURNING {CUSTOMER_COLUMNS}
        "#
    ))
    .bind(auth_user_id)
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;
    if let Some(customer) = claimed {
        info!(customer_id = %customer.id, "Linked existing customer profile");
        return Ok(customer);
    }

    // A concurrent first sign-in may have inserted the row already
    let created = sqlx::query_as::<_, DbCustomer>(&format!(
        r#"
        INSERT INTO customers (auth_user_id, email, marketing_opt_in)
        VALUES ($1, $2, $3)
        ON CONFLICT (auth_user_id) DO UPDATE SET updated_at = NOW()
        RETURNING {CUSTOMER_COLUMNS}
        "#
    ))
    .bind(auth_user_id)
    .bind(email.trim())
    .bind(marketing_opt_in)
    .fetch_one(pool)
    .await?;

    info!(customer_id = %created.id, "Created customer profile");
    Ok(created)
}

pub async fn update_customer_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(&format!(
        r#"
        UPDATE customers
        SET full_name = $2, phone = $3, address_line1 = $4, address_line2 = $5,
            town = $6, postcode = $7, allergies = $8, marketing_opt_in = $9,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {CUSTOMER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&update.full_name)
    .bind(&update.phone)
    .bind(&update.address_line1)
    .bind(&update.address_line2)
    .bind(&update.town)
    .bind(&update.postcode)
    .bind(&update.allergies)
    .bind(update.marketing_opt_in)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

use bakeshop_core::models::slot_policy::{
    DEFAULT_MAX_ORDERS_PER_SLOT, DEFAULT_MAX_PREORDER_DAYS, DEFAULT_SAME_DAY_CUTOFF,
    DEFAULT_SLOT_LENGTH_MINUTES,
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Weekly opening hours, weekday 0 = Monday
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS opening_hours (
            weekday SMALLINT PRIMARY KEY,
            open_time TIME NULL,
            close_time TIME NULL,
            is_closed BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT valid_weekday CHECK (weekday BETWEEN 0 AND 6)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Slot rules (single row)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slot_rules (
            id SMALLINT PRIMARY KEY DEFAULT 1,
            slot_length_minutes INTEGER NULL,
            max_orders_per_slot INTEGER NULL,
            last_same_day_order_time TIME NULL,
            max_preorder_days INTEGER NULL,
            CONSTRAINT single_row CHECK (id = 1)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Prices are pence, excluding VAT
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            category_id BIGINT NULL REFERENCES categories(id),
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            image_url TEXT NULL,
            pricing_mode VARCHAR(16) NOT NULL DEFAULT 'auto',
            manual_price_ex_vat BIGINT NULL,
            recommended_price_ex_vat BIGINT NULL,
            base_price BIGINT NULL,
            apply_vat BOOLEAN NOT NULL DEFAULT TRUE,
            custom_vat_rate INTEGER NULL,
            allergens TEXT[] NOT NULL DEFAULT '{}',
            dietary_flags TEXT[] NOT NULL DEFAULT '{}',
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One row per storefront customer, linked to the identity provider on sign-in
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            auth_user_id UUID NULL UNIQUE,
            email VARCHAR(255) NOT NULL,
            full_name VARCHAR(255) NULL,
            phone VARCHAR(64) NULL,
            address_line1 VARCHAR(255) NULL,
            address_line2 VARCHAR(255) NULL,
            town VARCHAR(128) NULL,
            postcode VARCHAR(16) NULL,
            allergies TEXT[] NOT NULL DEFAULT '{}',
            marketing_opt_in BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            order_code VARCHAR(32) NOT NULL UNIQUE,
            customer_id UUID NULL REFERENCES customers(id),
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            order_type VARCHAR(16) NOT NULL,
            slot_start TIMESTAMP NOT NULL,
            slot_end TIMESTAMP NOT NULL,
            payment_method VARCHAR(16) NOT NULL,
            customer_email VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(64) NOT NULL,
            delivery_address TEXT NULL,
            notes TEXT NULL,
            subtotal_ex_vat BIGINT NOT NULL,
            vat_total BIGINT NOT NULL,
            total_inc_vat BIGINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_range CHECK (slot_end > slot_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            order_id UUID NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            product_id BIGINT NOT NULL,
            product_name VARCHAR(255) NOT NULL,
            qty INTEGER NOT NULL CHECK (qty > 0),
            unit_price_inc_vat BIGINT NOT NULL,
            line_total_inc_vat BIGINT NOT NULL,
            PRIMARY KEY (order_id, product_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Points are credited elsewhere; this service only reads balances
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS loyalty_accounts (
            customer_id UUID PRIMARY KEY REFERENCES customers(id),
            points_balance INTEGER NOT NULL DEFAULT 0,
            lifetime_points INTEGER NOT NULL DEFAULT 0,
            tier VARCHAR(64) NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_orders_slot_start ON orders(slot_start)",
        "CREATE INDEX IF NOT EXISTS idx_orders_customer_id ON orders(customer_id)",
        "CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id)",
        "CREATE INDEX IF NOT EXISTS idx_customers_email ON customers(LOWER(email))",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Fills in opening hours and slot rules that have not been configured yet.
///
/// Monday to Saturday open 08:00-16:00, Sunday closed, default slot rules.
/// Existing rows are left alone.
pub async fn seed_defaults(pool: &Pool<Postgres>) -> Result<()> {
    info!("Seeding default opening hours and slot rules...");

    sqlx::query(
        r#"
        INSERT INTO opening_hours (weekday, open_time, close_time, is_closed)
        SELECT day, TIME '08:00', TIME '16:00', day = 6
        FROM generate_series(0, 6) AS day
        ON CONFLICT (weekday) DO NOTHING
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO slot_rules (id, slot_length_minutes, max_orders_per_slot, last_same_day_order_time, max_preorder_days)
        VALUES (1, $1, $2, $3, $4)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(DEFAULT_SLOT_LENGTH_MINUTES)
    .bind(DEFAULT_MAX_ORDERS_PER_SLOT)
    .bind(DEFAULT_SAME_DAY_CUTOFF)
    .bind(DEFAULT_MAX_PREORDER_DAYS)
    .execute(pool)
    .await?;

    info!("Defaults seeded.");
    Ok(())
}

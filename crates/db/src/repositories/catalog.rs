use crate::models::{DbCategory, DbProduct};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_active_categories(pool: &Pool<Postgres>) -> Result<Vec<DbCategory>> {
    let categories = sqlx::query_as::<_, DbCategory>(
        r#"
        SELECT id, name, description
        FROM categories
        WHERE is_active
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Active products, optionally narrowed to a category and a case-insensitive
/// name search.
pub async fn get_active_products(
    pool: &Pool<Postgres>,
    category_id: Option<i64>,
    search: Option<&str>,
) -> Result<Vec<DbProduct>> {
    let pattern = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| format!("%{}%", escape_like(term)));

    tracing::debug!(?category_id, ?pattern, "Listing active products");

    let products = sqlx::query_as::<_, DbProduct>(
        r#"
        SELECT id, category_id, name, description, image_url, pricing_mode,
               manual_price_ex_vat, recommended_price_ex_vat, base_price,
               apply_vat, custom_vat_rate, allergens, dietary_flags
        FROM products
        WHERE is_active
          AND ($1::BIGINT IS NULL OR category_id = $1)
          AND ($2::TEXT IS NULL OR name ILIKE $2)
        ORDER BY name ASC
        "#,
    )
    .bind(category_id)
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn get_products_by_ids(pool: &Pool<Postgres>, ids: &[i64]) -> Result<Vec<DbProduct>> {
    let products = sqlx::query_as::<_, DbProduct>(
        r#"
        SELECT id, category_id, name, description, image_url, pricing_mode,
               manual_price_ex_vat, recommended_price_ex_vat, base_price,
               apply_vat, custom_vat_rate, allergens, dietary_flags
        FROM products
        WHERE is_active AND id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Escapes `%`, `_` and `\` so a search term matches literally inside ILIKE.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

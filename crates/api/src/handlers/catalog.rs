use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use bakeshop_core::{
    catalog::filter_by_allergies,
    errors::ShopError,
    models::product::{Category, Product, ProductResponse},
};
use bakeshop_db::repositories::{
    catalog::{get_active_categories, get_active_products},
    customer::get_customer_by_id,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<i64>,
    pub search: Option<String>,
    /// Comma-separated allergens to leave out, e.g. `gluten,nuts`
    pub allergies: Option<String>,
    /// Also leave out the allergens saved on this customer's profile
    pub customer_id: Option<Uuid>,
}

/// Combines the allergies saved on a profile with any given in the query.
pub fn merge_allergies(saved: Vec<String>, requested: Vec<String>) -> Vec<String> {
    let mut merged = saved;
    for allergy in requested {
        if !merged
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&allergy))
        {
            merged.push(allergy);
        }
    }
    merged
}

/// Splits a comma-separated allergy list, dropping blanks.
pub fn parse_allergies(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|allergy| !allergy.is_empty())
        .map(str::to_string)
        .collect()
}

#[axum::debug_handler]
pub async fn list_categories(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = get_active_categories(&state.db_pool)
        .await
        .map_err(ShopError::Database)?;

    Ok(Json(categories.into_iter().map(Category::from).collect()))
}

/// Lists active products with their display prices (ex VAT)
///
/// # Endpoint
///
/// ```text
/// GET /api/products?category_id=2&search=loaf&allergies=gluten,nuts
/// GET /api/products?customer_id=6f1c...
/// ```
///
/// # Errors
///
/// * `ShopError::NotFound` - `customer_id` names no customer
#[axum::debug_handler]
pub async fn list_products(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let rows = get_active_products(&state.db_pool, query.category_id, query.search.as_deref())
        .await
        .map_err(ShopError::Database)?;

    let products: Vec<Product> = rows.into_iter().map(Product::from).collect();
    let saved = match query.customer_id {
        Some(customer_id) => {
            get_customer_by_id(&state.db_pool, customer_id)
                .await
                .map_err(ShopError::Database)?
                .ok_or_else(|| {
                    ShopError::NotFound(format!("Customer {} not found", customer_id))
                })?
                .allergies
        }
        None => Vec::new(),
    };
    let allergies = merge_allergies(saved, parse_allergies(query.allergies.as_deref()));
    let products = filter_by_allergies(products, &allergies);

    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

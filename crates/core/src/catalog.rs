//! Catalog filtering and cart pricing.
//!
//! Prices are integer pence. Catalog prices exclude VAT; VAT is worked out per
//! cart line, rounded half up, and order records carry the inc-VAT amounts.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::product::Product;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub qty: u32,
    pub unit_price_ex_vat: i64,
    pub vat_rate_percent: i32,
    pub line_ex_vat: i64,
    pub line_vat: i64,
    pub line_inc_vat: i64,
}

impl CartLine {
    /// Unit price including VAT, rounded half up.
    pub fn unit_price_inc_vat(&self) -> i64 {
        self.unit_price_ex_vat + vat_amount(self.unit_price_ex_vat, self.vat_rate_percent)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub subtotal_ex_vat: i64,
    pub vat_total: i64,
    pub total_inc_vat: i64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// VAT on `amount` pence at `rate_percent`, rounded half up.
pub fn vat_amount(amount: i64, rate_percent: i32) -> i64 {
    let raw = amount * i64::from(rate_percent);
    if raw >= 0 {
        (raw + 50) / 100
    } else {
        (raw - 50) / 100
    }
}

/// Drops every product that lists one of the customer's allergies.
pub fn filter_by_allergies(products: Vec<Product>, allergies: &[String]) -> Vec<Product> {
    let avoid: HashSet<String> = allergies
        .iter()
        .map(|allergy| allergy.trim().to_lowercase())
        .filter(|allergy| !allergy.is_empty())
        .collect();
    if avoid.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|product| {
            !product
                .allergens
                .iter()
                .any(|allergen| avoid.contains(&allergen.trim().to_lowercase()))
        })
        .collect()
}

/// Prices a cart against the known products. Lines whose product is not
/// known are left out.
pub fn price_cart(cart: &BTreeMap<i64, u32>, products: &HashMap<i64, Product>) -> CartSummary {
    let mut summary = CartSummary::default();

    for (&product_id, &qty) in cart {
        let Some(product) = products.get(&product_id) else {
            continue;
        };
        let unit_price_ex_vat = product.display_price_ex_vat();
        let vat_rate_percent = product.vat_rate_percent();
        let line_ex_vat = unit_price_ex_vat * i64::from(qty);
        let line_vat = vat_amount(line_ex_vat, vat_rate_percent);

        summary.subtotal_ex_vat += line_ex_vat;
        summary.vat_total += line_vat;
        summary.lines.push(CartLine {
            product_id,
            name: product.name.clone(),
            qty,
            unit_price_ex_vat,
            vat_rate_percent,
            line_ex_vat,
            line_vat,
            line_inc_vat: line_ex_vat + line_vat,
        });
    }

    summary.total_inc_vat = summary.subtotal_ex_vat + summary.vat_total;
    summary
}

use serde::{Deserialize, Serialize};

/// Standard UK VAT rate applied when a product carries no custom rate.
pub const STANDARD_VAT_RATE_PERCENT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    #[default]
    Auto,
    Manual,
}

impl PricingMode {
    /// Unknown modes price like `auto`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "manual" => PricingMode::Manual,
            _ => PricingMode::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Auto => "auto",
            PricingMode::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A catalog product. All prices are in pence and exclude VAT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub pricing_mode: PricingMode,
    pub manual_price_ex_vat: Option<i64>,
    pub recommended_price_ex_vat: Option<i64>,
    pub base_price: Option<i64>,
    pub apply_vat: bool,
    pub custom_vat_rate: Option<i32>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dietary_flags: Vec<String>,
}

impl Product {
    /// The unit price shown to customers, before VAT.
    pub fn display_price_ex_vat(&self) -> i64 {
        if self.pricing_mode == PricingMode::Manual {
            if let Some(price) = self.manual_price_ex_vat {
                return price;
            }
        }
        self.recommended_price_ex_vat
            .or(self.base_price)
            .unwrap_or(0)
    }

    pub fn vat_rate_percent(&self) -> i32 {
        if !self.apply_vat {
            return 0;
        }
        self.custom_vat_rate.unwrap_or(STANDARD_VAT_RATE_PERCENT)
    }
}

/// Catalog entry as served to the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_ex_vat: i64,
    pub vat_rate_percent: i32,
    pub allergens: Vec<String>,
    pub dietary_flags: Vec<String>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            category_id: product.category_id,
            name: product.name.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            price_ex_vat: product.display_price_ex_vat(),
            vat_rate_percent: product.vat_rate_percent(),
            allergens: product.allergens.clone(),
            dietary_flags: product.dietary_flags.clone(),
        }
    }
}

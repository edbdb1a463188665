use std::collections::{BTreeMap, HashMap};

use bakeshop_core::{
    catalog::{filter_by_allergies, price_cart, vat_amount},
    models::product::{PricingMode, Product, ProductResponse},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn product(id: i64, name: &str, allergens: &[&str]) -> Product {
    Product {
        id,
        category_id: None,
        name: name.to_string(),
        description: None,
        image_url: None,
        pricing_mode: PricingMode::Auto,
        manual_price_ex_vat: None,
        recommended_price_ex_vat: Some(250),
        base_price: Some(200),
        apply_vat: true,
        custom_vat_rate: None,
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
        dietary_flags: Vec::new(),
    }
}

#[rstest]
#[case(PricingMode::Manual, Some(400), Some(250), Some(200), 400)]
#[case(PricingMode::Manual, None, Some(250), Some(200), 250)]
#[case(PricingMode::Auto, Some(400), Some(250), Some(200), 250)]
#[case(PricingMode::Auto, None, None, Some(200), 200)]
#[case(PricingMode::Auto, None, None, None, 0)]
fn test_display_price_ex_vat(
    #[case] mode: PricingMode,
    #[case] manual: Option<i64>,
    #[case] recommended: Option<i64>,
    #[case] base: Option<i64>,
    #[case] expected: i64,
) {
    let product = Product {
        pricing_mode: mode,
        manual_price_ex_vat: manual,
        recommended_price_ex_vat: recommended,
        base_price: base,
        ..product(1, "Sourdough", &[])
    };

    assert_eq!(product.display_price_ex_vat(), expected);
}

#[rstest]
#[case(true, None, 20)]
#[case(true, Some(5), 5)]
#[case(false, Some(5), 0)]
#[case(false, None, 0)]
fn test_vat_rate(#[case] apply_vat: bool, #[case] custom: Option<i32>, #[case] expected: i32) {
    let product = Product {
        apply_vat,
        custom_vat_rate: custom,
        ..product(1, "Brownie", &[])
    };

    assert_eq!(product.vat_rate_percent(), expected);
}

#[rstest]
#[case("manual", PricingMode::Manual)]
#[case(" Manual ", PricingMode::Manual)]
#[case("auto", PricingMode::Auto)]
#[case("something-else", PricingMode::Auto)]
fn test_pricing_mode_parse(#[case] raw: &str, #[case] expected: PricingMode) {
    assert_eq!(PricingMode::parse(raw), expected);
}

#[rstest]
#[case(250, 20, 50)]
#[case(125, 20, 25)]
#[case(333, 20, 67)]
#[case(102, 5, 5)]
#[case(1000, 0, 0)]
fn test_vat_amount_rounds_half_up(#[case] amount: i64, #[case] rate: i32, #[case] expected: i64) {
    assert_eq!(vat_amount(amount, rate), expected);
}

#[test]
fn test_filter_by_allergies_is_case_insensitive() {
    let products = vec![
        product(1, "Walnut loaf", &["Nuts", "gluten"]),
        product(2, "Meringue", &["eggs"]),
        product(3, "Fruit salad", &[]),
    ];
    let allergies = vec!["NUTS".to_string(), " dairy ".to_string()];

    let names: Vec<String> = filter_by_allergies(products, &allergies)
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(names, vec!["Meringue".to_string(), "Fruit salad".to_string()]);
}

#[test]
fn test_filter_without_allergies_keeps_everything() {
    let products = vec![product(1, "Walnut loaf", &["nuts"]), product(2, "Scone", &[])];

    assert_eq!(filter_by_allergies(products, &[]).len(), 2);
    assert_eq!(
        filter_by_allergies(vec![product(1, "Walnut loaf", &["nuts"])], &["  ".to_string()]).len(),
        1
    );
}

#[test]
fn test_price_cart() {
    let zero_rated = Product {
        apply_vat: false,
        recommended_price_ex_vat: Some(300),
        ..product(2, "Bloomer", &[])
    };
    let products = HashMap::from([(1, product(1, "Brownie", &[])), (2, zero_rated)]);
    let cart = BTreeMap::from([(1, 3), (2, 2), (99, 1)]);

    let summary = price_cart(&cart, &products);

    assert_eq!(summary.lines.len(), 2);
    assert_eq!(summary.lines[0].line_ex_vat, 750);
    assert_eq!(summary.lines[0].line_vat, 150);
    assert_eq!(summary.lines[0].line_inc_vat, 900);
    assert_eq!(summary.lines[0].unit_price_inc_vat(), 300);
    assert_eq!(summary.lines[1].line_vat, 0);
    assert_eq!(summary.subtotal_ex_vat, 1350);
    assert_eq!(summary.vat_total, 150);
    assert_eq!(summary.total_inc_vat, 1500);
}

#[test]
fn test_price_empty_cart() {
    let summary = price_cart(&BTreeMap::new(), &HashMap::new());

    assert!(summary.is_empty());
    assert_eq!(summary.total_inc_vat, 0);
}

#[test]
fn test_product_response_uses_display_price() {
    let product = Product {
        pricing_mode: PricingMode::Manual,
        manual_price_ex_vat: Some(475),
        ..product(4, "Celebration cake", &["eggs", "dairy"])
    };

    let response = ProductResponse::from(&product);

    assert_eq!(response.price_ex_vat, 475);
    assert_eq!(response.vat_rate_percent, 20);
    assert_eq!(response.allergens, vec!["eggs".to_string(), "dairy".to_string()]);
}

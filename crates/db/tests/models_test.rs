use bakeshop_core::models::{
    customer::CustomerProfile,
    opening_hours::OpeningHoursRule,
    product::{PricingMode, Product},
    slot_policy::{DEFAULT_MAX_ORDERS_PER_SLOT, DEFAULT_MAX_PREORDER_DAYS, SlotPolicy},
};
use bakeshop_db::{
    config_source::rules_from_rows,
    models::{DbCustomer, DbOpeningHours, DbProduct, DbSlotRule},
    repositories::{catalog::escape_like, order::day_key},
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn row(weekday: i16, open: Option<NaiveTime>, close: Option<NaiveTime>, closed: bool) -> DbOpeningHours {
    DbOpeningHours {
        weekday,
        open_time: open,
        close_time: close,
        is_closed: closed,
    }
}

#[rstest]
#[case(0, Weekday::Mon)]
#[case(3, Weekday::Thu)]
#[case(6, Weekday::Sun)]
fn test_opening_hours_weekday_mapping(#[case] stored: i16, #[case] expected: Weekday) {
    let rule = row(stored, Some(time(8, 0)), Some(time(16, 0)), false)
        .into_rule()
        .unwrap();

    assert_eq!(rule, OpeningHoursRule::open(expected, time(8, 0), time(16, 0)));
}

#[rstest]
#[case(-1)]
#[case(7)]
#[case(42)]
fn test_opening_hours_out_of_range_weekday(#[case] stored: i16) {
    assert!(row(stored, Some(time(8, 0)), Some(time(16, 0)), false).into_rule().is_none());
}

#[test]
fn test_closed_day_ignores_missing_times() {
    let rule = row(6, None, None, true).into_rule().unwrap();

    assert_eq!(rule, OpeningHoursRule::closed(Weekday::Sun));
    assert!(!rule.is_trading());
}

#[rstest]
#[case(None, Some(time(16, 0)))]
#[case(Some(time(8, 0)), None)]
#[case(None, None)]
fn test_open_day_without_times_is_skipped(
    #[case] open: Option<NaiveTime>,
    #[case] close: Option<NaiveTime>,
) {
    assert!(row(1, open, close, false).into_rule().is_none());
}

#[test]
fn test_rules_from_rows_keeps_valid_rows() {
    let rules = rules_from_rows(vec![
        row(0, Some(time(8, 0)), Some(time(16, 0)), false),
        row(9, Some(time(8, 0)), Some(time(16, 0)), false),
        row(2, None, None, false),
        row(6, None, None, true),
    ]);

    assert_eq!(
        rules,
        vec![
            OpeningHoursRule::open(Weekday::Mon, time(8, 0), time(16, 0)),
            OpeningHoursRule::closed(Weekday::Sun),
        ]
    );
}

#[test]
fn test_slot_rule_fills_missing_values() {
    let policy = SlotPolicy::from(DbSlotRule {
        slot_length_minutes: Some(30),
        max_orders_per_slot: None,
        last_same_day_order_time: None,
        max_preorder_days: None,
    });

    assert_eq!(policy.slot_length_minutes, 30);
    assert_eq!(policy.max_orders_per_slot, DEFAULT_MAX_ORDERS_PER_SLOT);
    assert_eq!(policy.max_preorder_days, DEFAULT_MAX_PREORDER_DAYS);
    assert_eq!(policy.same_day_cutoff(), SlotPolicy::default().same_day_cutoff());
}

#[test]
fn test_slot_rule_keeps_non_positive_values() {
    let policy = SlotPolicy::from(DbSlotRule {
        slot_length_minutes: Some(0),
        max_orders_per_slot: Some(-1),
        last_same_day_order_time: Some(time(12, 0)),
        max_preorder_days: Some(3),
    });

    assert!(!policy.is_usable());
    assert_eq!(policy.same_day_cutoff(), time(12, 0));
}

#[test]
fn test_product_row_conversion() {
    let product = Product::from(DbProduct {
        id: 7,
        category_id: Some(2),
        name: "Sourdough loaf".to_string(),
        description: None,
        image_url: None,
        pricing_mode: "manual".to_string(),
        manual_price_ex_vat: Some(450),
        recommended_price_ex_vat: Some(400),
        base_price: Some(380),
        apply_vat: false,
        custom_vat_rate: None,
        allergens: vec!["gluten".to_string()],
        dietary_flags: vec!["vegan".to_string()],
    });

    assert_eq!(product.pricing_mode, PricingMode::Manual);
    assert_eq!(product.allergens, vec!["gluten".to_string()]);
    assert_eq!(product.name, "Sourdough loaf");
}

#[rstest]
#[case("croissant", "croissant")]
#[case("50%", "50\\%")]
#[case("pain_au", "pain\\_au")]
#[case("a\\b", "a\\\\b")]
fn test_escape_like(#[case] term: &str, #[case] expected: &str) {
    assert_eq!(escape_like(term), expected);
}

#[rstest]
#[case(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 20250101)]
#[case(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), 20241231)]
#[case(NaiveDate::from_ymd_opt(2025, 10, 9).unwrap(), 20251009)]
fn test_day_key(#[case] date: NaiveDate, #[case] expected: i32) {
    assert_eq!(day_key(date), expected);
}

#[test]
fn test_customer_row_to_profile() {
    let id = uuid::Uuid::new_v4();
    let created_at = chrono::Utc::now();
    let row = DbCustomer {
        id,
        auth_user_id: None,
        email: "ada@example.com".to_string(),
        full_name: Some("Ada Baker".to_string()),
        phone: None,
        address_line1: Some("1 Mill Lane".to_string()),
        address_line2: None,
        town: None,
        postcode: Some("OX33 1AB".to_string()),
        allergies: vec!["gluten".to_string(), "eggs".to_string()],
        marketing_opt_in: true,
        created_at,
    };

    let profile = CustomerProfile::from(row);

    assert_eq!(profile.id, id);
    assert_eq!(profile.allergies, vec!["gluten", "eggs"]);
    assert!(profile.marketing_opt_in);
    assert_eq!(profile.missing_fields(), vec!["phone"]);
}

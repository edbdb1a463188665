use bakeshop_core::session::{AuthTokens, SessionContext};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_new_session_is_empty() {
    let session = SessionContext::new();

    assert!(session.is_cart_empty());
    assert!(!session.is_signed_in());
    assert_eq!(session.item_count(), 0);
    assert_eq!(session.last_order_code(), None);
}

#[test]
fn test_adding_items_accumulates() {
    let session = SessionContext::new()
        .with_item_added(7, 1)
        .with_item_added(7, 2)
        .with_item_added(3, 1);

    assert_eq!(session.cart().get(&7), Some(&3));
    assert_eq!(session.cart().get(&3), Some(&1));
    assert_eq!(session.item_count(), 4);
}

#[rstest]
#[case(-1, Some(1))]
#[case(-2, None)]
#[case(-5, None)]
#[case(1, Some(3))]
fn test_adding_negative_quantities(#[case] delta: i64, #[case] expected: Option<u32>) {
    let session = SessionContext::new().with_item_added(9, 2).with_item_added(9, delta);

    assert_eq!(session.cart().get(&9).copied(), expected);
}

#[rstest]
#[case(0)]
#[case(-3)]
fn test_setting_non_positive_quantity_removes_line(#[case] qty: i64) {
    let session = SessionContext::new()
        .with_item_added(1, 4)
        .with_quantity(1, qty);

    assert!(session.is_cart_empty());
}

#[test]
fn test_setting_quantity_replaces_line() {
    let session = SessionContext::new().with_item_added(1, 4).with_quantity(1, 2);

    assert_eq!(session.cart().get(&1), Some(&2));
}

#[test]
fn test_previous_context_is_untouched() {
    let before = SessionContext::new().with_item_added(1, 1);
    let after = before.clone().with_item_added(2, 1);

    assert_eq!(before.cart().len(), 1);
    assert_eq!(after.cart().len(), 2);
}

#[test]
fn test_sign_in_and_out() {
    let session = SessionContext::new().signed_in(AuthTokens::new("access", "refresh"));
    assert!(session.is_signed_in());
    assert_eq!(
        session.auth().map(|tokens| tokens.access_token.as_str()),
        Some("access")
    );

    let session = session.signed_out();
    assert!(!session.is_signed_in());
}

#[rstest]
#[case("", "refresh")]
#[case("access", "")]
#[case("  ", "  ")]
fn test_incomplete_tokens_are_not_stored(#[case] access: &str, #[case] refresh: &str) {
    let session = SessionContext::new()
        .signed_in(AuthTokens::new("old-access", "old-refresh"))
        .signed_in(AuthTokens::new(access, refresh));

    assert!(!session.is_signed_in());
}

#[test]
fn test_sign_out_keeps_cart() {
    let session = SessionContext::new()
        .signed_in(AuthTokens::new("access", "refresh"))
        .with_item_added(5, 2)
        .signed_out();

    assert_eq!(session.item_count(), 2);
}

#[test]
fn test_last_order_clears_cart() {
    let session = SessionContext::new()
        .with_item_added(5, 2)
        .with_last_order("WB-20250102-001");

    assert!(session.is_cart_empty());
    assert_eq!(session.last_order_code(), Some("WB-20250102-001"));
}

#[test]
fn test_cart_cleared() {
    let session = SessionContext::new()
        .with_item_added(1, 1)
        .with_item_added(2, 1)
        .with_cart_cleared();

    assert!(session.is_cart_empty());
}

#[test]
fn test_session_serialization() {
    let session = SessionContext::new()
        .with_item_added(11, 2)
        .signed_in(AuthTokens::new("access", "refresh"));

    let json = serde_json::to_string(&session).expect("Failed to serialize session");
    let deserialized: SessionContext =
        serde_json::from_str(&json).expect("Failed to deserialize session");

    assert_eq!(deserialized, session);
}

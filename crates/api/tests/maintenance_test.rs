use bakeshop_api::middleware::maintenance::{MaintenanceConfig, hash_pin, verify_pin};

#[test]
fn test_hash_and_verify_pin() {
    let hash = hash_pin("4821").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(verify_pin("4821", &hash));
    assert!(!verify_pin("4822", &hash));
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_pin("4821").unwrap();
    let second = hash_pin("4821").unwrap();

    assert_ne!(first, second);
    assert!(verify_pin("4821", &second));
}

#[test]
fn test_malformed_hash_never_matches() {
    assert!(!verify_pin("4821", "not-a-phc-string"));
    assert!(!verify_pin("", ""));
}

#[test]
fn test_config_without_hash_allows_nobody() {
    let config = MaintenanceConfig {
        enabled: true,
        pin_hash: None,
        contact_email: "orders@bakeshop.local".to_string(),
    };

    assert!(!config.allows(Some("4821")));
    assert!(!config.allows(None));
}

#[test]
fn test_config_with_hash_needs_the_pin() {
    let config = MaintenanceConfig {
        enabled: true,
        pin_hash: Some(hash_pin("4821").unwrap()),
        contact_email: "orders@bakeshop.local".to_string(),
    };

    assert!(config.allows(Some("4821")));
    assert!(config.allows(Some(" 4821 ")));
    assert!(!config.allows(Some("0000")));
    assert!(!config.allows(None));
}

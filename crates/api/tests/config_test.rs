use bakeshop_api::{
    config::{ApiConfig, DEFAULT_TIMEZONE, parse_flag, parse_log_level, parse_timezone},
    middleware::maintenance::MaintenanceConfig,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case(" warn ", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("info", Level::INFO)]
#[case("verbose", Level::INFO)]
#[case("", Level::INFO)]
fn test_parse_log_level(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}

#[rstest]
#[case("1", true)]
#[case("true", true)]
#[case("TRUE", true)]
#[case("yes", true)]
#[case("on", true)]
#[case("0", false)]
#[case("false", false)]
#[case("off", false)]
#[case("", false)]
fn test_parse_flag(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(parse_flag(value), expected);
}

#[test]
fn test_parse_default_timezone() {
    let tz = parse_timezone(DEFAULT_TIMEZONE).unwrap();

    assert_eq!(tz, chrono_tz::Europe::London);
}

#[test]
fn test_parse_timezone_trims_whitespace() {
    assert_eq!(parse_timezone(" America/New_York ").unwrap(), chrono_tz::America::New_York);
}

#[test]
fn test_parse_unknown_timezone() {
    let err = parse_timezone("Europe/Atlantis").unwrap_err();

    assert!(err.to_string().contains("Europe/Atlantis"));
}

#[test]
fn test_server_addr() {
    let config = ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        database_url: "postgres://localhost/bakeshop".to_string(),
        log_level: Level::INFO,
        cors_origins: None,
        request_timeout: 30,
        timezone: chrono_tz::Europe::London,
        maintenance: MaintenanceConfig::default(),
    };

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
}

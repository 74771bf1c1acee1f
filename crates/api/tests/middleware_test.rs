use axum::http::StatusCode;
use kairo_api::config::{parse_log_level, ApiConfig, Environment};
use kairo_api::middleware::error_handling::{map_error, AppError};
use kairo_core::errors::KairoError;
use rstest::rstest;
use std::collections::HashMap;
use std::time::Duration;
use tracing::Level;

#[rstest]
#[case(KairoError::NotFound("Student not found".to_string()), StatusCode::NOT_FOUND)]
#[case(KairoError::Validation("Unknown view".to_string()), StatusCode::BAD_REQUEST)]
#[case(KairoError::MalformedResponse("bad body".to_string()), StatusCode::BAD_GATEWAY)]
#[case(KairoError::Unreachable("refused".to_string()), StatusCode::BAD_GATEWAY)]
#[case(
    KairoError::Upstream { status: 501, message: "not implemented".to_string() },
    StatusCode::NOT_IMPLEMENTED
)]
#[case(
    KairoError::Upstream { status: 42, message: "nonsense".to_string() },
    StatusCode::BAD_GATEWAY
)]
#[case(
    KairoError::Internal(eyre::eyre!("listener closed")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: KairoError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message_and_kind() {
    let response = map_error(KairoError::NotFound("Student not found".to_string()));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Resource not found: Student not found",
            "kind": "not_found",
        })
    );
}

#[test]
fn test_eyre_report_becomes_internal() {
    let error: AppError = eyre::eyre!("boom").into();
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
#[case("development", Environment::Development, "http://localhost:8000")]
#[case("dev", Environment::Development, "http://localhost:8000")]
#[case("Production", Environment::Production, "http://backend:8000")]
fn test_environment_backend_defaults(
    #[case] raw: &str,
    #[case] expected: Environment,
    #[case] backend: &str,
) {
    let environment: Environment = raw.parse().unwrap();
    assert_eq!(environment, expected);
    assert_eq!(environment.default_backend_url(), backend);
}

#[test]
fn test_unknown_environment_is_rejected() {
    assert!("staging".parse::<Environment>().is_err());
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("warn", Level::WARN)]
#[case("verbose", Level::INFO)]
fn test_log_level_parsing(#[case] raw: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(raw), expected);
}

#[test]
fn test_server_addr() {
    let config = ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        environment: Environment::Development,
        backend_url: "http://localhost:8000".to_string(),
        log_level: Level::INFO,
        cors_origins: None,
        request_timeout: 30,
    };

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
}

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.backend_url, "http://localhost:8000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}

#[test]
fn test_config_reads_every_setting() {
    let config = ApiConfig::from_lookup(lookup_from(&[
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("KAIRO_ENV", "production"),
        ("LOG_LEVEL", "debug"),
        ("API_CORS_ORIGINS", "http://a.test, http://b.test"),
        ("API_REQUEST_TIMEOUT_SECONDS", "12"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.backend_url, "http://backend:8000");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(config.request_timeout(), Duration::from_secs(12));
}

#[rstest]
#[case("API_PORT", "eighty")]
#[case("KAIRO_ENV", "staging")]
#[case("API_REQUEST_TIMEOUT_SECONDS", "forever")]
#[case("API_REQUEST_TIMEOUT_SECONDS", "0")]
fn test_config_rejects_bad_values(#[case] key: &str, #[case] value: &str) {
    let error = ApiConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();

    assert!(format!("{:#}", error).contains(key), "{:#}", error);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(30)]
fn test_backend_timeout_stays_below_request_timeout(#[case] seconds: u64) {
    let raw = seconds.to_string();
    let config =
        ApiConfig::from_lookup(lookup_from(&[("API_REQUEST_TIMEOUT_SECONDS", raw.as_str())]))
            .unwrap();

    assert!(config.backend_timeout() < config.request_timeout());
    assert!(config.backend_timeout() > Duration::ZERO);
}

//! Table-driven tests for configuration loading and validation.

use std::io::Write;

use veeam_dashboard::config::{load_config, load_config_from_str};
use veeam_dashboard::ConfigError;

/// Represents a single config loading test case.
struct ConfigTestCase {
    name: &'static str,
    config_json: &'static str,
    should_succeed: bool,
    /// Expected error substring (if should_succeed is false).
    expected_error: Option<&'static str>,
}

const CONFIG_TESTS: &[ConfigTestCase] = &[
    ConfigTestCase {
        name: "valid_minimal",
        config_json: r#"{"version": "1.0", "api_base_url": "http://localhost:5000"}"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "valid_full",
        config_json: r#"{
            "version": "1.0",
            "api_base_url": "https://reports.example.com",
            "poll_interval_secs": 300,
            "classification": { "retry_heuristic": true },
            "http": { "connect_timeout_secs": 5, "request_timeout_secs": 15, "max_concurrent_requests": 2 }
        }"#,
        should_succeed: true,
        expected_error: None,
    },
    ConfigTestCase {
        name: "unsupported_version",
        config_json: r#"{"version": "2.0", "api_base_url": "http://localhost:5000"}"#,
        should_succeed: false,
        expected_error: Some("Unsupported config version"),
    },
    ConfigTestCase {
        name: "url_without_scheme",
        config_json: r#"{"version": "1.0", "api_base_url": "localhost:5000"}"#,
        should_succeed: false,
        expected_error: Some("api_base_url"),
    },
    ConfigTestCase {
        name: "zero_poll_interval",
        config_json: r#"{"version": "1.0", "api_base_url": "http://h", "poll_interval_secs": 0}"#,
        should_succeed: false,
        expected_error: Some("poll_interval_secs"),
    },
    ConfigTestCase {
        name: "zero_timeout",
        config_json: r#"{
            "version": "1.0",
            "api_base_url": "http://h",
            "http": { "connect_timeout_secs": 0 }
        }"#,
        should_succeed: false,
        expected_error: Some("timeouts"),
    },
    ConfigTestCase {
        name: "zero_concurrency",
        config_json: r#"{
            "version": "1.0",
            "api_base_url": "http://h",
            "http": { "max_concurrent_requests": 0 }
        }"#,
        should_succeed: false,
        expected_error: Some("max_concurrent_requests"),
    },
    ConfigTestCase {
        name: "missing_base_url",
        config_json: r#"{"version": "1.0"}"#,
        should_succeed: false,
        expected_error: Some("api_base_url"),
    },
    ConfigTestCase {
        name: "invalid_json",
        config_json: r#"{"version": "1.0", "#,
        should_succeed: false,
        expected_error: None,
    },
];

#[test]
fn test_config_loading() {
    for case in CONFIG_TESTS {
        let result = load_config_from_str(case.config_json);

        if case.should_succeed {
            assert!(
                result.is_ok(),
                "Test '{}': expected success, got {:?}",
                case.name,
                result.err()
            );
            continue;
        }

        let err = match result {
            Ok(_) => panic!("Test '{}': expected failure", case.name),
            Err(e) => e.to_string(),
        };
        if let Some(expected) = case.expected_error {
            assert!(
                err.contains(expected),
                "Test '{}': expected error containing '{}', got '{}'",
                case.name,
                expected,
                err
            );
        }
    }
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"version": "1.0", "api_base_url": "http://backup-api:5000/", "poll_interval_secs": 30}}"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.poll_interval_secs, 30);
    assert_eq!(config.api_base_url, "http://backup-api:5000/");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

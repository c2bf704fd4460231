use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::config::parser::{load_config, ConfigError};
use crate::status::ItemStatus;

// Helper function to create a temporary file with content
fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[test]
fn test_valid_configuration() {
    let config_yaml = r#"
    services:
      - name: aws-us-east
        provider: aws
        customer: acme
        url: https://status.aws.amazon.com/rss/ec2-us-east-1.rss
        interval: 120
        timeout: 45
      - name: azure
        provider: azure
        url: https://azure.status.microsoft/en-us/status/feed/
        enabled: false
    fetch:
      max_attempts: 5
      initial_backoff_ms: 250
    "#;

    let temp_file = create_temp_file(config_yaml);
    let config = load_config(temp_file.path()).expect("Failed to load valid config");

    assert_eq!(config.services.len(), 2);

    let aws = &config.services[0];
    assert_eq!(aws.name, "aws-us-east");
    assert_eq!(aws.provider, "aws");
    assert_eq!(aws.customer, "acme");
    assert_eq!(aws.poll_interval(), Duration::from_secs(120));
    assert_eq!(aws.cycle_timeout(), Duration::from_secs(45));
    assert!(aws.enabled);

    assert!(!config.services[1].enabled);

    assert_eq!(config.fetch.max_attempts, 5);
    assert_eq!(config.fetch.initial_backoff_ms, 250);
    assert_eq!(config.fetch.request_timeout_secs, 10);
}

#[test]
fn test_interval_defaults_when_unset_or_non_positive() {
    let config_yaml = r#"
    services:
      - name: unset
        url: https://example.com/a.rss
      - name: zero
        url: https://example.com/b.rss
        interval: 0
      - name: negative
        url: https://example.com/c.rss
        interval: -30
        timeout: -1
    "#;

    let temp_file = create_temp_file(config_yaml);
    let config = load_config(temp_file.path()).unwrap();

    for service in &config.services {
        assert_eq!(service.poll_interval(), Duration::from_secs(300));
        assert_eq!(service.cycle_timeout(), Duration::from_secs(60));
    }
}

#[test]
fn test_default_status_markers() {
    let temp_file = create_temp_file("services: []");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(
        config.status_markers.precedence,
        vec![
            ItemStatus::Resolved,
            ItemStatus::Outage,
            ItemStatus::ServiceIssue
        ]
    );
    assert_eq!(config.status_markers.resolved, vec!["resolved".to_string()]);
    assert!(config
        .status_markers
        .service_issue
        .contains(&"elevated error".to_string()));
}

#[test]
fn test_custom_status_markers() {
    let config_yaml = r#"
    services: []
    status_markers:
      precedence: [outage, resolved, service_issue]
      outage: ["major outage", "unavailable"]
    "#;

    let temp_file = create_temp_file(config_yaml);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.status_markers.precedence[0], ItemStatus::Outage);
    assert_eq!(config.status_markers.outage.len(), 2);
    // unspecified lists keep their defaults
    assert_eq!(config.status_markers.resolved, vec!["resolved".to_string()]);
}

#[test]
fn test_precedence_must_list_each_status_once() {
    let config_yaml = r#"
    services: []
    status_markers:
      precedence: [outage, outage, resolved]
    "#;

    let temp_file = create_temp_file(config_yaml);
    let result = load_config(temp_file.path());

    assert!(matches!(result, Err(ConfigError::Other(msg)) if msg.contains("Outage")));
}

#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/rss_exporter/config.yml");
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}

#[test]
fn test_invalid_yaml() {
    let temp_file = create_temp_file("services: [name: {");
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_missing_url_is_parse_error() {
    let config_yaml = r#"
    services:
      - name: aws
    "#;

    let temp_file = create_temp_file(config_yaml);
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_invalid_url() {
    let config_yaml = r#"
    services:
      - name: aws
        url: not a url
    "#;

    let temp_file = create_temp_file(config_yaml);
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_non_http_url_rejected() {
    let config_yaml = r#"
    services:
      - name: local
        url: file:///etc/passwd
    "#;

    let temp_file = create_temp_file(config_yaml);
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_empty_name() {
    let config_yaml = r#"
    services:
      - name: ""
        url: https://example.com/feed.rss
    "#;

    let temp_file = create_temp_file(config_yaml);
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_duplicate_metric_prefix() {
    let config_yaml = r#"
    services:
      - name: aws-test
        url: https://example.com/a.rss
      - name: aws_test
        url: https://example.com/b.rss
    "#;

    let temp_file = create_temp_file(config_yaml);
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(ConfigError::Other(msg)) if msg.contains("aws_test")));
}

#[test]
fn test_invalid_fetch_attempts() {
    let config_yaml = r#"
    services: []
    fetch:
      max_attempts: 0
    "#;

    let temp_file = create_temp_file(config_yaml);
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use validator::Validate;

use super::models::ExporterConfig;
use crate::metrics::metric_prefix;
use crate::status::ItemStatus;

/// Errors that can occur during configuration parsing
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Other(String),
}

/// Loads and validates the exporter configuration
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ExporterConfig, ConfigError> {
    let mut file = File::open(&config_path).map_err(ConfigError::FileError)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(ConfigError::FileError)?;

    parse_config(&content)
}

/// Parses and validates configuration from YAML text
pub fn parse_config(content: &str) -> Result<ExporterConfig, ConfigError> {
    let config: ExporterConfig = serde_yaml::from_str(content).map_err(ConfigError::ParseError)?;

    config.validate().map_err(ConfigError::ValidationError)?;

    // Two services must not render to the same metric names
    let mut prefixes: HashMap<String, &str> = HashMap::new();
    for service in &config.services {
        let prefix = metric_prefix(&service.name);
        if let Some(existing) = prefixes.insert(prefix.clone(), &service.name) {
            return Err(ConfigError::Other(format!(
                "Services '{}' and '{}' both map to metric prefix '{}'",
                existing, service.name, prefix
            )));
        }
    }

    let precedence = &config.status_markers.precedence;
    for status in ItemStatus::ALL {
        let count = precedence.iter().filter(|s| **s == status).count();
        if count != 1 {
            return Err(ConfigError::Other(format!(
                "status_markers.precedence must list {:?} exactly once (found {})",
                status, count
            )));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let config_str = r#"
            services:
              - name: aws
                provider: aws
                customer: acme
                url: https://status.aws.amazon.com/rss/all.rss
                interval: 60
              - name: openai
                url: https://status.openai.com/history.atom
        "#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[0].name, "aws");
        assert_eq!(config.services[1].provider, "");
        assert!(config.services[1].enabled);
    }

    #[test]
    fn test_empty_document_has_no_services() {
        let config = parse_config("services: []").unwrap();
        assert!(config.services.is_empty());
        assert_eq!(config.fetch.max_attempts, 3);
    }
}

//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::OrchestratorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<OrchestratorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: OrchestratorConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(
            r#"
            era = "alonzo-era"

            [network]
            kind = "testnet"
            magic = 1097911063

            [paths]
            tx_base_path = "/tmp/tx"
            key_base_path = "/tmp/keys"

            [cli]
            executable = "/usr/local/bin/cardano-cli"
            timeout_secs = 30
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.network.magic, Some(1097911063));
        assert_eq!(config.cli.timeout_secs, 30);
        assert_eq!(config.cli.amount_unit, "lovelace");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/facade.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[network\nkind = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let file = write_config(
            r#"
            [network]
            kind = "testnet"

            [cli]
            timeout_secs = 0
            "#,
        );

        let err = load_config(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("network.magic"));
        assert!(message.contains("cli.timeout_secs"));
    }
}

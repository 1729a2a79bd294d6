//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the network invariant: magic only, and always, on testnet
//! - Validate value ranges (timeout > 0, non-empty executable and unit)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: OrchestratorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::blockchain::types::NetworkTarget;
use crate::config::schema::{NetworkConfig, NetworkKind, OrchestratorConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl NetworkConfig {
    /// Resolve the file form (`kind` + optional `magic`) into a [`NetworkTarget`].
    pub fn target(&self) -> Result<NetworkTarget, ValidationError> {
        match (self.kind, self.magic) {
            (NetworkKind::Testnet, Some(0)) => Err(ValidationError::new(
                "network.magic",
                "testnet magic must be non-zero",
            )),
            (NetworkKind::Testnet, Some(magic)) => Ok(NetworkTarget::Testnet { magic }),
            (NetworkKind::Testnet, None) => Err(ValidationError::new(
                "network.magic",
                "testnet requires a magic number",
            )),
            (NetworkKind::Mainnet, None) => Ok(NetworkTarget::Mainnet),
            (NetworkKind::Mainnet, Some(_)) => Err(ValidationError::new(
                "network.magic",
                "magic number is only valid for testnet",
            )),
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &OrchestratorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.network.target() {
        errors.push(e);
    }

    if config.cli.executable.trim().is_empty() {
        errors.push(ValidationError::new("cli.executable", "must not be empty"));
    }
    if config.cli.timeout_secs == 0 {
        errors.push(ValidationError::new("cli.timeout_secs", "must be greater than zero"));
    }
    let unit = &config.cli.amount_unit;
    if unit.is_empty() || unit.chars().any(char::is_whitespace) {
        errors.push(ValidationError::new(
            "cli.amount_unit",
            "must be a single non-empty word",
        ));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("must be one of {}", LOG_LEVELS.join(", ")),
        ));
    }

    if config.paths.tx_base_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("paths.tx_base_path", "must not be empty"));
    }
    if config.paths.key_base_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("paths.key_base_path", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

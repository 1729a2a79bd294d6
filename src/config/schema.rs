//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! orchestrator. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::blockchain::types::Era;

/// Root configuration for the transaction orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Target network (mainnet or a testnet identified by its magic).
    pub network: NetworkConfig,

    /// Protocol era passed through to `transaction build`.
    pub era: Era,

    /// Directories for transaction files and signing keys.
    pub paths: PathsConfig,

    /// External executable settings.
    pub cli: CliConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network kind as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Testnet,
    #[default]
    Mainnet,
}

/// Network selection.
///
/// `magic` is required for `testnet` and rejected for `mainnet`; see
/// [`NetworkConfig::target`].
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network kind.
    pub kind: NetworkKind,

    /// Testnet magic number.
    pub magic: Option<u32>,
}

/// Filesystem locations shared with the external tool.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `unsigned_<id>.tx` and `signed_<id>.tx`.
    pub tx_base_path: PathBuf,

    /// Directory holding signing key files.
    pub key_base_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            tx_base_path: PathBuf::from("./bin"),
            key_base_path: PathBuf::from("./keys"),
        }
    }
}

/// External executable configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Executable name or path. Bare names are resolved via `PATH`.
    pub executable: String,

    /// Upper bound on a single invocation in seconds.
    pub timeout_secs: u64,

    /// Unit appended to `--tx-out` amounts.
    pub amount_unit: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            executable: "cardano-cli".to_string(),
            timeout_secs: 120,
            amount_unit: "lovelace".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

//! Network, era, and UTXO types plus error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::blockchain::artifact::{ArtifactStage, TransactionArtifact};

/// Network the external tool is pointed at.
///
/// A magic number only exists on testnets, so it lives inside that variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkTarget {
    Testnet { magic: u32 },
    Mainnet,
}

impl NetworkTarget {
    /// The network selector flag accepted by every subcommand.
    pub fn flag(&self) -> String {
        match self {
            Self::Testnet { magic } => format!("--testnet-magic={}", magic),
            Self::Mainnet => "--mainnet".to_string(),
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet { .. })
    }
}

impl fmt::Display for NetworkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Testnet { magic } => write!(f, "testnet({})", magic),
            Self::Mainnet => f.write_str("mainnet"),
        }
    }
}

/// Protocol era, passed through unchanged to `transaction build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum Era {
    #[serde(rename = "shelley-era")]
    Shelley,
    #[serde(rename = "allegra-era")]
    Allegra,
    #[serde(rename = "mary-era")]
    Mary,
    #[default]
    #[serde(rename = "alonzo-era")]
    Alonzo,
    #[serde(rename = "babbage-era")]
    Babbage,
    #[serde(rename = "conway-era")]
    Conway,
}

impl Era {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shelley => "shelley-era",
            Self::Allegra => "allegra-era",
            Self::Mary => "mary-era",
            Self::Alonzo => "alonzo-era",
            Self::Babbage => "babbage-era",
            Self::Conway => "conway-era",
        }
    }

    /// The era flag, e.g. `--alonzo-era`.
    pub fn flag(&self) -> String {
        format!("--{}", self.as_str())
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `query utxo` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    /// Hash of the transaction that created this output.
    pub tx_hash: String,
    /// Index into that transaction's outputs, kept as the tool printed it.
    pub output_index: String,
    /// Amount in the smallest currency unit.
    pub amount: u64,
}

impl UnspentOutput {
    /// Input reference in `<hash>#<index>` form, as `--tx-in` expects.
    pub fn input_ref(&self) -> String {
        format!("{}#{}", self.tx_hash, self.output_index)
    }
}

/// Outcome of a full query → build → sign → submit run.
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    /// The submitted (signed) artifact.
    pub artifact: TransactionArtifact,
    /// Inputs spent by the transaction.
    pub inputs: Vec<UnspentOutput>,
    /// Sum of the input amounts.
    pub total_input: u64,
}

/// Errors that can occur while driving the external tool.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The tool exited non-zero. `stderr` is passed through untouched.
    #[error("{subcommand} failed ({}): {stderr}", exit_label(.status))]
    ExternalTool {
        subcommand: &'static str,
        status: Option<i32>,
        stderr: String,
    },

    /// The executable could not be started or its output collected.
    #[error("Failed to run '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// The tool did not finish within the configured limit.
    #[error("{subcommand} timed out after {secs} seconds")]
    Timeout { subcommand: &'static str, secs: u64 },

    /// Query output did not have the expected tabular shape.
    #[error("Malformed UTXO output at line {line}: {reason}")]
    DataFormat { line: usize, reason: String },

    /// A call was made without what it needs.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// An artifact was handed to the wrong step of the pipeline.
    #[error("Artifact is {actual}, expected {expected}")]
    StageMismatch {
        expected: ArtifactStage,
        actual: ArtifactStage,
    },

    /// An argument would not form a safe command token.
    #[error("Invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Configuration rejected at construction.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl OrchestratorError {
    /// Raw diagnostic text from the external tool, if this error came from it.
    pub fn tool_stderr(&self) -> Option<&str> {
        match self {
            Self::ExternalTool { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Result type for orchestrator operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

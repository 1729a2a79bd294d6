//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! OrchestratorConfig (network, era, paths, executable)
//!     → command.rs (argv tokens per subcommand)
//!     → client.rs (deadline, failure mapping, metrics)
//!     → runner.rs (tokio::process spawn, stdout/stderr capture)
//!     → utxo.rs (query output → UnspentOutput)
//!     → transaction.rs (query, build, sign, submit, transfer)
//! ```
//!
//! # Constraints
//! - No shell: every argument is its own token
//! - Signing keys are referenced by file name only and never read
//! - Every invocation has a deadline
//! - Transaction files are owned by the external tool; only their names live here

pub mod artifact;
pub mod client;
pub mod command;
pub mod runner;
pub mod transaction;
pub mod types;
pub mod utxo;

pub use artifact::{ArtifactId, ArtifactStage, TransactionArtifact};
pub use client::CliClient;
pub use command::{CommandBuilder, Invocation, Subcommand};
pub use runner::{ProcessOutput, ProcessRunner, TokioProcessRunner};
pub use transaction::TransactionOrchestrator;
pub use types::{
    Era, NetworkTarget, OrchestratorError, OrchestratorResult, TransferReceipt, UnspentOutput,
};

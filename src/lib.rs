//! Cardano CLI facade library.
//!
//! Drives `cardano-cli` as an external process: queries unspent outputs and
//! builds, signs, and submits transactions, parsing the tool's text output
//! into typed records. Transaction construction, fees, signing, and network
//! submission all happen inside the external binary.

pub mod blockchain;
pub mod config;
pub mod observability;

pub use blockchain::{
    ArtifactStage, Era, NetworkTarget, OrchestratorError, OrchestratorResult, TransactionArtifact,
    TransactionOrchestrator, TransferReceipt, UnspentOutput,
};
pub use config::OrchestratorConfig;

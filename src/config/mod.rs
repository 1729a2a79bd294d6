//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → OrchestratorConfig (validated, immutable)
//!     → handed to TransactionOrchestrator at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the orchestrator never mutates it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CliConfig, NetworkConfig, NetworkKind, ObservabilityConfig, OrchestratorConfig, PathsConfig,
};
pub use validation::{validate_config, ValidationError};

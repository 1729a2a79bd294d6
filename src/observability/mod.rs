//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! blockchain/client.rs produces, per invocation:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (invocation counters and durations)
//! ```
//!
//! # Design Decisions
//! - stdout belongs to the CLI's JSON output, so logs go to stderr
//! - Metrics go through the `metrics` facade; an embedding application
//!   decides whether to install a recorder

pub mod logging;
pub mod metrics;

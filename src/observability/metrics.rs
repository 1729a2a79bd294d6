//! Metrics collection.
//!
//! # Metrics
//! - `cli_invocations_total` (counter): invocations by subcommand and outcome
//! - `cli_invocation_duration_seconds` (histogram): wall time per subcommand

use std::time::Instant;

/// Record one finished (or failed-to-start) invocation.
///
/// `outcome` is one of `success`, `failure`, `timeout`, `spawn_error`.
pub fn record_invocation(subcommand: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "cli_invocations_total",
        "subcommand" => subcommand,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("cli_invocation_duration_seconds", "subcommand" => subcommand)
        .record(start.elapsed().as_secs_f64());
}

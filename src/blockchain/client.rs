//! External tool client with timeout and error handling.
//!
//! # Responsibilities
//! - Hand invocations to the process runner under a deadline
//! - Turn non-zero exits into [`OrchestratorError::ExternalTool`] with the
//!   tool's stderr passed through untouched
//! - Log and record metrics for every invocation

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::blockchain::command::Invocation;
use crate::blockchain::runner::ProcessRunner;
use crate::blockchain::types::{OrchestratorError, OrchestratorResult};
use crate::observability::metrics;

/// Client for the external command-line tool.
#[derive(Clone)]
pub struct CliClient {
    runner: Arc<dyn ProcessRunner>,
    timeout_duration: Duration,
}

impl CliClient {
    pub fn new(runner: Arc<dyn ProcessRunner>, timeout_duration: Duration) -> Self {
        Self {
            runner,
            timeout_duration,
        }
    }

    /// Run one invocation and return its stdout on success.
    pub async fn execute(&self, invocation: &Invocation) -> OrchestratorResult<String> {
        let subcommand = invocation.subcommand.as_str();
        let start = Instant::now();

        tracing::debug!(command = %invocation, "Invoking external tool");

        let result = self.runner.run(invocation, self.timeout_duration).await;
        let outcome = match &result {
            Ok(output) if output.success => "success",
            Ok(_) => "failure",
            Err(OrchestratorError::Timeout { .. }) => "timeout",
            Err(_) => "spawn_error",
        };
        metrics::record_invocation(subcommand, outcome, start);

        let output = result.inspect_err(|e| {
            tracing::warn!(
                subcommand = subcommand,
                error = %e,
                "External tool could not be run"
            );
        })?;

        if !output.success {
            tracing::warn!(
                subcommand = subcommand,
                status = ?output.status,
                "External tool exited with failure"
            );
            return Err(OrchestratorError::ExternalTool {
                subcommand,
                status: output.status,
                stderr: output.stderr,
            });
        }

        tracing::debug!(
            subcommand = subcommand,
            elapsed_ms = start.elapsed().as_millis() as u64,
            stdout_bytes = output.stdout.len(),
            "External tool finished"
        );
        Ok(output.stdout)
    }
}

impl std::fmt::Debug for CliClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliClient")
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::command::Subcommand;
    use crate::blockchain::runner::ProcessOutput;
    use async_trait::async_trait;

    struct FixedRunner(OrchestratorResult<ProcessOutput>);

    #[async_trait]
    impl ProcessRunner for FixedRunner {
        async fn run(
            &self,
            _: &Invocation,
            limit: Duration,
        ) -> OrchestratorResult<ProcessOutput> {
            match &self.0 {
                Ok(output) => Ok(output.clone()),
                Err(_) => Err(OrchestratorError::Timeout {
                    subcommand: "transaction submit",
                    secs: limit.as_secs(),
                }),
            }
        }
    }

    fn submit() -> Invocation {
        Invocation {
            program: "cardano-cli".to_string(),
            subcommand: Subcommand::TransactionSubmit,
            args: vec!["--mainnet".to_string()],
        }
    }

    fn client(result: OrchestratorResult<ProcessOutput>) -> CliClient {
        CliClient::new(Arc::new(FixedRunner(result)), Duration::from_secs(7))
    }

    #[tokio::test]
    async fn test_success_returns_stdout() {
        let stdout = client(Ok(ProcessOutput::ok("Transaction successfully submitted.")))
            .execute(&submit())
            .await
            .unwrap();
        assert_eq!(stdout, "Transaction successfully submitted.");
    }

    #[tokio::test]
    async fn test_failure_keeps_raw_stderr() {
        let raw = "Command failed: transaction submit  Error: BadInputsUTxO\n";
        let err = client(Ok(ProcessOutput::failed(1, raw)))
            .execute(&submit())
            .await
            .unwrap_err();

        match err {
            OrchestratorError::ExternalTool {
                subcommand,
                status,
                stderr,
            } => {
                assert_eq!(subcommand, "transaction submit");
                assert_eq!(status, Some(1));
                assert_eq!(stderr, raw);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_runner_error_propagates() {
        let err = client(Err(OrchestratorError::Precondition(String::new())))
            .execute(&submit())
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Timeout { secs: 7, .. }));
    }
}

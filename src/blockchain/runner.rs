//! Process execution seam.
//!
//! # Responsibilities
//! - Spawn the external tool with discrete argv tokens (no shell)
//! - Capture stdout and stderr as text
//! - Enforce a per-invocation deadline, killing the child on expiry
//!
//! The [`ProcessRunner`] trait lets tests replace the real spawner with a
//! scripted one.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::blockchain::command::Invocation;
use crate::blockchain::types::{OrchestratorError, OrchestratorResult};

/// Raw result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// A successful exit with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed exit with the given code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs one invocation to completion.
///
/// Implementations return `Ok` for any process that ran, whatever its exit
/// status; `Err` is reserved for spawn failures and timeouts.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(
        &self,
        invocation: &Invocation,
        limit: Duration,
    ) -> OrchestratorResult<ProcessOutput>;
}

/// Runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        limit: Duration,
    ) -> OrchestratorResult<ProcessOutput> {
        let child = Command::new(&invocation.program)
            .args(invocation.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OrchestratorError::Spawn {
                program: invocation.program.clone(),
                reason: e.to_string(),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ProcessOutput {
                status: output.status.code(),
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(e)) => Err(OrchestratorError::Spawn {
                program: invocation.program.clone(),
                reason: format!("failed to collect output: {}", e),
            }),
            Err(_) => Err(OrchestratorError::Timeout {
                subcommand: invocation.subcommand.as_str(),
                secs: limit.as_secs(),
            }),
        }
    }
}

//! Hook Types
//!
//! Core types for the hooks system:
//! - `InterceptorOutcome` - Decision returned from an interceptor
//! - `Interceptor` / `Callback` - Traits for implementing hooks
//! - `ExecutionResult` - Result of running a command

use anyhow::Result;

/// Decision returned from an interceptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptorOutcome {
    /// Let the command continue unchanged
    Allow,
    /// Abort the command entirely; no execution, no callbacks
    Block,
    /// Substitute the command text and keep going
    Replace(String),
}

/// Pre-execution hook
///
/// Interceptors run before a command executes and can allow, block, or
/// rewrite it. They are synchronous for simplicity; if you need async
/// operations, spawn a task and don't block.
///
/// Returning `Err` is treated as `Allow` by the pipeline (fail-open):
/// the error is logged and the chain continues. A misbehaving hook must
/// never take down the session.
pub trait Interceptor: Send + Sync {
    /// Inspect the command and decide what happens to it
    fn intercept(&self, command: &str) -> Result<InterceptorOutcome>;
}

impl<F> Interceptor for F
where
    F: Fn(&str) -> Result<InterceptorOutcome> + Send + Sync,
{
    fn intercept(&self, command: &str) -> Result<InterceptorOutcome> {
        (self)(command)
    }
}

/// Post-execution hook
///
/// Callbacks run after a command completes, with the *original* command
/// text (never an interceptor-rewritten version) and the execution
/// result. Side-effect only; errors are logged and ignored.
pub trait Callback: Send + Sync {
    /// React to a completed command
    fn on_result(&self, command: &str, result: &ExecutionResult) -> Result<()>;
}

impl<F> Callback for F
where
    F: Fn(&str, &ExecutionResult) -> Result<()> + Send + Sync,
{
    fn on_result(&self, command: &str, result: &ExecutionResult) -> Result<()> {
        (self)(command, result)
    }
}

/// Result of executing a command
///
/// `stdout`/`stderr` are `None` when output capture was not requested,
/// and present (possibly empty) when it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Child exit code (`-1` if terminated by a signal)
    pub exit_code: i32,
    /// Captured standard output, if capture was requested
    pub stdout: Option<String>,
    /// Captured standard error, if capture was requested
    pub stderr: Option<String>,
}

impl ExecutionResult {
    /// Result of a run without output capture
    pub fn plain(exit_code: i32) -> Self {
        Self {
            exit_code,
            stdout: None,
            stderr: None,
        }
    }

    /// Result of a run with captured output
    pub fn captured(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: Some(stdout.into()),
            stderr: Some(stderr.into()),
        }
    }

    /// Result standing in for a process that could not be spawned
    ///
    /// Spawn failure is not exceptional at the pipeline level: it is an
    /// ordinary failed run with exit code 1 and the description in stderr.
    pub fn spawn_failure(description: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            stdout: None,
            stderr: Some(description.into()),
        }
    }

    /// Whether the command exited with code 0
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

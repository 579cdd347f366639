//! Shell command execution
//!
//! `ShellExecutor` dispatches a literal command string to the host's
//! command shell and normalizes the outcome into one `ExecutionResult`
//! shape across platforms. The `CommandRunner` trait is the seam the
//! pipeline depends on, so processing logic can be tested without
//! spawning processes.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::hooks::ExecutionResult;

/// Default POSIX shell when `$SHELL` is unset
const FALLBACK_SHELL: &str = "/bin/sh";

/// Anything that can run a command string
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command, optionally capturing its output
    ///
    /// This never fails: a process that cannot be spawned is reported as
    /// an exit-1 result with the description in `stderr`, so callers
    /// handle one shape for "ran and failed" and "could not run".
    async fn run(&self, command: &str, capture_output: bool) -> ExecutionResult;
}

/// Executes commands through the host's command shell
///
/// On Windows commands go through `cmd.exe /C`; elsewhere through the
/// shell named by `$SHELL` (falling back to `/bin/sh`), invoked
/// non-login, non-interactive, single-command (`-c`).
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    /// Create an executor using the host's shell
    pub fn new() -> Self {
        let shell = if cfg!(windows) {
            "cmd.exe".to_string()
        } else {
            std::env::var("SHELL").unwrap_or_else(|_| FALLBACK_SHELL.to_string())
        };
        Self { shell }
    }

    /// Create an executor using a specific shell binary
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// The shell this executor dispatches through
    pub fn shell(&self) -> &str {
        &self.shell
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        if cfg!(windows) {
            cmd.arg("/C").arg(command);
        } else {
            cmd.arg("-c").arg(command);
        }
        cmd
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellExecutor {
    async fn run(&self, command: &str, capture_output: bool) -> ExecutionResult {
        tracing::debug!("Executing via {}: {}", self.shell, command);

        if capture_output {
            let output = self
                .command(command)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await;

            match output {
                Ok(output) => {
                    let exit_code = output.status.code().unwrap_or(-1);
                    tracing::debug!("Command exit code: {}", exit_code);
                    ExecutionResult::captured(
                        exit_code,
                        String::from_utf8_lossy(&output.stdout).into_owned(),
                        String::from_utf8_lossy(&output.stderr).into_owned(),
                    )
                }
                Err(e) => {
                    let description = format!("Error executing command: {}", e);
                    tracing::error!("{}", description);
                    ExecutionResult::spawn_failure(description)
                }
            }
        } else {
            // Child inherits the parent's streams; nothing is collected.
            match self.command(command).status().await {
                Ok(status) => {
                    let exit_code = status.code().unwrap_or(-1);
                    tracing::debug!("Command exit code: {}", exit_code);
                    ExecutionResult::plain(exit_code)
                }
                Err(e) => {
                    let description = format!("Error executing command: {}", e);
                    tracing::error!("{}", description);
                    ExecutionResult::spawn_failure(description)
                }
            }
        }
    }
}

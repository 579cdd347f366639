//! Command lifecycle orchestration
//!
//! One `process()` call takes a command through its whole lifecycle:
//! interceptors in registration order, execution (possibly of a rewritten
//! command), then callbacks with the original command and the result.
//!
//! Two rules keep hook behavior predictable:
//!
//! - Prefix scoping always tests the *original* input. A hook scoped to
//!   `"git"` fires for user-typed git commands no matter what an earlier
//!   hook rewrote them to.
//! - Hook errors are isolated per hook: an interceptor that fails is
//!   logged and treated as Allow (fail-open), a callback that fails is
//!   logged and the remaining callbacks still run. Hook misbehavior must
//!   never crash the pipeline.

use std::sync::Arc;

use crate::executor::CommandRunner;
use crate::hooks::{ExecutionResult, HookRegistry, InterceptorOutcome};

/// Processes commands through the hook registry and an executor
pub struct Pipeline {
    registry: HookRegistry,
    runner: Arc<dyn CommandRunner>,
}

impl Pipeline {
    /// Create a pipeline with an empty registry
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_registry(HookRegistry::new(), runner)
    }

    /// Create a pipeline over a pre-populated registry
    pub fn with_registry(registry: HookRegistry, runner: Arc<dyn CommandRunner>) -> Self {
        Self { registry, runner }
    }

    /// The hook registry
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for the load/registration phase
    pub fn registry_mut(&mut self) -> &mut HookRegistry {
        &mut self.registry
    }

    /// Process one command
    ///
    /// Returns `None` exactly when an interceptor blocked execution; a
    /// command that ran and failed still returns `Some` with its exit
    /// code.
    pub async fn process(&self, command: &str, capture_output: bool) -> Option<ExecutionResult> {
        let mut current = command.to_string();
        let mut should_execute = true;

        for entry in self.registry.interceptors() {
            if !entry.matches(command) {
                continue;
            }

            match entry.hook().intercept(&current) {
                Ok(InterceptorOutcome::Allow) => {}
                Ok(InterceptorOutcome::Replace(text)) => {
                    tracing::debug!("Interceptor {} rewrote command to: {}", entry.name, text);
                    current = text;
                }
                Ok(InterceptorOutcome::Block) => {
                    tracing::info!("Interceptor {} blocked command: {}", entry.name, command);
                    should_execute = false;
                    break;
                }
                Err(e) => {
                    // Fail-open: a broken interceptor neither blocks the
                    // command nor stops the chain.
                    tracing::error!("Error in interceptor {}: {}", entry.name, e);
                }
            }
        }

        if !should_execute {
            return None;
        }

        let result = self.runner.run(&current, capture_output).await;

        for entry in self.registry.callbacks() {
            if !entry.matches(command) {
                continue;
            }
            // Callbacks observe what the user asked for, not what ran.
            if let Err(e) = entry.hook().on_result(command, &result) {
                tracing::error!("Error in callback {}: {}", entry.name, e);
            }
        }

        Some(result)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("registry", &self.registry)
            .finish()
    }
}

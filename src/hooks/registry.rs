//! Hook Registry
//!
//! Ordered storage for the two hook kinds. Insertion order is
//! significant: hooks run first-registered, first-run. Prefixes carry no
//! uniqueness constraint; duplicates are all retained and all run.

use std::sync::Arc;

use super::types::{Callback, Interceptor};

/// Type alias for stored interceptors
pub type ArcInterceptor = Arc<dyn Interceptor>;

/// Type alias for stored callbacks
pub type ArcCallback = Arc<dyn Callback>;

/// A registered hook with its scope
///
/// The prefix filter is fixed at registration time. `None` means the
/// hook applies to every command.
pub struct HookEntry<H: ?Sized> {
    /// Name used in diagnostics when the hook fails
    pub name: String,
    /// Optional command prefix this hook applies to
    pub prefix: Option<String>,
    hook: Arc<H>,
}

impl<H: ?Sized> HookEntry<H> {
    /// Check if this entry applies to a command string
    ///
    /// Matching always tests the caller-supplied text; the pipeline
    /// passes the original user input, never a rewritten version.
    pub fn matches(&self, command: &str) -> bool {
        match &self.prefix {
            Some(prefix) => command.starts_with(prefix.as_str()),
            None => true,
        }
    }

    /// The stored hook
    pub fn hook(&self) -> &Arc<H> {
        &self.hook
    }
}

// Manual impl: derive would require `H: Clone`, which trait objects
// cannot satisfy; the hook itself is shared through the `Arc`.
impl<H: ?Sized> Clone for HookEntry<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            prefix: self.prefix.clone(),
            hook: self.hook.clone(),
        }
    }
}

impl<H: ?Sized> std::fmt::Debug for HookEntry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookEntry")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// Entry holding an interceptor
pub type InterceptorEntry = HookEntry<dyn Interceptor>;

/// Entry holding a callback
pub type CallbackEntry = HookEntry<dyn Callback>;

/// Central registry for terminal hooks
///
/// Purely in-memory, single-owner. Mutate it during startup/loading,
/// read it during processing; it is not internally synchronized.
///
/// # Example
///
/// ```ignore
/// let mut registry = HookRegistry::new();
///
/// // Block destructive commands
/// registry.register_interceptor("no-rm", Some("rm"), |_cmd: &str| {
///     Ok(InterceptorOutcome::Block)
/// });
///
/// // Audit everything that ran
/// registry.register_callback("audit", None, |cmd: &str, result: &ExecutionResult| {
///     tracing::info!("{} exited with {}", cmd, result.exit_code);
///     Ok(())
/// });
/// ```
#[derive(Default)]
pub struct HookRegistry {
    interceptors: Vec<InterceptorEntry>,
    callbacks: Vec<CallbackEntry>,
}

impl HookRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor
    ///
    /// Returns the stored handle so registration composes pass-through
    /// at the call site.
    pub fn register_interceptor<I: Interceptor + 'static>(
        &mut self,
        name: impl Into<String>,
        prefix: Option<&str>,
        interceptor: I,
    ) -> ArcInterceptor {
        let name = name.into();
        tracing::debug!("Registering interceptor: {} (prefix: {:?})", name, prefix);
        let hook: ArcInterceptor = Arc::new(interceptor);
        self.interceptors.push(HookEntry {
            name,
            prefix: prefix.map(String::from),
            hook: hook.clone(),
        });
        hook
    }

    /// Append a callback
    pub fn register_callback<C: Callback + 'static>(
        &mut self,
        name: impl Into<String>,
        prefix: Option<&str>,
        callback: C,
    ) -> ArcCallback {
        let name = name.into();
        tracing::debug!("Registering callback: {} (prefix: {:?})", name, prefix);
        let hook: ArcCallback = Arc::new(callback);
        self.callbacks.push(HookEntry {
            name,
            prefix: prefix.map(String::from),
            hook: hook.clone(),
        });
        hook
    }

    /// All interceptors, in registration order
    ///
    /// Returns a defensive copy; mutating the result does not touch the
    /// registry.
    pub fn interceptors(&self) -> Vec<InterceptorEntry> {
        self.interceptors.clone()
    }

    /// All callbacks, in registration order
    pub fn callbacks(&self) -> Vec<CallbackEntry> {
        self.callbacks.clone()
    }

    /// Number of registered interceptors
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no hooks of either kind are registered
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty() && self.callbacks.is_empty()
    }

    /// Remove all hooks of both kinds
    pub fn clear(&mut self) {
        self.interceptors.clear();
        self.callbacks.clear();
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("interceptors", &self.interceptors.len())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

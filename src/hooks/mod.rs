//! Hooks Module
//!
//! Intercept and react to terminal commands at two points:
//!
//! - **Interceptors** run before execution and can allow, block, or
//!   rewrite the command.
//! - **Callbacks** run after execution with the original command and
//!   its result.
//!
//! Both kinds can be scoped to a command prefix (`Some("git")` fires
//! only for commands starting with `git`; `None` fires for everything).
//! Hooks run in registration order, and a hook that returns `Err` is
//! logged and skipped rather than aborting the chain.
//!
//! # Example
//!
//! ```ignore
//! use termhooks::hooks::{HookRegistry, InterceptorOutcome};
//!
//! let mut registry = HookRegistry::new();
//!
//! // Rewrite bare `ls` into something more useful
//! registry.register_interceptor("ls-color", Some("ls"), |cmd: &str| {
//!     Ok(InterceptorOutcome::Replace(format!("{} --color=auto", cmd)))
//! });
//!
//! // Refuse recursive deletes outright
//! registry.register_interceptor("no-rm-rf", Some("rm -rf"), |_cmd: &str| {
//!     Ok(InterceptorOutcome::Block)
//! });
//! ```

mod registry;
mod types;

pub use registry::{
    ArcCallback, ArcInterceptor, CallbackEntry, HookEntry, HookRegistry, InterceptorEntry,
};
pub use types::{Callback, ExecutionResult, Interceptor, InterceptorOutcome};

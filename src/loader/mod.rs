//! Hook discovery
//!
//! Hooks reach the registry two ways:
//!
//! - **Providers**: compiled units implementing [`HookProvider`], the
//!   fixed registration interface. Each provider is invoked as an opaque,
//!   individually fault-isolated unit.
//! - **Manifest directories**: a directory of `*.json` files, each
//!   declaring rule-based hooks. One malformed file must not disable all
//!   hooks: its error goes to the diagnostic stream and loading continues
//!   with the next file.
//!
//! Reported counts are the net change in registry sizes over the whole
//! pass, so a file that fails after registering some of its entries still
//! contributes the ones that made it in.
//!
//! # Manifest format
//!
//! ```json
//! {
//!   "hooks": [
//!     { "kind": "interceptor", "name": "no-rm", "prefix": "rm -rf", "action": "block" },
//!     { "kind": "interceptor", "prefix": "ls", "action": { "replace": { "with": "ls --color=auto" } } },
//!     { "kind": "callback", "name": "audit", "action": "log" }
//!   ]
//! }
//! ```
//!
//! Interceptor actions: `"log"` (report and allow), `"block"`,
//! `{ "replace": { "with": … } }`. Callback action: `"log"`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::core::{HookError, HookResult};
use crate::hooks::{ExecutionResult, HookRegistry, InterceptorOutcome};

/// Net hook counts added by one loading pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Interceptors added to the registry
    pub interceptors_added: usize,
    /// Callbacks added to the registry
    pub callbacks_added: usize,
}

/// A unit of external hook code
///
/// Providers register whatever hooks they like through the registry's
/// normal operations. A provider whose `register` fails is logged and
/// skipped; it must not disable the providers after it.
pub trait HookProvider: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Register this provider's hooks
    fn register(&self, registry: &mut HookRegistry) -> Result<()>;
}

/// Invoke each provider against the registry, isolating failures
pub fn load_providers(
    registry: &mut HookRegistry,
    providers: &[Box<dyn HookProvider>],
) -> LoadReport {
    let interceptors_before = registry.interceptor_count();
    let callbacks_before = registry.callback_count();

    for provider in providers {
        if let Err(e) = provider.register(registry) {
            tracing::error!("Error in hook provider {}: {}", provider.name(), e);
        }
    }

    LoadReport {
        interceptors_added: registry.interceptor_count() - interceptors_before,
        callbacks_added: registry.callback_count() - callbacks_before,
    }
}

/// Load hook manifests from a directory
///
/// Enumerates `*.json` files one level deep, in file-name order, and
/// registers each file's hooks. `HookError::DirectoryNotFound` is the
/// only propagated error; everything that goes wrong inside a file is
/// logged and skipped.
pub fn load_from_directory(
    registry: &mut HookRegistry,
    directory: impl AsRef<Path>,
) -> HookResult<LoadReport> {
    let directory = directory.as_ref();
    if !directory.is_dir() {
        return Err(HookError::DirectoryNotFound(directory.to_path_buf()));
    }

    let interceptors_before = registry.interceptor_count();
    let callbacks_before = registry.callback_count();

    for path in manifest_files(directory) {
        if let Err(e) = load_manifest_file(registry, &path) {
            tracing::error!(
                "Error loading hook file {}: {:#}",
                path.file_name().unwrap_or_default().to_string_lossy(),
                e
            );
        }
    }

    let report = LoadReport {
        interceptors_added: registry.interceptor_count() - interceptors_before,
        callbacks_added: registry.callback_count() - callbacks_before,
    };
    tracing::info!(
        "Loaded {} interceptors and {} callbacks from {}",
        report.interceptors_added,
        report.callbacks_added,
        directory.display()
    );
    Ok(report)
}

/// Manifest files in the directory, sorted by name for a stable order
fn manifest_files(directory: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Cannot read hook directory {}: {}", directory.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Hook manifest file contents
///
/// Entries are held as raw values so each one is validated and
/// registered independently: an invalid entry aborts the rest of its
/// file, but entries registered before it stay in the registry.
#[derive(Debug, Deserialize)]
struct Manifest {
    hooks: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum HookKind {
    Interceptor,
    Callback,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ActionSpec {
    /// Report the command to the diagnostic stream (allows execution)
    Log,
    /// Block the command
    Block,
    /// Rewrite the command
    Replace { with: String },
}

#[derive(Debug, Deserialize)]
struct HookSpec {
    kind: HookKind,
    name: Option<String>,
    prefix: Option<String>,
    action: ActionSpec,
}

/// Interceptor backed by a manifest rule
struct RuleInterceptor {
    name: String,
    rule: InterceptorRule,
}

enum InterceptorRule {
    Log,
    Block,
    Replace(String),
}

impl crate::hooks::Interceptor for RuleInterceptor {
    fn intercept(&self, command: &str) -> Result<InterceptorOutcome> {
        match &self.rule {
            InterceptorRule::Log => {
                tracing::info!("[{}] command: {}", self.name, command);
                Ok(InterceptorOutcome::Allow)
            }
            InterceptorRule::Block => Ok(InterceptorOutcome::Block),
            InterceptorRule::Replace(with) => Ok(InterceptorOutcome::Replace(with.clone())),
        }
    }
}

/// Callback backed by a manifest `log` rule
struct LogCallback {
    name: String,
}

impl crate::hooks::Callback for LogCallback {
    fn on_result(&self, command: &str, result: &ExecutionResult) -> Result<()> {
        tracing::info!("[{}] {} exited with {}", self.name, command, result.exit_code);
        Ok(())
    }
}

fn load_manifest_file(registry: &mut HookRegistry, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&text).context("invalid hook manifest")?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".to_string());

    for (index, value) in manifest.hooks.into_iter().enumerate() {
        let spec: HookSpec = serde_json::from_value(value)
            .with_context(|| format!("invalid hook entry #{}", index))?;
        register_spec(registry, spec, || format!("{}#{}", stem, index))
            .with_context(|| format!("invalid hook entry #{}", index))?;
    }

    Ok(())
}

fn register_spec(
    registry: &mut HookRegistry,
    spec: HookSpec,
    default_name: impl FnOnce() -> String,
) -> Result<()> {
    let name = spec.name.unwrap_or_else(default_name);
    let prefix = spec.prefix.as_deref();

    match (spec.kind, spec.action) {
        (HookKind::Interceptor, action) => {
            let rule = match action {
                ActionSpec::Log => InterceptorRule::Log,
                ActionSpec::Block => InterceptorRule::Block,
                ActionSpec::Replace { with } => InterceptorRule::Replace(with),
            };
            let hook = RuleInterceptor {
                name: name.clone(),
                rule,
            };
            registry.register_interceptor(name, prefix, hook);
        }
        (HookKind::Callback, ActionSpec::Log) => {
            let hook = LogCallback { name: name.clone() };
            registry.register_callback(name, prefix, hook);
        }
        (HookKind::Callback, action) => {
            bail!("action {:?} is not valid for a callback", action);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    fn write_manifest(dir: &Path, file: &str, contents: &str) {
        std::fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn test_load_counts_from_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            "hooks.json",
            r#"{"hooks": [
                {"kind": "interceptor", "name": "no-rm", "prefix": "rm -rf", "action": "block"},
                {"kind": "interceptor", "prefix": "ls", "action": {"replace": {"with": "ls --color=auto"}}},
                {"kind": "callback", "name": "audit", "action": "log"}
            ]}"#,
        );

        let mut registry = HookRegistry::new();
        let report = load_from_directory(&mut registry, dir.path()).unwrap();

        assert_eq!(report.interceptors_added, 2);
        assert_eq!(report.callbacks_added, 1);
        assert_eq!(registry.interceptor_count(), 2);
        assert_eq!(registry.callback_count(), 1);
    }

    #[test]
    fn test_manifest_hooks_behave_as_declared() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            "hooks.json",
            r#"{"hooks": [
                {"kind": "interceptor", "prefix": "rm", "action": "block"},
                {"kind": "interceptor", "prefix": "ls", "action": {"replace": {"with": "ls -la"}}}
            ]}"#,
        );

        let mut registry = HookRegistry::new();
        load_from_directory(&mut registry, dir.path()).unwrap();

        let entries = registry.interceptors();
        assert_eq!(
            entries[0].hook().intercept("rm -rf /").unwrap(),
            InterceptorOutcome::Block
        );
        assert_eq!(
            entries[1].hook().intercept("ls").unwrap(),
            InterceptorOutcome::Replace("ls -la".to_string())
        );
    }

    #[test]
    fn test_missing_directory_is_the_only_propagated_error() {
        let mut registry = HookRegistry::new();
        let err = load_from_directory(&mut registry, "/nonexistent/directory").unwrap_err();
        assert!(matches!(err, HookError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_malformed_file_does_not_abort_the_pass() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "a_broken.json", r#"{"hooks": ["#);
        write_manifest(
            dir.path(),
            "b_valid.json",
            r#"{"hooks": [
                {"kind": "interceptor", "prefix": "git", "action": "log"},
                {"kind": "interceptor", "prefix": "rm", "action": "block"},
                {"kind": "callback", "action": "log"}
            ]}"#,
        );

        let mut registry = HookRegistry::new();
        let report = load_from_directory(&mut registry, dir.path()).unwrap();

        assert_eq!(report.interceptors_added, 2);
        assert_eq!(report.callbacks_added, 1);
    }

    #[test]
    fn test_partial_registration_before_failure_still_counts() {
        let dir = tempfile::tempdir().unwrap();
        // Second entry is invalid: callbacks cannot block.
        write_manifest(
            dir.path(),
            "hooks.json",
            r#"{"hooks": [
                {"kind": "interceptor", "prefix": "git", "action": "log"},
                {"kind": "callback", "action": "block"},
                {"kind": "callback", "action": "log"}
            ]}"#,
        );

        let mut registry = HookRegistry::new();
        let report = load_from_directory(&mut registry, dir.path()).unwrap();

        // The interceptor made it in before the file failed; the
        // callback after the bad entry did not.
        assert_eq!(report.interceptors_added, 1);
        assert_eq!(report.callbacks_added, 0);
    }

    #[test]
    fn test_non_manifest_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "readme.txt", "not a manifest");
        write_manifest(dir.path(), "hooks.py", "def f(): pass");

        let mut registry = HookRegistry::new();
        let report = load_from_directory(&mut registry, dir.path()).unwrap();

        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_empty_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = HookRegistry::new();
        let report = load_from_directory(&mut registry, dir.path()).unwrap();
        assert_eq!(report, LoadReport::default());
        assert!(registry.is_empty());
    }

    struct GoodProvider;

    impl HookProvider for GoodProvider {
        fn name(&self) -> &str {
            "good"
        }

        fn register(&self, registry: &mut HookRegistry) -> Result<()> {
            registry.register_interceptor("good-hook", None, |_cmd: &str| {
                Ok(InterceptorOutcome::Allow)
            });
            registry.register_callback("good-cb", None, |_c: &str, _r: &ExecutionResult| Ok(()));
            Ok(())
        }
    }

    struct FailingProvider;

    impl HookProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn register(&self, _registry: &mut HookRegistry) -> Result<()> {
            Err(anyhow!("provider exploded"))
        }
    }

    #[test]
    fn test_failing_provider_is_skipped() {
        let mut registry = HookRegistry::new();
        let providers: Vec<Box<dyn HookProvider>> =
            vec![Box::new(FailingProvider), Box::new(GoodProvider)];

        let report = load_providers(&mut registry, &providers);

        assert_eq!(report.interceptors_added, 1);
        assert_eq!(report.callbacks_added, 1);
    }
}

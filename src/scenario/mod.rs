//! Scenario Module
//!
//! A nestable, isolated unit of execution with its own cleanup stack.
//!
//! ## Responsibilities
//! - Run a body, then its cleanups newest-first, whether the body passed
//!   or failed
//! - Nest child scenarios, sequentially or on scoped threads
//! - Attribute logs and failures to the caller through `#[track_caller]`
//! - Hand out scenario-scoped temp dirs and env overrides
//!
//! ## Failure Model
//! ```text
//!   body ──fatal()──► record Failure ──unwind──► caught by root()/run()
//!                                                          │
//!                          cleanups (LIFO) ◄───────────────┘
//!                                │
//!                                ▼
//!                    Outcome pushed to parent, parent marked failed
//! ```
//!
//! ## Helper Attribution
//! A helper marked `#[track_caller]` that calls `fatal` or `log` reports
//! its caller's line. Every frame to be skipped needs the attribute;
//! closures and calls through `fn` values can't carry it, so attribution
//! stops at the closure body.

mod cleanup;
mod env;
mod failure;
mod outcome;

pub use cleanup::{CleanupFn, CleanupStack};
pub use env::EnvOverride;
pub use failure::{Failure, SourceLocation};
pub use outcome::{LogLine, Outcome, Status};

use std::ffi::OsStr;
use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::config::Config;
use failure::FatalSignal;

/// Longest scenario-derived prefix used for temp dir names
const TEMP_PREFIX_LIMIT: usize = 64;

/// A running scenario
pub struct Scenario {
    /// Full slash-joined path
    name: String,

    /// Shared, read-only run configuration
    config: Arc<Config>,

    /// Set on parallel children and inherited by their descendants
    parallel: bool,

    cleanups: CleanupStack,
    logs: Vec<LogLine>,
    failures: Vec<Failure>,

    /// Also set when a child fails
    failed: bool,

    children: Vec<Outcome>,
    started: Instant,
}

impl Scenario {
    /// Run `body` as a top-level scenario and return its finished tree
    ///
    /// A `Scenario` only ever exists inside a body or a cleanup, so a
    /// `fatal` anywhere, the root included, is caught and recorded.
    pub fn root<F>(name: impl Into<String>, config: Config, body: F) -> Outcome
    where
        F: FnOnce(&mut Scenario),
    {
        Self::new(name.into(), Arc::new(config), false).execute(body)
    }

    fn new(name: String, config: Arc<Config>, parallel: bool) -> Self {
        tracing::debug!(scenario = %name, parallel, "=== RUN");
        Self {
            name,
            config,
            parallel,
            cleanups: CleanupStack::new(),
            logs: Vec::new(),
            failures: Vec::new(),
            failed: false,
            children: Vec::new(),
            started: Instant::now(),
        }
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    /// Run `body` as a child scenario
    ///
    /// The child has its own cleanup stack, which is drained before this
    /// returns. A failing child marks this scenario failed but does not
    /// stop it. Returns whether the child passed.
    pub fn run<F>(&mut self, name: &str, body: F) -> bool
    where
        F: FnOnce(&mut Scenario),
    {
        let child = Scenario::new(
            child_name(&self.name, name),
            Arc::clone(&self.config),
            self.parallel,
        );
        let outcome = child.execute(body);
        self.adopt(outcome)
    }

    /// Run one child scenario per case, all at once, on scoped threads
    ///
    /// Returns once every child has finished. Children are recorded in the
    /// order they finished. Returns whether all of them passed.
    pub fn run_parallel<I, T, F>(&mut self, cases: I, body: F) -> bool
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display + Send,
        F: Fn(&mut Scenario, T) + Sync,
    {
        let finished = Mutex::new(Vec::new());
        let parent = self.name.as_str();
        let config = &self.config;
        let body = &body;
        let finished_ref = &finished;

        let spawned = crossbeam::scope(|scope| {
            for case in cases {
                let name = child_name(parent, &case.to_string());
                let config = Arc::clone(config);
                scope.spawn(move |_| {
                    let child = Scenario::new(name, config, true);
                    let outcome = child.execute(|s| body(s, case));
                    finished_ref.lock().push(outcome);
                });
            }
        });

        if spawned.is_err() {
            self.record_failure(Failure::unlocated(
                "parallel scenario thread panicked outside its body",
            ));
        }

        let mut passed = spawned.is_ok();
        for outcome in finished.into_inner() {
            passed &= self.adopt(outcome);
        }
        passed
    }

    fn adopt(&mut self, outcome: Outcome) -> bool {
        let passed = outcome.passed();
        if !passed {
            self.failed = true;
        }
        self.children.push(outcome);
        passed
    }

    fn execute<F>(mut self, body: F) -> Outcome
    where
        F: FnOnce(&mut Scenario),
    {
        let result = panic::catch_unwind(AssertUnwindSafe(|| body(&mut self)));
        if let Err(payload) = result {
            self.absorb_panic(payload);
        }
        self.finish()
    }

    /// Drain the cleanup stack and produce this scenario's outcome
    fn finish(mut self) -> Outcome {
        self.run_cleanups();

        let status = if self.failed {
            Status::Failed
        } else {
            Status::Passed
        };
        let elapsed = self.started.elapsed();
        tracing::debug!(
            scenario = %self.name,
            ?status,
            elapsed_ms = elapsed.as_millis() as u64,
            "scenario finished"
        );

        Outcome {
            name: mem::take(&mut self.name),
            status,
            failures: mem::take(&mut self.failures),
            logs: mem::take(&mut self.logs),
            children: mem::take(&mut self.children),
            elapsed,
        }
    }

    // =========================================================================
    // Cleanup
    // =========================================================================

    /// Register a callback to run after the body, newest first
    ///
    /// Runs even when the body fails. A cleanup may register further
    /// cleanups; those run next.
    pub fn cleanup<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Scenario) + 'static,
    {
        self.cleanups.push(Box::new(f));
    }

    fn run_cleanups(&mut self) {
        if self.cleanups.is_empty() {
            return;
        }
        tracing::trace!(scenario = %self.name, count = self.cleanups.len(), "running cleanups");

        while let Some(cleanup) = self.cleanups.pop() {
            tracing::trace!(scenario = %self.name, remaining = self.cleanups.len(), "running cleanup");
            let result = panic::catch_unwind(AssertUnwindSafe(|| cleanup(&mut *self)));
            if let Err(payload) = result {
                self.absorb_panic(payload);
            }
        }
    }

    // =========================================================================
    // Logging and Failure
    // =========================================================================

    /// Log a message attributed to the caller
    #[track_caller]
    pub fn log(&mut self, message: impl fmt::Display) {
        let line = LogLine {
            location: Some(SourceLocation::caller()),
            message: message.to_string(),
        };
        tracing::info!(scenario = %self.name, "{}", line);
        self.logs.push(line);
    }

    /// Record a failure attributed to the caller and keep going
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.record_failure(Failure::at(message, SourceLocation::caller()));
    }

    /// Record a failure attributed to the caller and stop the body here
    ///
    /// Cleanups still run.
    #[track_caller]
    pub fn fatal(&mut self, message: impl Into<String>) -> ! {
        self.record_failure(Failure::at(message, SourceLocation::caller()));
        panic::resume_unwind(Box::new(FatalSignal))
    }

    fn record_failure(&mut self, failure: Failure) {
        tracing::warn!(scenario = %self.name, "{}", failure);
        self.logs.push(LogLine {
            location: failure.location,
            message: failure.message.clone(),
        });
        self.failures.push(failure);
        self.failed = true;
    }

    fn absorb_panic(&mut self, payload: Box<dyn std::any::Any + Send>) {
        if let Some(failure) = failure::from_panic(payload) {
            self.record_failure(failure);
        }
    }

    // =========================================================================
    // Scoped Resources
    // =========================================================================

    /// Create a fresh directory that is removed when this scenario ends
    ///
    /// Each call returns a new directory. Failing to create it is fatal.
    #[track_caller]
    pub fn temp_dir(&mut self) -> PathBuf {
        let prefix = temp_prefix(&self.name);
        let dir = match tempfile::Builder::new().prefix(&prefix).tempdir() {
            Ok(dir) => dir,
            Err(e) => self.fatal(format!("temp_dir: {}", e)),
        };
        let path = dir.path().to_path_buf();
        tracing::debug!(scenario = %self.name, path = %path.display(), "created temp dir");

        self.cleanup(move |s| {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                s.fail(format!("removing temp dir {}: {}", path.display(), e));
            }
        });
        path
    }

    /// Set an environment variable until this scenario ends
    ///
    /// The previous value, or its absence, is restored by a cleanup. The
    /// environment is process-wide, so this is fatal in parallel scenarios.
    #[track_caller]
    pub fn set_env(&mut self, key: &str, value: impl AsRef<OsStr>) {
        if self.parallel {
            self.fatal(format!(
                "set_env({}) cannot be used in parallel scenarios or their descendants",
                key
            ));
        }

        let saved = EnvOverride::apply(key, value);
        tracing::debug!(
            scenario = %self.name,
            key = saved.key(),
            previous = ?saved.previous(),
            "overrode env var"
        );
        self.cleanup(move |_| saved.restore());
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Whether this scenario, or any finished child, has failed
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Number of cleanups registered and not yet run
    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.len()
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("parallel", &self.parallel)
            .field("failed", &self.failed)
            .field("pending_cleanups", &self.cleanups.len())
            .finish()
    }
}

fn child_name(parent: &str, name: &str) -> String {
    let name = name.replace(' ', "_");
    if parent.is_empty() {
        name
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Directory-safe, bounded prefix derived from a scenario name
fn temp_prefix(name: &str) -> String {
    let mut prefix: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .take(TEMP_PREFIX_LIMIT)
        .collect();
    prefix.push('-');
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_name_joins_and_replaces_spaces() {
        assert_eq!(child_name("root", "with helper"), "root/with_helper");
        assert_eq!(child_name("", "root"), "root");
    }

    #[test]
    fn test_temp_prefix_is_sanitized_and_bounded() {
        assert_eq!(temp_prefix("Showcase/temp_dir"), "Showcase_temp_dir-");
        let long = "x".repeat(200);
        assert_eq!(temp_prefix(&long).len(), TEMP_PREFIX_LIMIT + 1);
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test listing.
//!
//! Enumerates the tests of a suite file without running them. Loading a
//! suite can hang or crash, so the enumeration runs in a worker process
//! that is killed if it outlives the timeout.

mod descriptor;
mod error;
mod launch;
mod supervise;

pub use descriptor::{ListResult, TestDescriptor, TestPath, parse_descriptors};
pub use error::ListTestError;
pub use launch::{DEFAULT_RUNTIME, Launch, LaunchRequest, ProcessLauncher, Worker, WorkerExit};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Lists suite files through a launch strategy.
///
/// Each call to [`Lister::list`] owns its own worker, buffers and timer,
/// so a single `Lister` can serve concurrent requests.
#[derive(Clone)]
pub struct Lister {
    launcher: Arc<dyn Launch>,
}

impl Lister {
    /// Lister that spawns workers with the given runtime.
    pub fn new(runtime: Option<String>) -> Self {
        Self::with_launcher(ProcessLauncher::new(runtime))
    }

    /// Lister with a custom launch strategy.
    pub fn with_launcher(launcher: impl Launch + 'static) -> Self {
        Self {
            launcher: Arc::new(launcher),
        }
    }

    /// List the tests of `suite_file`.
    ///
    /// A zero `timeout` waits for the worker indefinitely.
    pub fn list(
        &self,
        timeout: Duration,
        interface: &Path,
        param: &str,
        suite_file: &Path,
    ) -> Result<ListResult, ListTestError> {
        let request = LaunchRequest {
            interface: interface.to_path_buf(),
            param: param.to_string(),
            suite_file: suite_file.to_path_buf(),
        };
        let suite = suite_file.display().to_string();

        tracing::debug!(
            "listing {} via {} (timeout: {:?})",
            suite,
            interface.display(),
            timeout
        );

        let worker = self.launcher.launch(&request).map_err(|e| {
            ListTestError::failed_to_process(&suite, format!("failed to spawn worker: {e}"), "")
        })?;

        let budget = (!timeout.is_zero()).then_some(timeout);
        supervise::supervise(worker, &suite, budget)
    }
}

impl Default for Lister {
    fn default() -> Self {
        Self::with_launcher(ProcessLauncher::default())
    }
}

impl std::fmt::Debug for Lister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lister").finish_non_exhaustive()
    }
}

/// List the tests of `suite_file` using the default `node` runtime.
pub fn list_tests_of_file(
    timeout: Duration,
    interface: &Path,
    param: &str,
    suite_file: &Path,
) -> Result<ListResult, ListTestError> {
    Lister::default().list(timeout, interface, param, suite_file)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel listing runner.
//!
//! Lists several suite files at once using rayon. Every file gets its own
//! worker and its own outcome, so one hanging or crashing suite doesn't
//! affect the others.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::config::ListSettings;
use crate::listing::Lister;
use crate::output::FileListing;

/// Lists suite files with shared settings.
pub struct ListRunner {
    lister: Lister,
    settings: ListSettings,
}

impl ListRunner {
    /// Runner that spawns workers with the configured runtime.
    pub fn new(settings: ListSettings) -> Self {
        let lister = Lister::new(settings.runtime.clone());
        Self::with_lister(lister, settings)
    }

    pub fn with_lister(lister: Lister, settings: ListSettings) -> Self {
        Self { lister, settings }
    }

    /// List each file; results keep the order of `files`.
    pub fn run(&self, files: &[PathBuf]) -> Vec<FileListing> {
        files
            .par_iter()
            .map(|file| {
                let outcome = self.lister.list(
                    self.settings.timeout,
                    &self.settings.interface,
                    &self.settings.param,
                    file,
                );
                if let Err(err) = &outcome {
                    tracing::debug!("{}: {}", file.display(), err.stack());
                }
                FileListing::new(file.clone(), outcome)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

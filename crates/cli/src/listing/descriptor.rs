// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test descriptors reported by a listing worker.
//!
//! The worker writes a single JSON array to stdout:
//! ```json
//! [{"path": {"file": "suite.js", "path": ["outer", "inner"]}, "skipped": true}]
//! ```
//! Optional fields are only present when a suite-level marker or override
//! applies; they are omitted again on serialization so the array round-trips.
//! Numeric overrides keep the worker's exact representation (`2000` stays
//! `2000`, `1500.5` stays `1500.5`).

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Location of a test: the suite file plus its title chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPath {
    pub file: String,
    /// Titles from the outermost describe block to the test itself.
    pub path: Vec<String>,
}

/// A single enumerated test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDescriptor {
    pub path: TestPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<bool>,
    /// Per-test timeout override in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Number>,
    /// Per-test slow threshold in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow: Option<Number>,
}

impl TestDescriptor {
    /// Descriptor with no overrides.
    pub fn new(file: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            path: TestPath {
                file: file.into(),
                path,
            },
            skipped: None,
            only: None,
            timeout: None,
            slow: None,
        }
    }

    /// Title chain joined for display, e.g. `outer > inner`.
    pub fn full_title(&self) -> String {
        self.path.path.join(" > ")
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.unwrap_or(false)
    }

    pub fn is_only(&self) -> bool {
        self.only.unwrap_or(false)
    }
}

/// Tests of one suite file, in the order the worker declared them.
pub type ListResult = Vec<TestDescriptor>;

/// Parse the worker's stdout buffer.
///
/// The whole buffer must be one JSON array; surrounding whitespace is
/// allowed, anything else (including an empty buffer) is an error.
pub fn parse_descriptors(stdout: &str) -> Result<ListResult, serde_json::Error> {
    serde_json::from_str(stdout)
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;

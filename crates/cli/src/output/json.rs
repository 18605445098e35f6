// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! One entry per suite file, in the order the files were given:
//! ```json
//! [
//!   {"file": "a.js", "tests": [{"path": {"file": "a.js", "path": ["t"]}}]},
//!   {"file": "b.js", "error": {"message": "...", "stack": "...", "timeout": false}}
//! ]
//! ```
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::FileListing;
use crate::listing::{ListTestError, TestDescriptor};

/// Serialized form of a listing failure.
#[derive(Debug, Serialize)]
pub struct ErrorOutput<'a> {
    pub message: &'a str,
    pub stack: &'a str,
    pub timeout: bool,
}

impl<'a> From<&'a ListTestError> for ErrorOutput<'a> {
    fn from(err: &'a ListTestError) -> Self {
        Self {
            message: err.message(),
            stack: err.stack(),
            timeout: err.is_timeout(),
        }
    }
}

/// Serialized form of one file's listing.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListingOutput<'a> {
    Listed {
        file: &'a Path,
        tests: &'a [TestDescriptor],
    },
    Failed {
        file: &'a Path,
        error: ErrorOutput<'a>,
    },
}

impl<'a> From<&'a FileListing> for ListingOutput<'a> {
    fn from(listing: &'a FileListing) -> Self {
        match &listing.outcome {
            Ok(tests) => ListingOutput::Listed {
                file: &listing.file,
                tests,
            },
            Err(err) => ListingOutput::Failed {
                file: &listing.file,
                error: err.into(),
            },
        }
    }
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, listings: &[FileListing]) -> std::io::Result<()> {
        let output: Vec<ListingOutput<'_>> = listings.iter().map(Into::into).collect();
        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

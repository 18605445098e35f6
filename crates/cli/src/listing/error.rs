// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Listing failures.
//!
//! Every way a listing can go wrong collapses into [`ListTestError`]:
//! - `Load`: the worker exited nonzero or wrote unparseable output
//! - `Timeout`: the worker did not finish within the configured budget

/// Error produced by a failed listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListTestError {
    /// Worker crashed, exited nonzero, or wrote malformed output.
    #[error("{message}")]
    Load {
        message: String,
        /// Message followed by the worker's stderr, if it wrote any.
        stack: String,
    },

    /// Worker was killed after exceeding the timeout.
    #[error("{message}")]
    Timeout { message: String },
}

impl ListTestError {
    /// Build a load error from a name and optional raw worker output.
    ///
    /// The stack is the name alone when there is no output, otherwise the
    /// name, a newline, and the output verbatim.
    pub fn new(name: impl Into<String>, output: Option<&str>) -> Self {
        let message = name.into();
        let stack = match output {
            Some(out) if !out.is_empty() => format!("{message}\n{out}"),
            _ => message.clone(),
        };
        ListTestError::Load { message, stack }
    }

    /// Worker failed while processing `suite_file`.
    pub fn failed_to_process(suite_file: &str, reason: impl std::fmt::Display, stderr: &str) -> Self {
        Self::new(
            format!("Failed to process {suite_file}: {reason}"),
            Some(stderr),
        )
    }

    /// Worker did not finish listing `suite_file` in time.
    pub fn timed_out(suite_file: &str) -> Self {
        ListTestError::Timeout {
            message: format!("Timed out while listing tests of {suite_file}"),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ListTestError::Load { message, .. } | ListTestError::Timeout { message } => message,
        }
    }

    /// Diagnostic text: the message plus any captured worker stderr.
    pub fn stack(&self) -> &str {
        match self {
            ListTestError::Load { stack, .. } => stack,
            ListTestError::Timeout { message } => message,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ListTestError::Timeout { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

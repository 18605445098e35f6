//! Output formatting for listing results.

pub mod json;
pub mod text;

use std::path::PathBuf;

use crate::listing::{ListResult, ListTestError};

/// Outcome of listing one suite file.
#[derive(Debug)]
pub struct FileListing {
    pub file: PathBuf,
    pub outcome: Result<ListResult, ListTestError>,
}

impl FileListing {
    pub fn new(file: impl Into<PathBuf>, outcome: Result<ListResult, ListTestError>) -> Self {
        Self {
            file: file.into(),
            outcome,
        }
    }

    pub fn listed(&self) -> bool {
        self.outcome.is_ok()
    }
}

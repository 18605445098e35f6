//! Locating suitelist.toml.
//!
//! An explicit `-C`/`SUITELIST_CONFIG` value always wins and may name either
//! the file or the directory holding it. Otherwise the working directory and
//! its ancestors are searched, ending at the first project boundary.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file names, in the order they are tried within one directory.
pub const CONFIG_FILES: &[&str] = &["suitelist.toml", ".suitelist.toml"];

/// Where the active configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line or in the environment.
    Explicit(PathBuf),
    /// Found while walking up from the working directory.
    Discovered(PathBuf),
    /// No file; built-in defaults apply.
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => Some(path.as_path()),
            ConfigSource::Defaults => None,
        }
    }
}

/// Decide which config file applies to a run started in `cwd`.
pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Result<ConfigSource> {
    let Some(explicit) = explicit else {
        return Ok(discover(cwd).map_or(ConfigSource::Defaults, ConfigSource::Discovered));
    };

    let explicit = if explicit.is_relative() {
        cwd.join(explicit)
    } else {
        explicit.to_path_buf()
    };

    if explicit.is_file() {
        return Ok(ConfigSource::Explicit(explicit));
    }
    if explicit.is_dir() {
        return config_in(&explicit)
            .map(ConfigSource::Explicit)
            .ok_or_else(|| Error::Config {
                message: format!(
                    "no {} in {}",
                    CONFIG_FILES.join(" or "),
                    explicit.display()
                ),
                path: Some(explicit.clone()),
            });
    }
    Err(Error::Config {
        message: format!("config file not found: {}", explicit.display()),
        path: Some(explicit),
    })
}

/// Search `start` and its ancestors.
///
/// A directory containing `.git` (a directory, or a file for worktrees and
/// submodules) is the last one searched.
pub fn discover(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if let Some(found) = config_in(dir) {
            tracing::debug!("discovered {}", found.display());
            return Some(found);
        }
        if dir.join(".git").exists() {
            tracing::trace!("stopping config search at {}", dir.display());
            break;
        }
    }
    None
}

fn config_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;

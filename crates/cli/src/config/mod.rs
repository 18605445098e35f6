// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles suitelist.toml parsing with version validation and unknown key warnings.

pub mod duration;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::listing::DEFAULT_RUNTIME;

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Timeout used when neither the CLI nor the config sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Known top-level keys.
const KNOWN_KEYS: &[&str] = &["version", "list"];

/// Known keys in the `[list]` table.
const LIST_KEYS: &[&str] = &["timeout", "interface", "param", "runtime"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Listing defaults.
    #[serde(default)]
    pub list: ListConfig,
}

/// `[list]` table. Every field is optional so it can be layered.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ListConfig {
    /// Worker timeout; zero disables it.
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub timeout: Option<Duration>,

    /// Interface module that enumerates a suite.
    pub interface: Option<PathBuf>,

    /// Parameter forwarded to the interface module.
    pub param: Option<String>,

    /// Program that runs the interface module (empty runs it directly).
    pub runtime: Option<String>,
}

/// Fully resolved listing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSettings {
    pub timeout: Duration,
    pub interface: PathBuf,
    pub param: String,
    pub runtime: Option<String>,
}

impl ListConfig {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: ListConfig) -> ListConfig {
        ListConfig {
            timeout: overrides.timeout.or(self.timeout),
            interface: overrides.interface.or(self.interface),
            param: overrides.param.or(self.param),
            runtime: overrides.runtime.or(self.runtime),
        }
    }

    /// Apply defaults. The interface module has no default.
    pub fn settings(self) -> Result<ListSettings> {
        let interface = self.interface.ok_or_else(|| {
            Error::Argument(
                "no interface module: pass --interface or set list.interface in suitelist.toml"
                    .to_string(),
            )
        })?;

        Ok(ListSettings {
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            interface,
            param: self.param.unwrap_or_default(),
            runtime: Some(
                self.runtime
                    .unwrap_or_else(|| DEFAULT_RUNTIME.to_string()),
            )
            .filter(|r| !r.trim().is_empty()),
        })
    }

    /// Resolve a relative interface path against `base`.
    fn anchor(&mut self, base: &Path) {
        if let Some(interface) = &self.interface
            && interface.is_relative()
        {
            self.interface = Some(base.join(interface));
        }
    }
}

/// Load config from a file, warning on unknown keys.
///
/// A relative `list.interface` is resolved against the config file's directory.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = parse_with_warnings(&content, path)?;
    if let Some(base) = path.parent() {
        config.list.anchor(base);
    }
    Ok(config)
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    // First check version
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade suitelist to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let config = parse(content, path)?;

    // Parse already succeeded, so the content is a valid table.
    if let Ok(table) = content.parse::<toml::Table>() {
        for key in unknown_keys(&table) {
            warn_unknown_key(path, &key);
        }
    }

    Ok(config)
}

/// Dotted names of keys this version does not recognize.
fn unknown_keys(table: &toml::Table) -> Vec<String> {
    let mut unknown = Vec::new();
    for (key, value) in table {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            unknown.push(key.clone());
        } else if key == "list"
            && let Some(list) = value.as_table()
        {
            for sub in list.keys() {
                if !LIST_KEYS.contains(&sub.as_str()) {
                    unknown.push(format!("list.{sub}"));
                }
            }
        }
    }
    unknown
}

fn warn_unknown_key(path: &Path, key: &str) {
    tracing::warn!("{}: unrecognized field `{}`", path.display(), key);
    eprintln!(
        "suitelist: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

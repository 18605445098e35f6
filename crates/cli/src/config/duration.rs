// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration parsing for listing timeouts.
//!
//! Supports formats:
//! - `"10s"` → 10 seconds
//! - `"500ms"` → 500 milliseconds
//! - `"1m"` → 1 minute
//! - `"1.5s"` → 1.5 seconds
//! - `"2000"` → 2000 milliseconds
//!
//! A zero duration disables the listing timeout.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Parse a duration string into a Duration.
///
/// A bare integer is taken as milliseconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    if s.starts_with('-') {
        return Err(format!("negative duration: {s}"));
    }

    if let Ok(ms) = s.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }

    // Check for milliseconds first (longer suffix)
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_millis(n));
    }

    // Check for seconds (supports fractional)
    if let Some(secs) = s.strip_suffix('s') {
        let n: f64 = secs
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        if !n.is_finite() {
            return Err(format!("invalid duration: {s}"));
        }
        return Ok(Duration::from_secs_f64(n));
    }

    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_secs(n * 60));
    }

    Err(format!(
        "invalid duration format: {s} (use 10s, 500ms, 1m, or milliseconds)"
    ))
}

/// Duration as written in config: a string with a unit, or milliseconds.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Millis(u64),
    Text(String),
}

/// Deserialize an optional duration.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<RawDuration> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(RawDuration::Millis(ms)) => Ok(Some(Duration::from_millis(ms))),
        Some(RawDuration::Text(s)) => parse_duration(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;

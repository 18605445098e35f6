// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection logic:
//! 1. `--no-color` or NO_COLOR env var → no color
//! 2. `--color` or COLOR env var → use color
//! 3. default:
//!    - If not stdout.is_tty() → no color
//!    - If CI env var set → no color
//!    - Else → use color

use std::io::IsTerminal;
use termcolor::ColorChoice;

/// Resolve color choice from CLI flags and environment variables.
///
/// Priority: --no-color > --color > NO_COLOR > COLOR > auto-detect
pub fn resolve_color(force: bool, disable: bool) -> ColorChoice {
    if disable {
        return ColorChoice::Never;
    }
    if force {
        return ColorChoice::Always;
    }
    // NO_COLOR convention: any value (including empty) disables color
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || std::env::var_os("CI").is_some() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for listing output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// Cyan suite file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Bold test title.
    pub fn title() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Yellow `[skip]` marker.
    pub fn skip() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        spec
    }

    /// Magenta `[only]` marker.
    pub fn only() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Magenta)).set_bold(true);
        spec
    }

    /// Dim timing overrides.
    pub fn context() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    /// Red "error" indicator.
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;

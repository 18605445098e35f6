// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::ListConfig;
use crate::config::duration::parse_duration;

/// Enumerate the tests of suite files in isolated, time-bounded workers
#[derive(Parser)]
#[command(name = "suitelist")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SUITELIST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the tests of one or more suite files
    List(ListArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Suite files to enumerate
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Interface module that loads a suite and prints its tests
    #[arg(long, value_name = "PATH")]
    pub interface: Option<PathBuf>,

    /// Parameter forwarded to the interface module
    #[arg(long, value_name = "STRING")]
    pub param: Option<String>,

    /// Worker timeout (e.g. 10s, 500ms, 1m, or milliseconds); 0 disables it
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Program that runs the interface module (empty runs it directly)
    #[arg(long, value_name = "PROGRAM")]
    pub runtime: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

impl ListArgs {
    /// Settings given on the command line, to be layered over the config file.
    pub fn overrides(&self) -> ListConfig {
        ListConfig {
            timeout: self.timeout,
            interface: self.interface.clone(),
            param: self.param.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

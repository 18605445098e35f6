// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! List command implementation.

use std::io::Write;

use termcolor::StandardStream;

use suitelist::cli::{Cli, ListArgs, OutputFormat};
use suitelist::color::resolve_color;
use suitelist::config::{self, Config};
use suitelist::discovery;
use suitelist::error::{Error, ExitCode};
use suitelist::output::json::JsonFormatter;
use suitelist::output::text::TextFormatter;
use suitelist::runner::ListRunner;

/// Run the list command.
pub fn run(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().map_err(|e| Error::Io {
        path: ".".into(),
        source: e,
    })?;

    let source = discovery::locate(cli.config.as_deref(), &cwd)?;
    let config = match source.path() {
        Some(path) => {
            tracing::debug!("loading config from {} ({:?})", path.display(), source);
            config::load(path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let settings = config.list.merge(args.overrides()).settings()?;
    tracing::trace!("list command starting: {:?}", settings);

    let listings = ListRunner::new(settings).run(&args.files);

    match args.output {
        OutputFormat::Text => {
            let stdout = StandardStream::stdout(resolve_color(args.color, args.no_color));
            let mut formatter = TextFormatter::new(stdout.lock());
            for listing in &listings {
                formatter.write_listing(listing)?;
            }
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            JsonFormatter::new(&mut handle).write(&listings)?;
            handle.flush()?;
        }
    }

    if listings.iter().all(|l| l.listed()) {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ListFailed)
    }
}

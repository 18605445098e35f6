//! Text output formatter.
//!
//! ```text
//! <file>: <outer> > <inner> [skip] [only] timeout=<ms>ms slow=<ms>ms
//! <file>: no tests
//! <file>: error: <message>
//!     <worker stderr>
//! ```

use termcolor::WriteColor;

use super::FileListing;
use crate::color::scheme;
use crate::listing::{ListTestError, TestDescriptor};

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl<W: WriteColor> TextFormatter<W> {
    /// Create a new text formatter.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one file's listing (streaming).
    pub fn write_listing(&mut self, listing: &FileListing) -> std::io::Result<()> {
        let file = listing.file.display().to_string();
        match &listing.outcome {
            Ok(tests) if tests.is_empty() => self.write_empty(&file),
            Ok(tests) => {
                for test in tests {
                    self.write_test(&file, test)?;
                }
                Ok(())
            }
            Err(err) => self.write_error(&file, err),
        }
    }

    fn write_test(&mut self, file: &str, test: &TestDescriptor) -> std::io::Result<()> {
        self.write_file(file)?;

        self.out.set_color(&scheme::title())?;
        write!(self.out, "{}", test.full_title())?;
        self.out.reset()?;

        if test.is_skipped() {
            write!(self.out, " ")?;
            self.out.set_color(&scheme::skip())?;
            write!(self.out, "[skip]")?;
            self.out.reset()?;
        }
        if test.is_only() {
            write!(self.out, " ")?;
            self.out.set_color(&scheme::only())?;
            write!(self.out, "[only]")?;
            self.out.reset()?;
        }

        self.out.set_color(&scheme::context())?;
        if let Some(timeout) = &test.timeout {
            write!(self.out, " timeout={timeout}ms")?;
        }
        if let Some(slow) = &test.slow {
            write!(self.out, " slow={slow}ms")?;
        }
        self.out.reset()?;

        writeln!(self.out)
    }

    fn write_empty(&mut self, file: &str) -> std::io::Result<()> {
        self.write_file(file)?;
        self.out.set_color(&scheme::context())?;
        write!(self.out, "no tests")?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn write_error(&mut self, file: &str, err: &ListTestError) -> std::io::Result<()> {
        self.write_file(file)?;

        self.out.set_color(&scheme::fail())?;
        write!(self.out, "error")?;
        self.out.reset()?;
        writeln!(self.out, ": {}", err.message())?;

        // The stack repeats the message; only the worker's diagnostic follows it.
        let detail = err
            .stack()
            .strip_prefix(err.message())
            .unwrap_or(err.stack())
            .trim();
        for line in detail.lines() {
            writeln!(self.out, "    {line}")?;
        }
        Ok(())
    }

    fn write_file(&mut self, file: &str) -> std::io::Result<()> {
        self.out.set_color(&scheme::path())?;
        write!(self.out, "{file}")?;
        self.out.reset()?;
        write!(self.out, ": ")
    }

    /// Consume the formatter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;

//! Build-tool compatible diagnostic output
//!
//! Every line has the shape `file(line): <severity>[ CODE]: message`, which
//! IDEs and build systems pick up without extra configuration.

use super::CompileError;
use crate::engine::Warning;
use std::io::{self, Write};

/// Writes diagnostics, one per line, to any sink (stderr in the binary)
pub struct DiagnosticReporter<W: Write> {
    writer: W,
}

impl<W: Write> DiagnosticReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// `{file}({line}): error {code}: {message}`
    pub fn report_error(&mut self, file: &str, error: &CompileError) {
        let line = format_error(file, error);
        self.emit(&line);
    }

    /// `{file}({line}): warning: {message}`
    pub fn report_warning(&mut self, file: &str, warning: &Warning) {
        let line = format!("{}({}): warning: {}", file, warning.line, warning.message);
        self.emit(&line);
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, line: &str) {
        // A closed stderr must not turn a compile failure into a panic.
        if let Err(err) = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush()) {
            log::debug!("dropping diagnostic, sink failed: {err}");
        }
    }
}

impl DiagnosticReporter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

/// Formats a compile error in the stable `FAC1000`/`FAC2000` shape
pub fn format_error(file: &str, error: &CompileError) -> String {
    format!("{}({}): error {}: {}", file, error.line(), error.code(), error)
}

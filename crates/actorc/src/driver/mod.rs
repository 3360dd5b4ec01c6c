//! Compilation driver: read, translate, publish
//!
//! [`Driver::run`] is the single place where failures are caught. Every run
//! ends with an [`ExitStatus`] and at most one error line on the diagnostic
//! sink.

pub mod publish;

use crate::common::{CompileError, CompileResult, DiagnosticReporter, ExitStatus};
use crate::config::RunConfig;
use crate::engine::{SourceUnit, Translation, TranslationEngine};
use anyhow::Context;
use std::any::Any;
use std::fs;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

pub use publish::PublishIntent;

/// Runs one input/output pair through an engine
pub struct Driver<'e> {
    engine: &'e dyn TranslationEngine,
}

impl<'e> Driver<'e> {
    pub fn new(engine: &'e dyn TranslationEngine) -> Self {
        Self { engine }
    }

    /// Compile `config.input()` into `config.output()`.
    ///
    /// On failure any temp file and any previous output are removed, so a
    /// build never picks up stale generated code.
    pub fn run<W: Write>(
        &self,
        config: &RunConfig,
        reporter: &mut DiagnosticReporter<W>,
    ) -> ExitStatus {
        let file = config.input().display().to_string();
        let intent = PublishIntent::new(config.output());

        match self.compile(config, &intent, reporter, &file) {
            Ok(()) => ExitStatus::Success,
            Err(err) => {
                intent.discard();
                intent.retract();
                log::debug!("{file}: compile failed ({})", err.code());
                reporter.report_error(&file, &err);
                err.exit_status()
            }
        }
    }

    fn compile<W: Write>(
        &self,
        config: &RunConfig,
        intent: &PublishIntent,
        reporter: &mut DiagnosticReporter<W>,
        file: &str,
    ) -> CompileResult<()> {
        let source = fs::read_to_string(config.input())
            .with_context(|| format!("reading {file}"))?;

        let translation = self.translate(&source, config)?;
        for warning in &translation.warnings {
            reporter.report_warning(file, warning);
        }

        intent.publish(&translation.text)?;
        Ok(())
    }

    fn translate(&self, source: &str, config: &RunConfig) -> CompileResult<Translation> {
        let unit = SourceUnit::new(source, config.input(), config.output());
        let options = config.engine_options();
        log::debug!(
            "translating {} with the {} engine ({options:?})",
            unit.input_path,
            self.engine.name()
        );

        panic::catch_unwind(AssertUnwindSafe(|| self.engine.translate(&unit, &options)))
            .unwrap_or_else(|payload| {
                Err(CompileError::internal(format!(
                    "translation engine panicked: {}",
                    panic_message(payload.as_ref())
                )))
            })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

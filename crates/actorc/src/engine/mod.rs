//! Translation engine boundary
//!
//! The driver only depends on the [`TranslationEngine`] trait: it hands over
//! the source text with normalized paths and gets back either the translated
//! text or a [`CompileError`]. [`ActorEngine`] is the engine shipped with the
//! binary.

mod actor;
mod emit;
pub mod lexer;

use crate::common::CompileResult;
use std::path::Path;

pub use actor::{ActorDecl, ActorEngine, ActorScanner};

/// Options forwarded from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Warn about actors whose body never waits
    pub warn_actor_without_wait: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            warn_actor_without_wait: true,
        }
    }
}

/// One file handed to the engine
#[derive(Debug, Clone)]
pub struct SourceUnit<'a> {
    pub text: &'a str,
    /// Input path with `/` separators
    pub input_path: String,
    /// Output path with `/` separators
    pub output_path: String,
}

impl<'a> SourceUnit<'a> {
    pub fn new(text: &'a str, input: &Path, output: &Path) -> Self {
        Self {
            text,
            input_path: normalize_path(input),
            output_path: normalize_path(output),
        }
    }
}

/// Non-fatal finding; never changes the exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub line: usize,
    pub message: String,
}

impl Warning {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Successful engine result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub warnings: Vec<Warning>,
}

/// Trait for translation engines
///
/// Implementations report malformed input as `CompileError::Source` and
/// anything else as `CompileError::Internal`. Panics are caught by the driver.
pub trait TranslationEngine {
    /// The name of this engine (e.g., "actor")
    fn name(&self) -> &'static str;

    fn translate(&self, unit: &SourceUnit<'_>, options: &EngineOptions)
    -> CompileResult<Translation>;
}

/// Render a path with `/` separators regardless of host conventions
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

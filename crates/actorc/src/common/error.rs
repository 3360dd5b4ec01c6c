//! Error types and exit status mapping

use std::process::ExitCode;
use thiserror::Error;

/// Diagnostic code for errors attributed to a line of the input file
pub const SOURCE_ERROR_CODE: &str = "FAC1000";

/// Diagnostic code for everything else
pub const INTERNAL_ERROR_CODE: &str = "FAC2000";

/// Compile failure, either pinned to a source line or internal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Malformed input reported by the translation engine
    #[error("{message}")]
    Source { line: usize, message: String },

    /// I/O failure, engine panic, or anything without a source location
    #[error("Internal {0}")]
    Internal(String),
}

impl CompileError {
    /// Lines are 1-based; a zero line is clamped to 1.
    pub fn source_error(line: usize, message: impl Into<String>) -> Self {
        Self::Source {
            line: line.max(1),
            message: message.into(),
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal(details.into())
    }

    /// Line reported in the diagnostic. Internal errors always report line 1.
    pub fn line(&self) -> usize {
        match self {
            CompileError::Source { line, .. } => *line,
            CompileError::Internal(_) => 1,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Source { .. } => SOURCE_ERROR_CODE,
            CompileError::Internal(_) => INTERNAL_ERROR_CODE,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        match self {
            CompileError::Source { .. } => ExitStatus::SourceError,
            CompileError::Internal(_) => ExitStatus::InternalError,
        }
    }
}

impl From<anyhow::Error> for CompileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Malformed invocation, detected before any file is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected <input> <output>, got {given} argument(s)")]
    Usage { given: usize },
}

impl ConfigError {
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::Usage
    }
}

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    SourceError,
    InternalError,
    /// Reserved for malformed invocations
    Usage,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::SourceError => 1,
            ExitStatus::InternalError => 3,
            ExitStatus::Usage => 100,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

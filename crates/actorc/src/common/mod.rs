//! Common infrastructure shared by the driver and the engine

mod diagnostic;
mod error;

pub use diagnostic::{DiagnosticReporter, format_error};
pub use error::{
    CompileError, CompileResult, ConfigError, ExitStatus, INTERNAL_ERROR_CODE, SOURCE_ERROR_CODE,
};

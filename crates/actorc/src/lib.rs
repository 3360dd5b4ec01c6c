//! actorcompiler - driver for the actor-to-C++ source translator
//!
//! This library reads one `.actor.*` source file, hands it to a translation
//! engine, and publishes the translated file atomically.
//!
//! ## Architecture
//!
//! - **Config** (`config`): command-line resolution into a `RunConfig`
//! - **Driver** (`driver/`): read -> translate -> publish, failure mapping
//! - **Engine** (`engine/`): translation engine trait and the actor engine
//! - **Common** (`common/`): error taxonomy and diagnostic output

pub mod common;
pub mod config;
pub mod driver;
pub mod engine;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, ConfigError, DiagnosticReporter, ExitStatus};
pub use config::{Flag, RunConfig};
pub use driver::{Driver, PublishIntent};
pub use engine::{ActorEngine, EngineOptions, SourceUnit, Translation, TranslationEngine};

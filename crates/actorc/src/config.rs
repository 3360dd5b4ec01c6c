//! Command-line resolution into an immutable run configuration
//!
//! Usage: actorcompiler <input> <output> [--disable-actor-without-wait-warning]
//!
//! The first two arguments are always the paths. Tokens after them are
//! scanned for known flags; anything else is ignored so newer build scripts
//! keep working with older compilers.

use crate::common::ConfigError;
use crate::engine::EngineOptions;
use clap::Parser as ClapParser;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Binary name used in the echo line and the usage text
pub const PROGRAM: &str = "actorcompiler";

pub const USAGE: &str =
    "Usage:\n  actorcompiler <input> <output> [--disable-actor-without-wait-warning]";

/// Optional behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// Do not warn about actors that never wait
    DisableActorWithoutWaitWarning,
}

impl Flag {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "--disable-actor-without-wait-warning" => Some(Flag::DisableActorWithoutWaitWarning),
            _ => None,
        }
    }
}

/// Tokens following the two paths
#[derive(ClapParser, Debug)]
#[command(name = PROGRAM)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Flags {
    /// Flags; unrecognized ones are ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<OsString>,
}

/// Resolved invocation. Never mutated after `resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    input: PathBuf,
    output: PathBuf,
    options: BTreeSet<Flag>,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options: BTreeSet::new(),
        }
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.options.insert(flag);
        self
    }

    /// Resolve `args` (without the program name).
    ///
    /// The first two arguments are the input and output paths, whatever they
    /// look like. A well-formed invocation is echoed to `echo` as
    /// `actorcompiler <args...>` before flags are interpreted. Fewer than two
    /// arguments fail with [`ConfigError::Usage`] and nothing is echoed.
    pub fn resolve<W: Write>(args: &[OsString], echo: &mut W) -> Result<Self, ConfigError> {
        let [input, output, rest @ ..] = args else {
            return Err(ConfigError::Usage { given: args.len() });
        };

        let shown: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        if let Err(err) = writeln!(echo, "{} {}", PROGRAM, shown.join(" ")) {
            log::debug!("failed to echo command line: {err}");
        }

        let argv = std::iter::once(OsString::from(PROGRAM)).chain(rest.iter().cloned());
        let tokens = Flags::try_parse_from(argv).map_or_else(
            |err| {
                log::debug!("scanning flags without clap: {err}");
                rest.to_vec()
            },
            |flags| flags.tokens,
        );

        let mut options = BTreeSet::new();
        for token in &tokens {
            match token.to_str().and_then(Flag::from_token) {
                Some(flag) => {
                    options.insert(flag);
                }
                None => log::debug!("ignoring unrecognized argument {token:?}"),
            }
        }

        Ok(Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            options,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.options.contains(&flag)
    }

    /// Options forwarded to the translation engine
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            warn_actor_without_wait: !self.has_flag(Flag::DisableActorWithoutWaitWarning),
        }
    }
}

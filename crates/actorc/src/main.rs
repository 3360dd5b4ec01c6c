//! actorcompiler - translate one actor source file
//!
//! Usage: actorcompiler <input> <output> [--disable-actor-without-wait-warning]
//!
//! Exit codes: 0 success, 1 source error, 3 internal error, 100 usage.

use actor_compiler::config::USAGE;
use actor_compiler::{ActorEngine, DiagnosticReporter, Driver, RunConfig};
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    init_panic_hook();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let config = match RunConfig::resolve(&args, &mut io::stdout()) {
        Ok(config) => config,
        Err(err) => {
            log::debug!("{err}");
            // The exit code still reports the usage error if stdout is gone.
            if let Err(write_err) = writeln!(io::stdout(), "{USAGE}") {
                log::debug!("failed to print usage: {write_err}");
            }
            return err.exit_status().into();
        }
    };

    let engine = ActorEngine::new();
    let mut reporter = DiagnosticReporter::stderr();
    Driver::new(&engine).run(&config, &mut reporter).into()
}

/// Engine panics are reported as a single FAC2000 line by the driver, so the
/// default hook's stderr output is routed to the log instead.
fn init_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        log::debug!("panic: {info}");
    }));
}

//! Integration tests for the `actorcompiler` binary.
//!
//! Covers exit codes, stdout/stderr separation, and what is left on disk
//! after each kind of run.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::{contains, starts_with};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Binary running in `dir`, with logging forced off so stderr only carries
/// diagnostics.
fn actorcompiler(dir: &Path) -> Command {
    let mut command = cargo_bin_cmd!("actorcompiler");
    command.current_dir(dir).env_remove("RUST_LOG");
    command
}

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn usage_goes_to_stdout_with_code_100() {
    let dir = TempDir::new().unwrap();
    let mut command = actorcompiler(dir.path());
    command.arg("only-input.actor.cpp");
    command
        .assert()
        .code(100)
        .stdout(contains("Usage:"))
        .stdout(contains("actorcompiler <input> <output> [--disable-actor-without-wait-warning]"))
        .stderr("");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn no_arguments_is_usage() {
    let dir = TempDir::new().unwrap();
    let mut command = actorcompiler(dir.path());
    command.assert().code(100).stdout(starts_with("Usage:"));
}

#[test]
fn successful_compile() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "f.actor.cpp", "ACTOR void f(){ wait(g()); }\n");

    let mut command = actorcompiler(dir.path());
    command.args(["f.actor.cpp", "f.g.cpp"]);
    command
        .assert()
        .success()
        .stdout("actorcompiler f.actor.cpp f.g.cpp\n")
        .stderr("");

    let output = dir.path().join("f.g.cpp");
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "// Generated by actorcompiler from f.actor.cpp into f.g.cpp. Do not edit.\n\
         #line 1 \"f.actor.cpp\"\n\
         ACTOR void f(){ wait(g()); }\n"
    );
    assert!(fs::metadata(&output).unwrap().permissions().readonly());
    assert!(!dir.path().join("f.g.cpp.tmp").exists());
}

#[test]
fn second_run_replaces_readonly_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "f.actor.cpp", "ACTOR void f(){ wait(g()); }\n");

    let output = dir.path().join("f.g.cpp");

    actorcompiler(dir.path()).args(["f.actor.cpp", "f.g.cpp"]).assert().success();
    let first = fs::read(&output).unwrap();
    actorcompiler(dir.path()).args(["f.actor.cpp", "f.g.cpp"]).assert().success();

    assert_eq!(fs::read(&output).unwrap(), first);
    assert!(fs::metadata(&output).unwrap().permissions().readonly());
}

#[test]
fn source_error_reports_fac1000_and_removes_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "foo.actor.h", "#pragma once\n\nACTOR int f() { wait(x); }\n");
    write(dir.path(), "foo.g.h", "stale");

    let mut command = actorcompiler(dir.path());
    command.args(["foo.actor.h", "foo.g.h"]);
    command
        .assert()
        .code(1)
        .stderr("foo.actor.h(3): error FAC1000: ACTOR must return Future<T> or void\n");

    assert!(!dir.path().join("foo.g.h").exists());
    assert!(!dir.path().join("foo.g.h.tmp").exists());
}

#[test]
fn missing_input_reports_fac2000() {
    let dir = TempDir::new().unwrap();

    let mut command = actorcompiler(dir.path());
    command.args(["absent.actor.cpp", "absent.g.cpp"]);
    command
        .assert()
        .code(3)
        .stderr(starts_with(
            "absent.actor.cpp(1): error FAC2000: Internal reading absent.actor.cpp",
        ));

    assert!(!dir.path().join("absent.g.cpp").exists());
    assert!(!dir.path().join("absent.g.cpp.tmp").exists());
}

#[test]
fn warning_flag_silences_actor_without_wait() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "idle.actor.cpp", "ACTOR Future<Void> idle() { return Void(); }\n");

    let mut command = actorcompiler(dir.path());
    command.args(["idle.actor.cpp", "idle.g.cpp"]);
    command
        .assert()
        .success()
        .stderr("idle.actor.cpp(1): warning: ACTOR idle does not contain a wait() statement\n");

    let mut command = actorcompiler(dir.path());
    command.args([
        "idle.actor.cpp",
        "idle.g.cpp",
        "--disable-actor-without-wait-warning",
    ]);
    command.assert().success().stderr("");
}

#[test]
fn unknown_flags_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "f.actor.cpp", "ACTOR void f(){ wait(g()); }\n");

    let mut command = actorcompiler(dir.path());
    command.args(["f.actor.cpp", "f.g.cpp", "--generate-traces", "-v"]);
    command
        .assert()
        .success()
        .stdout("actorcompiler f.actor.cpp f.g.cpp --generate-traces -v\n");
    assert!(dir.path().join("f.g.cpp").exists());
}

#[test]
fn unterminated_comment_reports_its_line() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "c.actor.cpp", "void f() {}\n/* x\n");

    let mut command = actorcompiler(dir.path());
    command.args(["c.actor.cpp", "c.g.cpp"]);
    command
        .assert()
        .code(1)
        .stderr("c.actor.cpp(2): error FAC1000: unterminated block comment\n");
    assert!(!dir.path().join("c.g.cpp").exists());
}

#[test]
fn double_dash_is_taken_as_the_output_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "f.actor.cpp", "ACTOR void f(){ wait(g()); }\n");

    let mut command = actorcompiler(dir.path());
    command.args(["f.actor.cpp", "--", "f.g.cpp"]);
    command
        .assert()
        .success()
        .stdout("actorcompiler f.actor.cpp -- f.g.cpp\n");

    assert!(dir.path().join("--").exists());
    assert!(!dir.path().join("f.g.cpp").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_paths_are_used_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let input = OsStr::from_bytes(b"caf\xe9.actor.cpp");
    let output = OsStr::from_bytes(b"caf\xe9.g.cpp");
    fs::write(dir.path().join(input), "ACTOR void f(){ wait(g()); }\n").unwrap();

    let mut command = actorcompiler(dir.path());
    command.arg(input).arg(output);
    command.assert().success().stderr("");

    assert!(dir.path().join(output).exists());
}

/// Usage and the echo line go to a stdout that rejects every write
#[cfg(target_os = "linux")]
fn with_full_stdout(dir: &Path, args: &[&str]) -> std::process::Output {
    use std::fs::File;
    use std::process::Stdio;

    let full = File::options().write(true).open("/dev/full").unwrap();
    std::process::Command::new(env!("CARGO_BIN_EXE_actorcompiler"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .stdout(Stdio::from(full))
        .stderr(Stdio::piped())
        .output()
        .unwrap()
}

#[cfg(target_os = "linux")]
#[test]
fn usage_with_failing_stdout_still_exits_100() {
    let dir = TempDir::new().unwrap();

    let output = with_full_stdout(dir.path(), &["only-input.actor.cpp"]);

    assert_eq!(output.status.code(), Some(100));
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");
}

#[cfg(target_os = "linux")]
#[test]
fn compile_with_failing_stdout_still_succeeds() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "f.actor.cpp", "ACTOR void f(){ wait(g()); }\n");

    let output = with_full_stdout(dir.path(), &["f.actor.cpp", "f.g.cpp"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("f.g.cpp").exists());
}

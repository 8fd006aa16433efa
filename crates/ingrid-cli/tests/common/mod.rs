//! Common test utilities shared across integration tests.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Path of the `ingrid` binary built for these tests
pub fn ingrid_binary() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_ingrid"))
}

/// Run the ingrid binary with `args`, feeding `stdin` to it
pub fn run_ingrid(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(ingrid_binary())
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute ingrid binary");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write to ingrid stdin");

    child
        .wait_with_output()
        .expect("Failed to wait for ingrid binary")
}

/// Standard output as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Standard error as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

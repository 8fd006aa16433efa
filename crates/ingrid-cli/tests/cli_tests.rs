//! Integration tests for the ingrid CLI.
//!
//! These tests verify the end-to-end behavior of the binary.

use rstest::{fixture, rstest};
use std::io::Write;
use tempfile::NamedTempFile;

mod common;
use common::{run_ingrid, stderr, stdout};

const REFERENCE: &str = r#"# generic things
debug = false
# default for servers
bind= localhost:80

[example]
text = "escaped \""
hostname = "example.com"
more = 'single "quoted" string'

[github]
hostname=github.com
bind=localhost:443

# invalid lines
color
my name = john
[trouble
text='...
"#;

const CLEAN: &str = "[server]\nhost = localhost\nport = 8080\n";

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a temporary file holding a document without errors
#[fixture]
fn clean_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(CLEAN.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ingrid(&["--help"], "");
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("ingrid"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--strict"));
}

#[test]
fn test_cli_version() {
    let output = run_ingrid(&["--version"], "");
    assert!(output.status.success());
    assert!(stdout(&output).contains("0.1.0"));
}

// ============================================================================
// Mapping Tests
// ============================================================================

#[test]
fn test_reference_document_from_stdin() {
    let output = run_ingrid(&[], REFERENCE);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "debug = false\n\
         bind = localhost:80\n\
         example.text = escaped \"\n\
         example.hostname = example.com\n\
         example.more = single \"quoted\" string\n\
         github.hostname = github.com\n\
         github.bind = localhost:443\n"
    );
    assert_eq!(
        stderr(&output),
        "input line:16 color SYNTAX ERROR: missing equal sign\n\
         input line:17 my name = john SYNTAX ERROR: space not allowed in key\n\
         input line:18 [trouble SYNTAX ERROR: missing right bracket\n\
         input line:19 text='... SYNTAX ERROR: missing end quote\n"
    );
}

#[rstest]
fn test_clean_file_succeeds(clean_file: NamedTempFile) {
    let path = clean_file.path().to_str().expect("temp path should be UTF-8");
    let output = run_ingrid(&[path], "");

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "server.host = localhost\nserver.port = 8080\n");
    assert!(stderr(&output).is_empty());
}

#[rstest]
#[case::omitted(&[])]
#[case::dash(&["-"])]
fn test_reads_stdin(#[case] args: &[&str]) {
    let output = run_ingrid(args, CLEAN);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "server.host = localhost\nserver.port = 8080\n");
}

#[test]
fn test_quiet_hides_errors_but_keeps_exit_code() {
    let output = run_ingrid(&["--quiet"], REFERENCE);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).is_empty());
    assert!(stdout(&output).contains("github.bind = localhost:443"));
}

#[test]
fn test_json_output() {
    let output = run_ingrid(&["--json"], REFERENCE);
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("output should be valid JSON");
    let entries = json["entries"].as_array().expect("entries should be an array");
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[4]["section"], "example");
    assert_eq!(entries[4]["key"], "more");
    assert_eq!(entries[4]["value"], "single \"quoted\" string");

    let errors = json["errors"].as_array().expect("errors should be an array");
    assert_eq!(errors.len(), 4);
    assert_eq!(errors[0]["line_number"], 16);
    assert_eq!(errors[3]["kind"], "missing_end_quote");
}

#[test]
fn test_strict_aborts_on_first_error() {
    let output = run_ingrid(&["--strict"], REFERENCE);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let stderr = stderr(&output);
    assert!(stderr.contains("failed to map standard input"), "{stderr}");
    assert!(stderr.contains("16 color SYNTAX ERROR: missing equal sign"), "{stderr}");
    assert!(!stderr.contains("line 17"), "{stderr}");
}

#[rstest]
fn test_strict_clean_file_succeeds(clean_file: NamedTempFile) {
    let path = clean_file.path().to_str().expect("temp path should be UTF-8");
    let output = run_ingrid(&["--strict", path], "");
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn test_starting_section() {
    let output = run_ingrid(&["--section", "defaults"], "debug = true\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "defaults.debug = true\n");
}

#[test]
fn test_missing_file_fails() {
    let output = run_ingrid(&["/definitely/not/here.ini"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to open /definitely/not/here.ini"));
}

//! End-to-end tests for the checkers binary

use std::io::Write;
use std::process::{Command, Stdio};

fn checkers(args: &[&str], stdin: &str) -> (bool, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_checkers"))
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    // The process may exit before reading its input
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    let output = child.wait_with_output().unwrap();
    (output.status.success(), String::from_utf8(output.stdout).unwrap())
}

#[test]
fn test_board_command() {
    let (ok, stdout) = checkers(&["board"], "");
    assert!(ok);
    assert!(stdout.contains("7 [r][ ][r][ ][r][ ][r][ ]"));
}

#[test]
fn test_play_forced_capture() {
    let script = "5 2 4 3\n2 5 3 4\n4 3 3 2\n4 3 2 5\nquit\n";
    let (ok, stdout) = checkers(&["play"], script);
    assert!(ok);
    assert!(stdout.contains("ERROR: Jump required!"));
    assert_eq!(stdout.matches("INFO: Move accepted.").count(), 3);
}

#[test]
fn test_missing_rules_file_fails() {
    let (ok, _) = checkers(&["play", "--rules", "/nonexistent/rules.json"], "quit\n");
    assert!(!ok);
}

//! Shared helpers for tests that execute the `move-resource` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Path to the binary under test.
pub fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_move-resource"))
}

/// Run the binary with `args`, feeding `stdin`, with color disabled.
pub fn run(args: &[&str], stdin: &str, envs: &[(&str, &Path)]) -> Output {
    let mut child = Command::new(binary())
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn move-resource");
    // The binary may exit (e.g. on an argument error) before reading stdin.
    if let Err(err) = child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
    {
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe, "write stdin: {err}");
    }
    child.wait_with_output().expect("wait for move-resource")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Assert that `needles` appear in `haystack` in the given order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut rest = haystack;
    for needle in needles {
        let Some(index) = rest.find(needle) else {
            panic!("expected {needle:?} (in order) in output:\n{haystack}");
        };
        rest = &rest[index + needle.len()..];
    }
}

//! Common test utilities shared across integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Store file name used by the helpers, relative to the test directory.
pub const STORE_FILE: &str = "graph.json";

/// Path of the test store inside `dir`.
pub fn store_path(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE)
}

/// Command for the built depgraph binary, isolated from the caller's
/// environment and running inside `dir`.
pub fn depgraph_command(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_depgraph"));
    command
        .current_dir(dir)
        .env_remove("DEPGRAPH_STORE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    command
}

/// Run depgraph in `dir` against the test store.
pub fn run_depgraph(dir: &Path, args: &[&str]) -> Output {
    depgraph_command(dir)
        .arg("--store")
        .arg(store_path(dir))
        .args(args)
        .output()
        .expect("Failed to execute depgraph binary")
}

/// Run depgraph and assert it succeeded, returning stdout.
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_depgraph(dir, args);
    assert!(
        output.status.success(),
        "depgraph {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

/// Current contents of the test store.
pub fn read_store(dir: &Path) -> String {
    fs::read_to_string(store_path(dir)).expect("Failed to read store")
}

//! Shared test infrastructure for integration tests.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of one `parse2docs` invocation.
#[derive(Debug)]
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

/// Absolute path of a checked-in fixture script.
pub fn fixture(name: &str) -> PathBuf {
    manifest_dir().join("tests").join("fixtures").join(name)
}

/// Run the binary on `script` with logging silenced.
pub fn run_parse2docs(script: &Path) -> RunOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_parse2docs"))
        .arg(script)
        .env("RUST_LOG", "off")
        .output()
        .expect("run parse2docs");
    RunOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

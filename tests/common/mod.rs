//! Shared test infrastructure for integration tests.

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Captured result of one `sft` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    fn from_output(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Stdout and stderr together, for assertions that don't care which stream.
    #[allow(dead_code)]
    pub fn display(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Run the built binary with a clean environment plus `env`.
pub fn run_sft(args: &[&str], env: &[(&str, &str)]) -> RunResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sft"));
    command.args(args).env_clear();
    for (key, value) in env {
        command.env(key, value);
    }
    RunResult::from_output(command.output().expect("run sft"))
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(&path, contents.as_bytes()).expect("write file");
}

#[allow(dead_code)]
pub fn write_json(root: &Path, rel: &str, value: &Value) {
    let text = serde_json::to_string_pretty(value).expect("serialize fixture");
    write_file(root, rel, &text);
}

pub fn temp_root() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

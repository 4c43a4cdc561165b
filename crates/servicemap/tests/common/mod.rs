//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the servicemap binary built for this test run
pub fn servicemap_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_servicemap"))
}

/// Run the servicemap binary directly in the specified directory
///
/// Colors are disabled so output can be matched as plain text.
pub fn run_servicemap_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(servicemap_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute servicemap binary")
}

/// Write a valid definition for `name` into `services_dir`
pub fn write_service(services_dir: &Path, name: &str, owner: &str, deps: &[&str]) {
    let mut content = format!(
        "description: The {name} service\nowner: {owner}\ngithub: https://github.com/example/{name}\n"
    );
    if deps.is_empty() {
        content.push_str("dependencies: []\n");
    } else {
        content.push_str("dependencies:\n");
        for dep in deps {
            content.push_str(&format!("  - {dep}\n"));
        }
    }
    std::fs::write(services_dir.join(format!("{name}.yml")), content)
        .expect("Failed to write service definition");
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parse stdout as JSON
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

//! Records the version string shown by `dirgraph --version`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=DIRGRAPH_BUILD_VERSION");

    let version = std::env::var("DIRGRAPH_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=DIRGRAPH_VERSION={}", version);
}

/// `git describe` output without a leading `v`, if git is available.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;

    let raw = String::from_utf8(output.stdout).ok()?;
    let trimmed = raw.trim();
    let version = trimmed.strip_prefix('v').unwrap_or(trimmed);

    (!version.is_empty()).then(|| version.to_string())
}

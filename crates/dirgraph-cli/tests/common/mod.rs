use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const TENANT: &str = "contoso.onmicrosoft.com";
pub const CLIENT_ID: &str = "dacf386f-a055-4a78-8ade-6365265f020b";

const DIRGRAPH_VARS: &[&str] = &[
    "DIRGRAPH_TENANT_ID",
    "DIRGRAPH_CLIENT_ID",
    "DIRGRAPH_CLIENT_SECRET",
    "DIRGRAPH_RESOURCE",
    "DIRGRAPH_AUTHORITY",
    "DIRGRAPH_API_VERSION",
    "DIRGRAPH_USER_TOKEN",
    "DIRGRAPH_TIMEOUT",
];

/// Run the CLI with a custom HOME directory for isolated login storage.
///
/// Any `DIRGRAPH_*` variables from the outer environment are removed.
pub fn run_cli_with_env(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dirgraph"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    for var in DIRGRAPH_VARS {
        cmd.env_remove(var);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path) -> String {
    let output = run_cli_with_env(args, home);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with a custom HOME and expect failure; returns stderr.
pub fn run_cli_with_env_failure(args: &[&str], home: &Path) -> String {
    let output = run_cli_with_env(args, home);
    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("CLI command unexpectedly succeeded: {:?}\nstdout: {}", args, stdout);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Where `login` writes its file under an isolated HOME (Linux layout).
pub fn login_file(home: &Path) -> PathBuf {
    home.join("data").join("dirgraph").join("login.json")
}

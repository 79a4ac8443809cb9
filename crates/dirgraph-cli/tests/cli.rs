//! CLI integration tests that need no network access.

mod common;

use tempfile::TempDir;

use common::{
    CLIENT_ID, TENANT, login_file, run_cli_with_env, run_cli_with_env_failure,
    run_cli_with_env_success,
};

fn home() -> TempDir {
    TempDir::new().unwrap()
}

#[test]
fn test_version() {
    let home = home();
    let stdout = run_cli_with_env_success(&["--version"], home.path());
    assert!(stdout.starts_with("dirgraph "));
}

#[test]
fn test_missing_tenant_is_reported() {
    let home = home();
    let stderr = run_cli_with_env_failure(
        &["token", "--mode", "app", "--client-id", CLIENT_ID],
        home.path(),
    );
    assert!(stderr.contains("tenant_id"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_client_id_is_reported() {
    let home = home();
    let stderr = run_cli_with_env_failure(
        &["token", "--tenant-id", TENANT, "--client-id", "not-a-guid"],
        home.path(),
    );
    assert!(stderr.contains("invalid client id"), "stderr: {}", stderr);
}

#[test]
fn test_missing_secret_fails_without_network() {
    let home = home();
    // The authority points nowhere reachable; reaching it would fail differently.
    let stderr = run_cli_with_env_failure(
        &[
            "token",
            "--mode",
            "app",
            "--tenant-id",
            TENANT,
            "--client-id",
            CLIENT_ID,
            "--authority",
            "http://127.0.0.1:9/",
        ],
        home.path(),
    );
    assert!(stderr.contains("client secret is not set"), "stderr: {}", stderr);
}

#[test]
fn test_user_token_without_login_requires_consent() {
    let home = home();
    let stderr = run_cli_with_env_failure(
        &[
            "token",
            "--mode",
            "user",
            "--tenant-id",
            TENANT,
            "--client-id",
            CLIENT_ID,
        ],
        home.path(),
    );
    assert!(stderr.contains("consent is required"), "stderr: {}", stderr);
}

#[test]
fn test_login_then_user_token() {
    let home = home();

    let stdout = run_cli_with_env_success(
        &["login", "--token", "user-jwt", "--tenant-id", TENANT],
        home.path(),
    );
    assert!(stdout.contains("User token saved"));

    let path = login_file(home.path());
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["access_token"], "user-jwt");
    assert_eq!(stored["tenant_id"], TENANT);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    let stdout = run_cli_with_env_success(
        &[
            "token",
            "--mode",
            "user",
            "--tenant-id",
            TENANT,
            "--client-id",
            CLIENT_ID,
        ],
        home.path(),
    );
    assert!(stdout.contains("delegated-user"));
    assert!(!stdout.contains("user-jwt"));

    let stdout = run_cli_with_env_success(
        &[
            "token",
            "--mode",
            "user",
            "--show",
            "--tenant-id",
            TENANT,
            "--client-id",
            CLIENT_ID,
        ],
        home.path(),
    );
    assert!(stdout.contains("user-jwt"));
}

#[test]
fn test_login_for_other_tenant_is_ignored() {
    let home = home();
    run_cli_with_env_success(
        &["login", "--token", "user-jwt", "--tenant-id", "fabrikam.com"],
        home.path(),
    );

    let stderr = run_cli_with_env_failure(
        &[
            "token",
            "--mode",
            "user",
            "--tenant-id",
            TENANT,
            "--client-id",
            CLIENT_ID,
        ],
        home.path(),
    );
    assert!(stderr.contains("consent is required"), "stderr: {}", stderr);
}

#[test]
fn test_user_token_flag_overrides_login() {
    let home = home();
    let stdout = run_cli_with_env_success(
        &[
            "token",
            "--mode",
            "user",
            "--show",
            "--tenant-id",
            TENANT,
            "--client-id",
            CLIENT_ID,
            "--user-token",
            "flag-jwt",
        ],
        home.path(),
    );
    assert!(stdout.contains("flag-jwt"));
}

#[test]
fn test_login_rejects_non_positive_lifetime() {
    let home = home();
    let stderr = run_cli_with_env_failure(
        &["login", "--token", "user-jwt", "--expires-in", "0"],
        home.path(),
    );
    assert!(stderr.contains("--expires-in"), "stderr: {}", stderr);
    assert!(!login_file(home.path()).exists());
}

#[test]
fn test_login_rejects_huge_lifetime() {
    let home = home();
    let stderr = run_cli_with_env_failure(
        &["login", "--token", "user-jwt", "--expires-in", "9223372036854775807"],
        home.path(),
    );
    assert!(stderr.contains("--expires-in is too large"), "stderr: {}", stderr);
    assert!(!login_file(home.path()).exists());
}

#[test]
fn test_logout() {
    let home = home();
    run_cli_with_env_success(&["login", "--token", "user-jwt"], home.path());
    assert!(login_file(home.path()).exists());

    let stdout = run_cli_with_env_success(&["logout"], home.path());
    assert!(stdout.contains("Logged out"));
    assert!(!login_file(home.path()).exists());

    let output = run_cli_with_env(&["logout"], home.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No stored login"));
}

#[test]
fn test_navigation_listing_requires_id() {
    let home = home();
    let stderr = run_cli_with_env_failure(&["list", "group-members"], home.path());
    assert!(stderr.contains("--id is required for group-members"), "stderr: {}", stderr);
}

#[test]
fn test_my_listings_require_user_mode() {
    let home = home();
    let stderr = run_cli_with_env_failure(&["list", "my-memberships"], home.path());
    assert!(stderr.contains("--mode user"), "stderr: {}", stderr);
}

#[test]
fn test_zero_max_pages_is_rejected() {
    let home = home();
    let stderr = run_cli_with_env_failure(&["list", "users", "--max-pages", "0"], home.path());
    assert!(stderr.contains("--max-pages"), "stderr: {}", stderr);
}

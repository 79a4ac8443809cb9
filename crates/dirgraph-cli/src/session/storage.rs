//! Persisted delegated user token.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use dirgraph_core::AccessToken;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// A user token saved by `dirgraph login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredLogin {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl StoredLogin {
    pub fn access_token(&self) -> Result<AccessToken> {
        AccessToken::new(self.access_token.clone()).context("Stored token is empty")
    }
}

/// Get the login file path, creating its directory.
pub fn login_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "dirgraph").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("login.json"))
}

/// Save a login to disk, readable only by the current user.
pub fn save_login(login: &StoredLogin) -> Result<PathBuf> {
    let path = login_path()?;
    let json = serde_json::to_string_pretty(login)?;

    fs::write(&path, &json).context("Failed to write login file")?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

/// Load the saved login, if there is one.
pub fn load_login() -> Result<Option<StoredLogin>> {
    let path = login_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read login file")?;
    let login = serde_json::from_str(&json).context("Invalid login file")?;
    Ok(Some(login))
}

/// Remove the saved login. Returns false if there was none.
pub fn clear_login() -> Result<bool> {
    let path = login_path()?;

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path).context("Failed to remove login file")?;
    Ok(true)
}

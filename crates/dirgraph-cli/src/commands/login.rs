//! Login command implementation.

use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use clap::Args;

use dirgraph_core::{AccessToken, TenantId};

use crate::cli::ConnectionArgs;
use crate::output;
use crate::session::storage::{self, StoredLogin};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Delegated bearer token obtained from an interactive sign-in
    #[arg(long)]
    pub token: String,

    /// Seconds until the token expires
    #[arg(long, default_value_t = 3600)]
    pub expires_in: i64,
}

pub async fn run(args: LoginArgs, connection: &ConnectionArgs) -> Result<()> {
    AccessToken::new(args.token.as_str()).context("Invalid token")?;
    if args.expires_in <= 0 {
        bail!("--expires-in must be positive");
    }

    let tenant_id = connection
        .tenant_id
        .as_deref()
        .map(TenantId::new)
        .transpose()
        .context("Invalid tenant id")?;

    let now = Utc::now();
    let Some(expires_at) =
        Duration::try_seconds(args.expires_in).and_then(|lifetime| now.checked_add_signed(lifetime))
    else {
        bail!("--expires-in is too large");
    };

    let login = StoredLogin {
        access_token: args.token,
        expires_at,
        tenant_id: tenant_id.map(|t| t.as_str().to_string()),
        saved_at: now,
    };

    let path = storage::save_login(&login).context("Failed to save login")?;

    output::success("User token saved");
    println!();
    output::field("Expires", &login.expires_at.to_rfc3339());
    if let Some(tenant) = &login.tenant_id {
        output::field("Tenant", tenant);
    }
    output::field("File", &path.display().to_string());

    Ok(())
}

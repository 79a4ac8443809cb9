//! Tenant command implementation.

use anyhow::{Context, Result};
use clap::Args;

use dirgraph_core::{AuthFlow, Collection, Query, TenantDetail};
use dirgraph_http::DirectorySession;

use crate::cli::{ConnectionArgs, Mode};
use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct TenantArgs {
    /// Print the tenant record as JSON
    #[arg(long)]
    pub json: bool,

    /// Authentication flow
    #[arg(long, value_enum, default_value = "app")]
    pub mode: Mode,
}

pub async fn run(args: TenantArgs, connection: &ConnectionArgs) -> Result<()> {
    let connection = Connection::open(connection)?;
    let session = connection.session(AuthFlow::from(args.mode))?;

    let Some(tenant) = fetch_tenant(&session).await? else {
        output::error("Tenant not found");
        return Ok(());
    };

    if args.json {
        return output::json_pretty(&tenant);
    }

    print_tenant(&tenant);
    Ok(())
}

/// Fetch the tenant's organization record.
///
/// The service exposes it as a collection holding a single entry.
pub async fn fetch_tenant(session: &DirectorySession) -> Result<Option<TenantDetail>> {
    let cursor = session
        .open::<TenantDetail>(&Query::collection(&Collection::TenantDetails))
        .await
        .context("Failed to get tenant details")?;
    Ok(cursor.current_page().first().cloned())
}

pub fn print_tenant(tenant: &TenantDetail) {
    let na = "-";
    output::field("Display name", tenant.display_name.as_deref().unwrap_or(na));
    output::field(
        "Initial domain",
        tenant.initial_domain().map_or(na, |d| d.name.as_str()),
    );
    output::field(
        "Default domain",
        tenant.default_domain().map_or(na, |d| d.name.as_str()),
    );
    for mail in &tenant.technical_notification_mails {
        output::field("Technical contact", mail);
    }
    output::field("Object id", &tenant.object_id);
}

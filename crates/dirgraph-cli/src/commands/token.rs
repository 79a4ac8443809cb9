//! Token command implementation.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use dirgraph_core::{AuthFlow, TokenProvider};

use crate::cli::{ConnectionArgs, Mode};
use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Authentication flow
    #[arg(long, value_enum, default_value = "app")]
    pub mode: Mode,

    /// Print the bearer token itself
    #[arg(long)]
    pub show: bool,
}

pub async fn run(args: TokenArgs, connection: &ConnectionArgs) -> Result<()> {
    let connection = Connection::open(connection)?;
    let flow = AuthFlow::from(args.mode);

    let token = connection
        .broker
        .token(flow)
        .await
        .with_context(|| format!("Failed to acquire {} token", flow))?;

    output::success("Token acquired");
    println!();
    output::field("Flow", &flow.to_string());
    output::field("Expires", &token.expires_at().to_rfc3339());
    output::field(
        "Remaining",
        &format!("{}m", token.remaining_at(Utc::now()).num_minutes()),
    );
    if args.show {
        output::field("Token", token.access_token().as_str());
    }

    Ok(())
}

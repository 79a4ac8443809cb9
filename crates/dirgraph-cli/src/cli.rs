//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use dirgraph_core::config::{DEFAULT_API_VERSION, DEFAULT_AUTHORITY, DEFAULT_RESOURCE};
use dirgraph_core::{AuthFlow, DirectoryConfig};

use crate::commands::{demo, list, login, logout, search, tenant, token, whoami};

/// Explore an identity directory tenant from the command line.
#[derive(Parser, Debug)]
#[command(name = "dirgraph")]
#[command(author, version = env!("DIRGRAPH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Acquire a token and show its flow and expiry
    Token(token::TokenArgs),

    /// Store a delegated user token for later commands
    Login(login::LoginArgs),

    /// Remove the stored user token
    Logout(logout::LogoutArgs),

    /// Show the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// List a directory collection page by page
    List(list::ListArgs),

    /// Find users by name or UPN prefix
    Search(search::SearchArgs),

    /// Show the tenant's organization record
    Tenant(tenant::TenantArgs),

    /// Walk the directory listings in sequence
    Demo(demo::DemoArgs),
}

/// Tenant and application settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Tenant GUID or verified domain
    #[arg(long, env = "DIRGRAPH_TENANT_ID", global = true)]
    pub tenant_id: Option<String>,

    /// Application (client) id
    #[arg(long, env = "DIRGRAPH_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// Application secret for the app flow
    #[arg(long, env = "DIRGRAPH_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Directory resource URI
    #[arg(long, env = "DIRGRAPH_RESOURCE", global = true, default_value = DEFAULT_RESOURCE)]
    pub resource: String,

    /// OAuth2 authority URI
    #[arg(long, env = "DIRGRAPH_AUTHORITY", global = true, default_value = DEFAULT_AUTHORITY)]
    pub authority: String,

    /// Directory API version
    #[arg(long, env = "DIRGRAPH_API_VERSION", global = true, default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Delegated user token; overrides the one saved by `login`
    #[arg(long, env = "DIRGRAPH_USER_TOKEN", global = true, hide_env_values = true)]
    pub user_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "DIRGRAPH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Validate the settings into a library configuration.
    pub fn config(&self) -> Result<DirectoryConfig> {
        let mut builder = DirectoryConfig::builder()
            .tenant_id(self.tenant_id.clone().unwrap_or_default())
            .client_id(self.client_id.clone().unwrap_or_default())
            .authority(&self.authority)
            .resource(&self.resource)
            .api_version(&self.api_version);

        if let Some(secret) = &self.client_secret {
            builder = builder.client_secret(secret);
        }
        if let Some(secs) = self.timeout {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder
            .build()
            .context("Invalid configuration (see --help for the DIRGRAPH_* variables)")
    }
}

/// Which authentication flow a command runs under.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Application identity (client credentials)
    App,
    /// Signed-in user (delegated token)
    User,
}

impl From<Mode> for AuthFlow {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::App => AuthFlow::Application,
            Mode::User => AuthFlow::DelegatedUser,
        }
    }
}

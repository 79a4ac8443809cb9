//! Subcommand implementations.

pub mod demo;
pub mod list;
pub mod login;
pub mod logout;
pub mod search;
pub mod tenant;
pub mod token;
pub mod whoami;

use anyhow::Result;

use crate::cli::{Commands, ConnectionArgs};

pub async fn handle(command: Commands, connection: &ConnectionArgs) -> Result<()> {
    match command {
        Commands::Token(args) => token::run(args, connection).await,
        Commands::Login(args) => login::run(args, connection).await,
        Commands::Logout(args) => logout::run(args).await,
        Commands::Whoami(args) => whoami::run(args, connection).await,
        Commands::List(args) => list::run(args, connection).await,
        Commands::Search(args) => search::run(args, connection).await,
        Commands::Tenant(args) => tenant::run(args, connection).await,
        Commands::Demo(args) => demo::run(args, connection).await,
    }
}

//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    if storage::clear_login().context("Failed to remove login")? {
        output::success("Logged out");
    } else {
        eprintln!("{}", "No stored login.".dimmed());
    }
    Ok(())
}

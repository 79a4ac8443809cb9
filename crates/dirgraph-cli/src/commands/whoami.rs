//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use dirgraph_core::{AuthFlow, DirectoryObject, Error, User};
use dirgraph_http::DirectorySession;

use crate::cli::ConnectionArgs;
use crate::output::{self, Summary};
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the user as JSON
    #[arg(long)]
    pub json: bool,

    /// Also show the user's manager
    #[arg(long)]
    pub manager: bool,
}

pub async fn run(args: WhoamiArgs, connection: &ConnectionArgs) -> Result<()> {
    let connection = Connection::open(connection)?;
    let session = connection.session(AuthFlow::DelegatedUser)?;

    let me: User = session.get("me").await.context("Failed to get signed-in user")?;

    if args.json {
        return output::json_pretty(&me);
    }

    print_user(&me);
    if args.manager {
        println!();
        print_manager(fetch_manager(&session).await?.as_ref());
    }
    Ok(())
}

/// Fetch the signed-in user's manager, which may be a user or a contact.
///
/// A user without a manager is answered with 404 and yields `None`.
pub async fn fetch_manager(session: &DirectorySession) -> Result<Option<DirectoryObject>> {
    match session.get::<DirectoryObject>("me/manager").await {
        Ok(manager) => Ok(Some(manager)),
        Err(Error::Request(e)) if e.status == Some(404) => Ok(None),
        Err(e) => Err(e).context("Failed to get manager"),
    }
}

pub fn print_manager(manager: Option<&DirectoryObject>) {
    match manager {
        Some(manager) => output::field("Manager", &manager.summary()),
        None => output::field("Manager", "none"),
    }
}

pub fn print_user(user: &User) {
    let na = "-";
    output::field("Display name", user.display_name.as_deref().unwrap_or(na));
    output::field("UPN", user.user_principal_name.as_deref().unwrap_or(na));
    output::field("Mail", user.mail.as_deref().unwrap_or(na));
    output::field("Object id", &user.object_id);
}

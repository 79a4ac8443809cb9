//! Demo command implementation.
//!
//! Walks a fixed sequence of directory listings, printing each. A failed
//! step is reported and the walk moves on to the next one.

use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;

use dirgraph_core::{AuthFlow, Collection, Group, Query, User};
use dirgraph_http::DirectorySession;

use crate::cli::ConnectionArgs;
use crate::commands::list::{ListOptions, list_collection, print_pages};
use crate::commands::search::people_picker;
use crate::commands::tenant::{fetch_tenant, print_tenant};
use crate::commands::whoami::{fetch_manager, print_manager, print_user};
use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Which flows to run
    #[arg(long, value_enum, default_value = "both")]
    pub mode: DemoMode,

    /// Also run a people-picker search for this text
    #[arg(long)]
    pub search: Option<String>,

    /// Page size hint for every listing
    #[arg(long)]
    pub top: Option<u32>,

    /// Stop each listing after this many pages
    #[arg(long)]
    pub max_pages: Option<NonZeroUsize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoMode {
    App,
    User,
    Both,
}

/// Step results for the closing summary.
#[derive(Debug, Default)]
struct Tally {
    passed: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, step: &str, result: Result<usize>) {
        match result {
            Ok(count) => {
                self.passed += 1;
                eprintln!("{}", format!("{}: {} items", step, count).dimmed());
            }
            Err(e) => {
                self.failed += 1;
                output::error(&format!("{}: {:#}", step, e));
            }
        }
    }
}

pub async fn run(args: DemoArgs, connection: &ConnectionArgs) -> Result<()> {
    let connection = Connection::open(connection)?;
    let options = ListOptions {
        max_pages: args.max_pages.map(NonZeroUsize::get),
        json: false,
    };
    let mut tally = Tally::default();

    if matches!(args.mode, DemoMode::App | DemoMode::Both) {
        output::heading("Application mode");
        let session = connection.session(AuthFlow::Application)?;
        walk(&session, &args, &options, &mut tally).await;
    }

    if matches!(args.mode, DemoMode::User | DemoMode::Both) {
        output::heading("User mode");
        let session = connection.session(AuthFlow::DelegatedUser)?;

        output::heading("Signed-in user");
        let me = session
            .get::<User>("me")
            .await
            .context("Failed to get signed-in user");
        if let Ok(user) = &me {
            print_user(user);
        }
        tally.record("signed-in user", me.map(|_| 1));

        output::heading("Manager");
        let manager = fetch_manager(&session).await;
        if let Ok(manager) = &manager {
            print_manager(manager.as_ref());
        }
        tally.record("manager", manager.map(|m| usize::from(m.is_some())));

        for collection in [Collection::MyMemberships, Collection::MyDirectReports] {
            output::heading(&collection.to_string());
            let query = page_query(&collection, args.top);
            let result = list_collection(&session, &collection, &query, &options).await;
            tally.record(&collection.to_string(), result);
        }

        walk(&session, &args, &options, &mut tally).await;
    }

    println!();
    if tally.failed == 0 {
        output::success(&format!("{} steps completed", tally.passed));
    } else {
        output::error(&format!(
            "{} steps completed, {} failed",
            tally.passed, tally.failed
        ));
    }
    Ok(())
}

/// The listings shared by both flows.
async fn walk(
    session: &DirectorySession,
    args: &DemoArgs,
    options: &ListOptions,
    tally: &mut Tally,
) {
    output::heading("Tenant details");
    let tenant = fetch_tenant(session).await;
    if let Ok(found) = &tenant {
        match found {
            Some(tenant) => print_tenant(tenant),
            None => eprintln!("{}", "Tenant not found.".dimmed()),
        }
    }
    tally.record("tenant details", tenant.map(|t| usize::from(t.is_some())));

    if let Some(text) = args.search.as_deref().filter(|t| !t.trim().is_empty()) {
        let step = format!("users matching '{}'", text.trim());
        output::heading(&step);
        let result = print_pages::<User>(session, &people_picker(text.trim()), options).await;
        tally.record(&step, result);
    }

    let collections = [
        Collection::Users,
        Collection::Groups,
        Collection::Contacts,
        Collection::DirectoryRoles,
        Collection::ServicePrincipals,
        Collection::Applications,
        Collection::Devices,
        Collection::OAuth2PermissionGrants,
        Collection::SubscribedSkus,
        Collection::Domains,
    ];

    for collection in &collections {
        output::heading(&collection.to_string());
        let query = page_query(collection, args.top);
        let result = list_collection(session, collection, &query, options).await;
        tally.record(&collection.to_string(), result);
    }

    match first_group(session).await {
        Ok(Some(group)) => {
            let collection = Collection::GroupMembers(group.object_id.clone());
            let step = format!(
                "members of {}",
                group.display_name.as_deref().unwrap_or(&group.object_id)
            );
            output::heading(&step);
            let query = page_query(&collection, args.top);
            let result = list_collection(session, &collection, &query, options).await;
            tally.record(&step, result);
        }
        Ok(None) => eprintln!("{}", "No groups; skipping group members.".dimmed()),
        Err(e) => tally.record("group members", Err(e)),
    }
}

fn page_query(collection: &Collection, top: Option<u32>) -> Query {
    let query = Query::collection(collection);
    match top {
        Some(top) => query.top(top),
        None => query,
    }
}

async fn first_group(session: &DirectorySession) -> Result<Option<Group>> {
    let cursor = session
        .open::<Group>(&Query::collection(&Collection::Groups).top(1))
        .await
        .context("Failed to look up a group")?;
    Ok(cursor.current_page().first().cloned())
}

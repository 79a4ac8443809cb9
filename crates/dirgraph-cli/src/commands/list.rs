//! List command implementation.

use std::num::NonZeroUsize;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use dirgraph_core::{
    Application, AuthFlow, Collection, Contact, Device, DirectoryObject, DirectoryRole, Domain,
    Group, OAuth2PermissionGrant, Query, ServicePrincipal, SubscribedSku, TenantDetail, User,
};
use dirgraph_http::DirectorySession;

use crate::cli::{ConnectionArgs, Mode};
use crate::output::{self, Summary};
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection to list
    #[arg(value_enum)]
    pub collection: CollectionArg,

    /// Object id for per-object listings (members, owners, ...)
    #[arg(long)]
    pub id: Option<String>,

    /// OData filter expression
    #[arg(long)]
    pub filter: Option<String>,

    /// Page size hint
    #[arg(long)]
    pub top: Option<u32>,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<NonZeroUsize>,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,

    /// Authentication flow
    #[arg(long, value_enum, default_value = "app")]
    pub mode: Mode,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionArg {
    Users,
    Groups,
    Contacts,
    Applications,
    ServicePrincipals,
    DirectoryRoles,
    Domains,
    Devices,
    #[value(name = "oauth2-permission-grants")]
    OAuth2PermissionGrants,
    SubscribedSkus,
    TenantDetails,
    MyMemberships,
    MyDirectReports,
    UserMemberOf,
    UserDirectReports,
    GroupMembers,
    ApplicationOwners,
    DeviceRegisteredOwners,
}

impl CollectionArg {
    fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }

    /// Combine with `--id` into a collection.
    pub fn resolve(self, id: Option<String>) -> Result<Collection> {
        let needs_id = || {
            id.clone()
                .filter(|s| !s.trim().is_empty())
                .with_context(|| format!("--id is required for {}", self.name()))
        };

        Ok(match self {
            CollectionArg::Users => Collection::Users,
            CollectionArg::Groups => Collection::Groups,
            CollectionArg::Contacts => Collection::Contacts,
            CollectionArg::Applications => Collection::Applications,
            CollectionArg::ServicePrincipals => Collection::ServicePrincipals,
            CollectionArg::DirectoryRoles => Collection::DirectoryRoles,
            CollectionArg::Domains => Collection::Domains,
            CollectionArg::Devices => Collection::Devices,
            CollectionArg::OAuth2PermissionGrants => Collection::OAuth2PermissionGrants,
            CollectionArg::SubscribedSkus => Collection::SubscribedSkus,
            CollectionArg::TenantDetails => Collection::TenantDetails,
            CollectionArg::MyMemberships => Collection::MyMemberships,
            CollectionArg::MyDirectReports => Collection::MyDirectReports,
            CollectionArg::UserMemberOf => Collection::UserMemberOf(needs_id()?),
            CollectionArg::UserDirectReports => Collection::UserDirectReports(needs_id()?),
            CollectionArg::GroupMembers => Collection::GroupMembers(needs_id()?),
            CollectionArg::ApplicationOwners => Collection::ApplicationOwners(needs_id()?),
            CollectionArg::DeviceRegisteredOwners => {
                Collection::DeviceRegisteredOwners(needs_id()?)
            }
        })
    }
}

/// How a listing is printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub max_pages: Option<usize>,
    pub json: bool,
}

pub async fn run(args: ListArgs, connection: &ConnectionArgs) -> Result<()> {
    let collection = args.collection.resolve(args.id)?;
    let flow = AuthFlow::from(args.mode);
    if collection.requires_user() && flow != AuthFlow::DelegatedUser {
        bail!("{} can only be listed with --mode user", collection);
    }

    let connection = Connection::open(connection)?;
    let session = connection.session(flow)?;

    let mut query = Query::collection(&collection);
    if let Some(filter) = args.filter {
        query = query.filter(filter);
    }
    if let Some(top) = args.top {
        query = query.top(top);
    }

    let options = ListOptions {
        max_pages: args.max_pages.map(NonZeroUsize::get),
        json: args.json,
    };

    let count = list_collection(&session, &collection, &query, &options)
        .await
        .with_context(|| format!("Failed to list {}", collection))?;

    if !options.json {
        output::success(&format!("{} {}", count, collection));
    }
    Ok(())
}

/// Print every page of `query`, decoding items as `collection` dictates.
///
/// Returns the number of items printed.
pub async fn list_collection(
    session: &DirectorySession,
    collection: &Collection,
    query: &Query,
    options: &ListOptions,
) -> Result<usize> {
    match collection {
        Collection::Users => print_pages::<User>(session, query, options).await,
        Collection::Groups => print_pages::<Group>(session, query, options).await,
        Collection::Contacts => print_pages::<Contact>(session, query, options).await,
        Collection::Applications => print_pages::<Application>(session, query, options).await,
        Collection::ServicePrincipals => {
            print_pages::<ServicePrincipal>(session, query, options).await
        }
        Collection::DirectoryRoles => print_pages::<DirectoryRole>(session, query, options).await,
        Collection::Domains => print_pages::<Domain>(session, query, options).await,
        Collection::Devices => print_pages::<Device>(session, query, options).await,
        Collection::OAuth2PermissionGrants => {
            print_pages::<OAuth2PermissionGrant>(session, query, options).await
        }
        Collection::SubscribedSkus => print_pages::<SubscribedSku>(session, query, options).await,
        Collection::TenantDetails => print_pages::<TenantDetail>(session, query, options).await,
        Collection::MyMemberships
        | Collection::MyDirectReports
        | Collection::UserMemberOf(_)
        | Collection::UserDirectReports(_)
        | Collection::GroupMembers(_)
        | Collection::ApplicationOwners(_)
        | Collection::DeviceRegisteredOwners(_) => {
            print_pages::<DirectoryObject>(session, query, options).await
        }
    }
}

/// Walk a cursor, printing each page as it arrives.
pub async fn print_pages<T>(
    session: &DirectorySession,
    query: &Query,
    options: &ListOptions,
) -> Result<usize>
where
    T: DeserializeOwned + Serialize + Summary + Send + 'static,
{
    let mut cursor = session.open::<T>(query).await?;

    if cursor.is_exhausted() && cursor.current_page().is_empty() {
        if !options.json {
            eprintln!("{}", "No results.".dimmed());
        }
        return Ok(0);
    }

    let mut count = 0;
    let mut page = 1;
    loop {
        let items = cursor.current_page();
        if !options.json {
            eprintln!(
                "{}",
                format!("page {} ({} items)", page, items.len()).dimmed()
            );
        }
        for item in items {
            if options.json {
                output::json(item)?;
            } else {
                println!("  {}", item.summary());
            }
        }
        count += items.len();

        if options.max_pages.is_some_and(|max| page >= max) {
            if !cursor.is_exhausted() && !options.json {
                eprintln!("{}", format!("stopped after {} pages", page).dimmed());
            }
            break;
        }
        if !cursor.advance().await? {
            break;
        }
        page += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_listings_need_an_id() {
        assert!(CollectionArg::GroupMembers.resolve(None).is_err());
        assert!(CollectionArg::GroupMembers.resolve(Some(" ".into())).is_err());
        assert_eq!(
            CollectionArg::GroupMembers.resolve(Some("g1".into())).unwrap(),
            Collection::GroupMembers("g1".into())
        );
        assert_eq!(
            CollectionArg::Users.resolve(Some("ignored".into())).unwrap(),
            Collection::Users
        );
    }
}

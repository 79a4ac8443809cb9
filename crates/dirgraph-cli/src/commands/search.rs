//! Search command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use dirgraph_core::{AuthFlow, Collection, Query, User};

use crate::cli::{ConnectionArgs, Mode};
use crate::commands::list::{ListOptions, print_pages};
use crate::output;
use crate::session::Connection;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Prefix of a UPN, display name, given name or surname
    pub text: String,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,

    /// Authentication flow
    #[arg(long, value_enum, default_value = "app")]
    pub mode: Mode,
}

pub async fn run(args: SearchArgs, connection: &ConnectionArgs) -> Result<()> {
    let text = args.text.trim();
    if text.is_empty() {
        bail!("search text must not be empty");
    }

    let connection = Connection::open(connection)?;
    let session = connection.session(AuthFlow::from(args.mode))?;

    let query = people_picker(text);
    let options = ListOptions {
        max_pages: None,
        json: args.json,
    };

    let count = print_pages::<User>(&session, &query, &options)
        .await
        .with_context(|| format!("Failed to search users for '{}'", text))?;

    if !args.json {
        output::success(&format!("{} matching users", count));
    }
    Ok(())
}

/// Users whose UPN, display name, given name or surname starts with `text`.
pub fn people_picker(text: &str) -> Query {
    let literal = text.replace('\'', "''");
    let filter = ["userPrincipalName", "displayName", "givenName", "surname"]
        .iter()
        .map(|property| format!("startswith({},'{}')", property, literal))
        .collect::<Vec<_>>()
        .join(" or ");

    Query::collection(&Collection::Users).filter(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_covers_all_name_properties() {
        let query = people_picker("Ad");
        assert_eq!(
            query.filter_expr(),
            Some(
                "startswith(userPrincipalName,'Ad') or startswith(displayName,'Ad') \
                 or startswith(givenName,'Ad') or startswith(surname,'Ad')"
            )
        );
        assert_eq!(query.path(), "users");
    }

    #[test]
    fn quotes_are_doubled() {
        let query = people_picker("O'Brien");
        assert!(query.filter_expr().unwrap().contains("'O''Brien'"));
    }
}

//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use dirgraph_core::{
    Application, Contact, Device, DirectoryObject, DirectoryRole, Domain, Group,
    OAuth2PermissionGrant, ServicePrincipal, SubscribedSku, TenantDetail, User,
};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a section heading.
pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// One-line human rendering of a directory entity.
pub trait Summary {
    fn summary(&self) -> String;
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

impl Summary for User {
    fn summary(&self) -> String {
        format!(
            "{}  {}  {}",
            or_dash(&self.display_name),
            or_dash(&self.user_principal_name).cyan(),
            self.object_id.dimmed()
        )
    }
}

impl Summary for Group {
    fn summary(&self) -> String {
        let kind = match (self.security_enabled, self.mail_enabled) {
            (Some(true), Some(true)) => "mail-enabled security",
            (Some(true), _) => "security",
            (_, Some(true)) => "distribution",
            _ => "group",
        };
        format!(
            "{}  [{}]  {}",
            or_dash(&self.display_name),
            kind,
            self.object_id.dimmed()
        )
    }
}

impl Summary for Contact {
    fn summary(&self) -> String {
        format!(
            "{}  {}  {}",
            or_dash(&self.display_name),
            or_dash(&self.mail).cyan(),
            self.object_id.dimmed()
        )
    }
}

impl Summary for DirectoryRole {
    fn summary(&self) -> String {
        format!(
            "{}  {}",
            or_dash(&self.display_name),
            self.object_id.dimmed()
        )
    }
}

impl Summary for Application {
    fn summary(&self) -> String {
        format!(
            "{}  appId={}  {}",
            or_dash(&self.display_name),
            or_dash(&self.app_id),
            self.object_id.dimmed()
        )
    }
}

impl Summary for ServicePrincipal {
    fn summary(&self) -> String {
        format!(
            "{}  appId={}  {}",
            or_dash(&self.display_name),
            or_dash(&self.app_id),
            self.object_id.dimmed()
        )
    }
}

impl Summary for Domain {
    fn summary(&self) -> String {
        let mut flags = Vec::new();
        if self.is_default == Some(true) {
            flags.push("default");
        }
        if self.is_verified == Some(true) {
            flags.push("verified");
        }
        if flags.is_empty() {
            self.name.clone()
        } else {
            format!("{}  ({})", self.name, flags.join(", "))
        }
    }
}

impl Summary for Device {
    fn summary(&self) -> String {
        format!(
            "{}  {}  {}",
            or_dash(&self.display_name),
            or_dash(&self.operating_system),
            self.object_id.dimmed()
        )
    }
}

impl Summary for OAuth2PermissionGrant {
    fn summary(&self) -> String {
        format!(
            "client={}  resource={}  scope={}  ({})",
            self.client_id,
            or_dash(&self.resource_id),
            or_dash(&self.scope),
            or_dash(&self.consent_type)
        )
    }
}

impl Summary for SubscribedSku {
    fn summary(&self) -> String {
        format!(
            "{}  consumed={}  {}",
            or_dash(&self.sku_part_number),
            self.consumed_units.unwrap_or_default(),
            self.sku_id.dimmed()
        )
    }
}

impl Summary for TenantDetail {
    fn summary(&self) -> String {
        format!(
            "{}  default={}  {}",
            or_dash(&self.display_name),
            self.default_domain().map_or("-", |d| d.name.as_str()),
            self.object_id.dimmed()
        )
    }
}

impl Summary for DirectoryObject {
    fn summary(&self) -> String {
        match self {
            DirectoryObject::User(u) => format!("user   {}", u.summary()),
            DirectoryObject::Group(g) => format!("group  {}", g.summary()),
            DirectoryObject::Contact(c) => format!("contact  {}", c.summary()),
            DirectoryObject::DirectoryRole(r) => format!("role   {}", r.summary()),
            DirectoryObject::Other {
                object_type,
                object_id,
            } => format!("{}  {}", object_type, or_dash(object_id).dimmed()),
        }
    }
}

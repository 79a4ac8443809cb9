//! Listable directory collections.

use std::fmt;

/// A directory listing, either a top-level collection or a navigation
/// property of one object.
///
/// Object ids stay a single path segment; they are percent-encoded when the
/// request URL is built, so guest UPNs containing `#EXT#` are safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Users,
    Groups,
    Contacts,
    Applications,
    ServicePrincipals,
    DirectoryRoles,
    Domains,
    Devices,
    OAuth2PermissionGrants,
    SubscribedSkus,
    /// The tenant's organization record; a one-item listing.
    TenantDetails,
    /// Groups and roles the signed-in user belongs to (delegated flow only).
    MyMemberships,
    /// The signed-in user's direct reports (delegated flow only).
    MyDirectReports,
    /// Groups and roles a user belongs to.
    UserMemberOf(String),
    /// A user's direct reports.
    UserDirectReports(String),
    /// Members of a group.
    GroupMembers(String),
    /// Owners of an application.
    ApplicationOwners(String),
    /// Registered owners of a device.
    DeviceRegisteredOwners(String),
}

impl Collection {
    /// Path segments relative to the tenant's service root.
    pub fn segments(&self) -> Vec<String> {
        let fixed = |parts: &[&str]| -> Vec<String> { parts.iter().map(|p| p.to_string()).collect() };
        let nav = |parent: &str, id: &str, property: &str| {
            vec![parent.to_string(), id.to_string(), property.to_string()]
        };
        match self {
            Collection::Users => fixed(&["users"]),
            Collection::Groups => fixed(&["groups"]),
            Collection::Contacts => fixed(&["contacts"]),
            Collection::Applications => fixed(&["applications"]),
            Collection::ServicePrincipals => fixed(&["servicePrincipals"]),
            Collection::DirectoryRoles => fixed(&["directoryRoles"]),
            Collection::Domains => fixed(&["domains"]),
            Collection::Devices => fixed(&["devices"]),
            Collection::OAuth2PermissionGrants => fixed(&["oauth2PermissionGrants"]),
            Collection::SubscribedSkus => fixed(&["subscribedSkus"]),
            Collection::TenantDetails => fixed(&["tenantDetails"]),
            Collection::MyMemberships => fixed(&["me", "memberOf"]),
            Collection::MyDirectReports => fixed(&["me", "directReports"]),
            Collection::UserMemberOf(id) => nav("users", id, "memberOf"),
            Collection::UserDirectReports(id) => nav("users", id, "directReports"),
            Collection::GroupMembers(id) => nav("groups", id, "members"),
            Collection::ApplicationOwners(id) => nav("applications", id, "owners"),
            Collection::DeviceRegisteredOwners(id) => nav("devices", id, "registeredOwners"),
        }
    }

    /// Unencoded path relative to the tenant's service root, for display.
    pub fn path(&self) -> String {
        self.segments().join("/")
    }

    /// Returns true if the collection only makes sense for a signed-in user.
    pub fn requires_user(&self) -> bool {
        matches!(self, Collection::MyMemberships | Collection::MyDirectReports)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Users => f.write_str("users"),
            Collection::Groups => f.write_str("groups"),
            Collection::Contacts => f.write_str("contacts"),
            Collection::Applications => f.write_str("applications"),
            Collection::ServicePrincipals => f.write_str("service principals"),
            Collection::DirectoryRoles => f.write_str("directory roles"),
            Collection::Domains => f.write_str("domains"),
            Collection::Devices => f.write_str("devices"),
            Collection::OAuth2PermissionGrants => f.write_str("OAuth2 permission grants"),
            Collection::SubscribedSkus => f.write_str("subscribed SKUs"),
            Collection::TenantDetails => f.write_str("tenant details"),
            Collection::MyMemberships => f.write_str("my group and role memberships"),
            Collection::MyDirectReports => f.write_str("my direct reports"),
            Collection::UserMemberOf(id) => write!(f, "memberships of user {}", id),
            Collection::UserDirectReports(id) => write!(f, "direct reports of user {}", id),
            Collection::GroupMembers(id) => write!(f, "members of group {}", id),
            Collection::ApplicationOwners(id) => write!(f, "owners of application {}", id),
            Collection::DeviceRegisteredOwners(id) => {
                write!(f, "registered owners of device {}", id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_paths() {
        assert_eq!(
            Collection::GroupMembers("g1".into()).path(),
            "groups/g1/members"
        );
        assert_eq!(
            Collection::UserMemberOf("alice@contoso.com".into()).path(),
            "users/alice@contoso.com/memberOf"
        );
        assert_eq!(Collection::MyDirectReports.path(), "me/directReports");
    }

    #[test]
    fn guest_upn_stays_one_segment() {
        let upn = "alice_fabrikam.com#EXT#@contoso.onmicrosoft.com";
        assert_eq!(
            Collection::UserMemberOf(upn.into()).segments(),
            vec!["users", upn, "memberOf"]
        );
    }

    #[test]
    fn only_me_collections_require_user() {
        assert!(Collection::MyMemberships.requires_user());
        assert!(!Collection::Users.requires_user());
        assert!(!Collection::GroupMembers("g".into()).requires_user());
    }
}

//! Tenant identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated directory tenant identifier.
///
/// Either a tenant GUID (`72f988bf-86f1-41af-91ab-2d7cd011db47`) or a
/// verified domain name (`contoso.onmicrosoft.com`). The value is used as a
/// single URL path segment, so slashes, whitespace and query characters are
/// rejected.
///
/// # Example
///
/// ```
/// use dirgraph_core::TenantId;
///
/// let tenant = TenantId::new("contoso.onmicrosoft.com").unwrap();
/// assert!(!tenant.is_guid());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Create a new tenant id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty or not a valid path segment.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns true if the tenant is given by its GUID.
    pub fn is_guid(&self) -> bool {
        is_guid(&self.0)
    }

    /// Returns the tenant id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::TenantId {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if s.len() > 253 {
            return Err(InvalidInputError::TenantId {
                value: s.to_string(),
                reason: "exceeds maximum length of 253 characters".to_string(),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
        {
            return Err(InvalidInputError::TenantId {
                value: s.to_string(),
                reason: format!("invalid character '{}'", c),
            }
            .into());
        }

        if s.starts_with('.') || s.ends_with('.') {
            return Err(InvalidInputError::TenantId {
                value: s.to_string(),
                reason: "cannot start or end with '.'".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Returns true for the canonical 8-4-4-4-12 hexadecimal GUID form.
pub(crate) fn is_guid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TenantId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TenantId> for String {
    fn from(tenant: TenantId) -> Self {
        tenant.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_tenant() {
        let tenant = TenantId::new("72f988bf-86f1-41af-91ab-2d7cd011db47").unwrap();
        assert!(tenant.is_guid());
    }

    #[test]
    fn domain_tenant() {
        let tenant = TenantId::new("contoso.onmicrosoft.com").unwrap();
        assert!(!tenant.is_guid());
        assert_eq!(tenant.as_str(), "contoso.onmicrosoft.com");
    }

    #[test]
    fn invalid_empty() {
        assert!(TenantId::new("").is_err());
    }

    #[test]
    fn invalid_path_characters() {
        assert!(TenantId::new("contoso/users").is_err());
        assert!(TenantId::new("contoso?x=1").is_err());
        assert!(TenantId::new("contoso com").is_err());
    }

    #[test]
    fn invalid_leading_dot() {
        assert!(TenantId::new(".contoso.com").is_err());
    }
}

//! Endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated HTTPS endpoint URL.
///
/// Used for the token authority, the directory resource, and the per-tenant
/// service root. The URL must be absolute and use HTTPS (HTTP is accepted
/// only for localhost so tests can point at a local mock server).
///
/// # Example
///
/// ```
/// use dirgraph_core::EndpointUrl;
///
/// let resource = EndpointUrl::new("https://graph.windows.net/").unwrap();
/// assert_eq!(resource.join("contoso.onmicrosoft.com"),
///            "https://graph.windows.net/contoso.onmicrosoft.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointUrl(Url);

impl EndpointUrl {
    /// Create a new endpoint URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::EndpointUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::EndpointUrl {
                value: s.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(Self(url))
    }

    /// Returns `<base>/<path>` with exactly one slash between the parts.
    pub fn join(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Returns a new endpoint one path segment below this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment produces an invalid URL.
    pub fn child(&self, segment: &str) -> Result<Self, Error> {
        Self::new(self.join(segment))
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::EndpointUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::EndpointUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::EndpointUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EndpointUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for EndpointUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EndpointUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let url = EndpointUrl::new("https://login.microsoftonline.com/").unwrap();
        assert_eq!(url.host(), Some("login.microsoftonline.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let url = EndpointUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.host(), Some("127.0.0.1"));
    }

    #[test]
    fn join_handles_slashes() {
        let with = EndpointUrl::new("https://graph.windows.net/").unwrap();
        let without = EndpointUrl::new("https://graph.windows.net").unwrap();
        assert_eq!(with.join("/users"), "https://graph.windows.net/users");
        assert_eq!(without.join("users"), "https://graph.windows.net/users");
        assert_eq!(with.join(""), "https://graph.windows.net");
    }

    #[test]
    fn child_appends_segment() {
        let resource = EndpointUrl::new("https://graph.windows.net/").unwrap();
        let root = resource.child("contoso.com").unwrap();
        assert_eq!(root.join("users"), "https://graph.windows.net/contoso.com/users");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(EndpointUrl::new("http://graph.windows.net").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(EndpointUrl::new("/users").is_err());
    }

    #[test]
    fn rejects_query_string() {
        assert!(EndpointUrl::new("https://graph.windows.net/?api-version=1.6").is_err());
    }
}

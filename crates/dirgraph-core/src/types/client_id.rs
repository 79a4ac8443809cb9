//! Client (application) identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tenant_id::is_guid;
use crate::error::{Error, InvalidInputError};

/// A validated application (client) identifier.
///
/// Application ids are GUIDs assigned at registration time.
///
/// # Example
///
/// ```
/// use dirgraph_core::ClientId;
///
/// let client = ClientId::new("dacf386f-a055-4a78-8ade-6365265f020b").unwrap();
/// assert_eq!(client.as_str(), "dacf386f-a055-4a78-8ade-6365265f020b");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Create a new client id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a GUID.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if !is_guid(&s) {
            return Err(InvalidInputError::ClientId {
                value: s,
                reason: "must be a GUID (xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)".to_string(),
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Returns the client id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClientId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ClientId> for String {
    fn from(client: ClientId) -> Self {
        client.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_guid() {
        assert!(ClientId::new("dacf386f-a055-4a78-8ade-6365265f020b").is_ok());
        assert!(ClientId::new("DACF386F-A055-4A78-8ADE-6365265F020B").is_ok());
    }

    #[test]
    fn invalid_formats() {
        assert!(ClientId::new("").is_err());
        assert!(ClientId::new("my-app").is_err());
        assert!(ClientId::new("dacf386f-a055-4a78-8ade-6365265f020").is_err());
        assert!(ClientId::new("zzzzzzzz-a055-4a78-8ade-6365265f020b").is_err());
    }
}

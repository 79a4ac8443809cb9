//! Wire formats for the token endpoint and the directory service.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Query Parameters
// ============================================================================

/// Sent with every directory request.
pub const API_VERSION: &str = "api-version";

/// OData filter expression.
pub const FILTER: &str = "$filter";

/// OData page size.
pub const TOP: &str = "$top";

// ============================================================================
// Token Endpoint
// ============================================================================

/// Successful answer from `{authority}/{tenant}/oauth2/token`.
///
/// The v1 endpoint sends `expires_in` and `expires_on` as strings; newer
/// endpoints send numbers. Both are accepted.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default, deserialize_with = "seconds")]
    pub expires_in: Option<i64>,
    #[serde(default, deserialize_with = "seconds")]
    pub expires_on: Option<i64>,
}

/// Error answer from the token endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TokenErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

fn seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("not an integer: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("not an integer: {:?}", s))),
        Some(other) => Err(de::Error::custom(format!(
            "expected seconds, found {}",
            other
        ))),
    }
}

// ============================================================================
// Directory Service
// ============================================================================

/// One page of a collection listing.
#[derive(Debug, Deserialize)]
pub struct ODataPage<T> {
    pub value: Vec<T>,
    #[serde(default, rename = "odata.nextLink", alias = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Extract `(code, message)` from an error body.
///
/// Handles the legacy `{"odata.error": {"code", "message": {"value"}}}` shape
/// and the newer `{"error": {"code", "message"}}` one. Anything else yields
/// nothing.
pub fn parse_error_body(body: &str) -> (Option<String>, Option<String>) {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return (None, None);
    };

    let Some(error) = value.get("odata.error").or_else(|| value.get("error")) else {
        return (None, None);
    };

    let code = error
        .get("code")
        .and_then(Value::as_str)
        .map(str::to_string);

    let message = match error.get("message") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(m)) => m.get("value").and_then(Value::as_str).map(str::to_string),
        _ => None,
    };

    (code, message)
}

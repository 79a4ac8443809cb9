//! Directory HTTP client implementation.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};
use url::Url;

use dirgraph_core::error::{ConfigError, InvalidInputError, RequestError, RequestErrorKind};
use dirgraph_core::{AccessToken, ContinuationToken, DirectoryConfig, EndpointUrl, Page, Query, Result};

use super::endpoints::{API_VERSION, FILTER, ODataPage, TOP, parse_error_body};

/// HTTP client for one tenant's directory endpoint.
///
/// Performs exactly one request per call. Retries, token handling and 401
/// recovery belong to the caller.
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: reqwest::Client,
    service_root: EndpointUrl,
    api_version: String,
}

impl GraphClient {
    /// Create a client rooted at `service_root`, e.g.
    /// `https://graph.windows.net/contoso.onmicrosoft.com`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the TLS backend cannot be
    /// initialised.
    pub fn new(
        service_root: EndpointUrl,
        api_version: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let client = build_http_client(timeout)?;
        Ok(Self {
            client,
            service_root,
            api_version: api_version.into(),
        })
    }

    /// Create a client for the tenant named in `config`.
    pub fn from_config(config: &DirectoryConfig) -> Result<Self> {
        Self::new(
            config.service_root()?,
            config.api_version.clone(),
            config.request_timeout,
        )
    }

    /// Returns the per-tenant service root.
    pub fn service_root(&self) -> &EndpointUrl {
        &self.service_root
    }

    /// Returns the `api-version` sent with each request.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the URL of the first page of `query`.
    ///
    /// Each path segment is percent-encoded, so `#`, `?` and `/` inside an
    /// object id never leak into the fragment, query or path structure.
    pub fn first_page_url(&self, query: &Query) -> Result<Url> {
        let mut url = self.service_root.as_url().clone();

        url.path_segments_mut()
            .map_err(|_| InvalidInputError::Other {
                message: format!("cannot build request URL below '{}'", self.service_root),
            })?
            .pop_if_empty()
            .extend(query.segments());

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(API_VERSION, &self.api_version);
            if let Some(filter) = query.filter_expr() {
                pairs.append_pair(FILTER, filter);
            }
            if let Some(top) = query.page_size() {
                pairs.append_pair(TOP, &top.to_string());
            }
        }

        Ok(url)
    }

    /// Resolve a next link from a response into an absolute request URL.
    ///
    /// Absolute links are used as given. Relative links, which the legacy
    /// service returns (`directoryObjects/$/...?$skiptoken=...`), are
    /// resolved against the service root. `api-version` is appended when the
    /// link does not carry one.
    pub fn resolve_next_link(&self, link: &str) -> Result<Url> {
        let invalid = |reason: String| InvalidInputError::Continuation {
            value: link.to_string(),
            reason,
        };

        let mut url = match Url::parse(link) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = format!("{}/", self.service_root.join(""));
                let base = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
                base.join(link.trim_start_matches('/'))
                    .map_err(|e| invalid(e.to_string()))?
            }
            Err(e) => return Err(invalid(e.to_string()).into()),
        };

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())).into());
        }

        if !url.query_pairs().any(|(k, _)| k == API_VERSION) {
            url.query_pairs_mut().append_pair(API_VERSION, &self.api_version);
        }

        Ok(url)
    }

    /// Fetch one page of a listing.
    ///
    /// The next link, if any, is resolved before it is handed back so the
    /// continuation is always an absolute URL.
    #[instrument(skip(self, token, url), fields(%url))]
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &AccessToken,
    ) -> Result<Page<T>> {
        debug!("Directory page request");

        let body = self.get(url, token).await?;
        let page: ODataPage<T> = decode(&body)?;

        let continuation = match page.next_link.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => {
                Some(ContinuationToken::new(self.resolve_next_link(link)?.to_string()))
            }
            _ => None,
        };

        trace!(
            items = page.value.len(),
            has_next = continuation.is_some(),
            "Directory page received"
        );
        Ok(Page::new(page.value, continuation))
    }

    /// Fetch a single resource at `path` below the service root.
    #[instrument(skip(self, token))]
    pub async fn get_object<T: DeserializeOwned>(&self, path: &str, token: &AccessToken) -> Result<T> {
        let url = self.first_page_url(&Query::new(path))?;
        debug!("Directory object request");
        let body = self.get(url, token).await?;
        decode(&body)
    }

    /// Issue an authenticated GET and return the body of a success response.
    async fn get(&self, url: Url, token: &AccessToken) -> Result<String> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;

        let status = response.status();
        trace!(status = %status, "Directory response");

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::transport(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            let (code, message) = parse_error_body(&body);
            let error = RequestError::from_status(status.as_u16(), code, message);
            warn!(%error, "Directory request failed");
            Err(error.into())
        }
    }
}

/// Build the reqwest client shared by the directory client and the token broker.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("dirgraph/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| {
        ConfigError::HttpClient {
            message: e.to_string(),
        }
        .into()
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        RequestError {
            kind: RequestErrorKind::Server,
            status: None,
            code: None,
            message: Some(format!("invalid response body: {}", e)),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirgraph_core::Collection;

    fn client() -> GraphClient {
        let root = EndpointUrl::new("https://graph.windows.net/contoso.onmicrosoft.com").unwrap();
        GraphClient::new(root, "1.6", None).unwrap()
    }

    fn params(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn first_page_carries_api_version() {
        let url = client().first_page_url(&Query::new("users")).unwrap();
        assert_eq!(url.path(), "/contoso.onmicrosoft.com/users");
        assert_eq!(params(&url), vec![("api-version".into(), "1.6".into())]);
    }

    #[test]
    fn guest_upn_is_percent_encoded() {
        let upn = "alice_fabrikam.com#EXT#@contoso.onmicrosoft.com";
        let query = Query::collection(&Collection::UserMemberOf(upn.into()));
        let url = client().first_page_url(&query).unwrap();

        assert!(url.fragment().is_none());
        assert!(url.path().ends_with("/memberOf"));
        assert_eq!(
            url.path(),
            "/contoso.onmicrosoft.com/users/alice_fabrikam.com%23EXT%23@contoso.onmicrosoft.com/memberOf"
        );
        assert_eq!(params(&url), vec![("api-version".into(), "1.6".into())]);
    }

    #[test]
    fn first_page_carries_filter_and_top() {
        let query = Query::new("users")
            .filter("startswith(displayName,'A')")
            .top(10);
        let url = client().first_page_url(&query).unwrap();
        let params = params(&url);
        assert!(params.contains(&("$filter".into(), "startswith(displayName,'A')".into())));
        assert!(params.contains(&("$top".into(), "10".into())));
    }

    #[test]
    fn relative_next_link_resolves_against_service_root() {
        let url = client()
            .resolve_next_link("directoryObjects/$/Microsoft.DirectoryServices.User?$skiptoken=X'44'")
            .unwrap();
        assert_eq!(url.host_str(), Some("graph.windows.net"));
        assert!(url.path().starts_with("/contoso.onmicrosoft.com/directoryObjects/"));
        let params = params(&url);
        assert!(params.contains(&("$skiptoken".into(), "X'44'".into())));
        assert!(params.contains(&("api-version".into(), "1.6".into())));
    }

    #[test]
    fn absolute_next_link_keeps_its_api_version() {
        let link = "https://graph.windows.net/contoso.onmicrosoft.com/users?api-version=1.6&$skiptoken=abc";
        let url = client().resolve_next_link(link).unwrap();
        let versions = params(&url)
            .into_iter()
            .filter(|(k, _)| k == "api-version")
            .count();
        assert_eq!(versions, 1);
    }

    #[test]
    fn next_link_with_foreign_scheme_is_rejected() {
        assert!(client().resolve_next_link("ftp://example.com/users").is_err());
    }

    #[test]
    fn undecodable_body_is_server_error() {
        let err = decode::<ODataPage<serde_json::Value>>("not json").unwrap_err();
        assert!(matches!(
            err,
            dirgraph_core::Error::Request(RequestError { kind: RequestErrorKind::Server, .. })
        ));
    }
}

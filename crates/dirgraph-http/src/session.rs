//! HTTP-backed directory session.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use dirgraph_core::{
    AuthFlow, ContinuationToken, DirectoryConfig, EndpointUrl, Error, Page, PageSource,
    PagedCursor, Query, Result, TokenProvider,
};

use crate::graph::GraphClient;

/// A connection to one tenant's directory under one authentication flow.
///
/// The session holds no credentials of its own; it asks its
/// [`TokenProvider`] for a token before every request. A 401 answer makes
/// it drop that flow's cached token and report
/// [`RequestErrorKind::Unauthorized`](dirgraph_core::RequestErrorKind::Unauthorized).
#[derive(Clone)]
pub struct DirectorySession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    flow: AuthFlow,
    client: GraphClient,
    tokens: Arc<dyn TokenProvider>,
}

impl DirectorySession {
    pub fn new(flow: AuthFlow, client: GraphClient, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                flow,
                client,
                tokens,
            }),
        }
    }

    /// Create a session for the tenant named in `config`.
    pub fn connect(
        config: &DirectoryConfig,
        flow: AuthFlow,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        Ok(Self::new(flow, GraphClient::from_config(config)?, tokens))
    }

    pub fn flow(&self) -> AuthFlow {
        self.inner.flow
    }

    pub fn service_root(&self) -> &EndpointUrl {
        self.inner.client.service_root()
    }

    /// Open a cursor over `query`, fetching its first page.
    #[instrument(skip(self), fields(flow = %self.inner.flow, path = %query.path()))]
    pub async fn open<T>(&self, query: &Query) -> Result<PagedCursor<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        PagedCursor::open(self.page_source(), query).await
    }

    /// A [`PageSource`] that answers queries through this session.
    pub fn page_source<T>(&self) -> Arc<dyn PageSource<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        Arc::new(HttpPageSource {
            session: self.clone(),
            _item: PhantomData,
        })
    }

    /// Fetch a single resource, e.g. `me` or `tenantDetails/{id}`.
    #[instrument(skip(self), fields(flow = %self.inner.flow))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let token = self.inner.tokens.token(self.inner.flow).await?;
        let result = self
            .inner
            .client
            .get_object(path, token.access_token())
            .await;
        self.check_unauthorized(result)
    }

    async fn fetch_page<T: DeserializeOwned>(&self, url: Url) -> Result<Page<T>> {
        let token = self.inner.tokens.token(self.inner.flow).await?;
        let result = self.inner.client.get_page(url, token.access_token()).await;
        self.check_unauthorized(result)
    }

    fn check_unauthorized<R>(&self, result: Result<R>) -> Result<R> {
        if let Err(Error::Request(ref e)) = result {
            if e.is_unauthorized() {
                warn!(flow = %self.inner.flow, "Directory rejected token; invalidating");
                self.inner.tokens.invalidate(self.inner.flow);
            }
        }
        result
    }
}

impl std::fmt::Debug for DirectorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectorySession")
            .field("flow", &self.inner.flow)
            .field("service_root", self.inner.client.service_root())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

/// Page source that issues one directory request per call.
struct HttpPageSource<T> {
    session: DirectorySession,
    _item: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T> PageSource<T> for HttpPageSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn first_page(&self, query: &Query) -> Result<Page<T>> {
        let url = self.session.inner.client.first_page_url(query)?;
        debug!(%url, "First page");
        self.session.fetch_page(url).await
    }

    async fn next_page(&self, continuation: &ContinuationToken) -> Result<Page<T>> {
        let url = self
            .session
            .inner
            .client
            .resolve_next_link(continuation.as_str())?;
        debug!(%url, "Next page");
        self.session.fetch_page(url).await
    }
}

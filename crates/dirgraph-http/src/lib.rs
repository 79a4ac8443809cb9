//! dirgraph-http - reqwest-backed token broker and directory session.
//!
//! [`TokenBroker`] talks to the OAuth2 token endpoint and caches what it
//! gets. [`DirectorySession`] turns a [`Query`](dirgraph_core::Query) into a
//! [`PagedCursor`](dirgraph_core::PagedCursor) backed by HTTP requests.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dirgraph_core::{AuthFlow, Collection, DirectoryConfig, Query, User};
//! use dirgraph_http::{DirectorySession, TokenBroker};
//!
//! # async fn example() -> dirgraph_core::Result<()> {
//! let config = DirectoryConfig::builder()
//!     .tenant_id("contoso.onmicrosoft.com")
//!     .client_id("dacf386f-a055-4a78-8ade-6365265f020b")
//!     .client_secret("s3cr3t")
//!     .build()?;
//!
//! let broker = Arc::new(TokenBroker::new(config.clone())?);
//! let session = DirectorySession::connect(&config, AuthFlow::Application, broker)?;
//!
//! let mut cursor = session.open::<User>(&Query::collection(&Collection::Users)).await?;
//! loop {
//!     for user in cursor.current_page() {
//!         println!("{:?}", user.display_name);
//!     }
//!     if !cursor.advance().await? {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod broker;
mod graph;
mod session;

pub use broker::TokenBroker;
pub use graph::GraphClient;
pub use session::DirectorySession;

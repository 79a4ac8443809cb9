//! Core traits for token acquisition and page retrieval.

mod page_source;
mod token_provider;

pub use page_source::PageSource;
pub use token_provider::TokenProvider;

//! Snippet lifecycle and the browse view.

pub mod browse;
pub mod service;

pub use browse::{BrowseQuery, BrowseState, BrowseView};
pub use service::SnippetService;

//! Core traits defined in `codekeep-core` and implemented by other crates.

pub mod assistant;

pub use assistant::{Assistant, BugReport, ImageTheme, SnippetDetails};

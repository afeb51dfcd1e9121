//! # codekeep-service
//!
//! Business logic service layer for CodeKeep. Each service orchestrates
//! repositories and units of work to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Every call that touches
//! account data takes an explicit [`AccountContext`].

pub mod account;
pub mod assist;
pub mod context;
pub mod folder;
pub mod share;
pub mod snippet;
pub mod stats;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use account::AccountService;
pub use assist::{AssistService, DisabledAssistant, HttpAssistant};
pub use context::AccountContext;
pub use folder::FolderService;
pub use share::{AccessService, ShareTokenGenerator};
pub use snippet::{BrowseQuery, BrowseState, BrowseView, SnippetService};
pub use stats::StatsService;
pub use version::{RestoreService, VersionService};

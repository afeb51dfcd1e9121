//! Repository implementations for all CodeKeep entities.
//!
//! Reads go straight to the pool. Writes that must compose with other
//! writes take a [`UnitOfWork`](crate::UnitOfWork).

pub mod account;
pub mod folder;
pub mod snippet;
pub mod version;

pub use account::AccountRepository;
pub use folder::FolderRepository;
pub use snippet::SnippetRepository;
pub use version::VersionRepository;

//! Version history and restore.

pub mod restore;
pub mod service;

pub use restore::RestoreService;
pub use service::VersionService;

//! # codekeep-core
//!
//! Core crate for CodeKeep. Contains configuration schemas, the shared
//! sort option used by the snippet browser, the assistant collaborator
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CodeKeep crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

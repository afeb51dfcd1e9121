//! HTTP request handlers, one module per resource.

pub mod account;
pub mod assist;
pub mod folder;
pub mod health;
pub mod share;
pub mod snippet;
pub mod stats;
pub mod v1;
pub mod version;

//! Custom Axum extractors.

pub mod auth;
pub mod path;

pub use auth::ApiKeyAuth;
pub use path::parse_uuid;

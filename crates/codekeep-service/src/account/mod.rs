//! Account lookup and API key management.

pub mod service;

pub use service::AccountService;

//! Account domain entities.

pub mod model;

pub use model::{Account, DEFAULT_USERNAME, generate_api_key};

//! Data transfer objects for API requests and responses.

pub mod request;
pub mod response;

pub use request::validate_request;
pub use response::ApiResponse;

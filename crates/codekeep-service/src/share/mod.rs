//! Share tokens and the anonymous access gate.

pub mod access;
pub mod token;

pub use access::AccessService;
pub use token::{SHARE_TOKEN_ALPHABET, ShareTokenGenerator, TokenSource};

//! Snippet version history entities.

pub mod model;

pub use model::{SnippetSnapshot, SnippetVersion};

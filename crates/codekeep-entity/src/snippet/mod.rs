//! Snippet domain entities.

pub mod model;
pub mod tags;
pub mod update;

pub use model::{CreateSnippet, PublicSnippet, Snippet};
pub use tags::{normalize_tags, parse_tag_list};
pub use update::{FieldUpdate, UpdateSnippet};

//! Core type definitions used across the CodeKeep workspace.

pub mod sorting;

pub use sorting::{SortDirection, SortOption};

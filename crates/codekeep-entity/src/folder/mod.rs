//! Folder domain entities.

pub mod model;

pub use model::{Folder, clean_folder_name};

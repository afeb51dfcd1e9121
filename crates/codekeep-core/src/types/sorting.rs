//! Sorting types for snippet listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Sort options offered by the snippet browser.
///
/// The wire names (`newest`, `oldest`, `a-z`, `z-a`) are the values the
/// browser's sort selector sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// Most recently created first.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Oldest first.
    #[serde(rename = "oldest")]
    Oldest,
    /// Name, A to Z.
    #[serde(rename = "a-z")]
    NameAsc,
    /// Name, Z to A.
    #[serde(rename = "z-a")]
    NameDesc,
}

impl SortOption {
    /// The wire name of this option.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::NameAsc => "a-z",
            Self::NameDesc => "z-a",
        }
    }

    /// The direction this option sorts in.
    pub fn direction(&self) -> SortDirection {
        match self {
            Self::Oldest | Self::NameAsc => SortDirection::Asc,
            Self::Newest | Self::NameDesc => SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "a-z" | "name" | "name-asc" => Ok(Self::NameAsc),
            "z-a" | "name-desc" => Ok(Self::NameDesc),
            other => Err(AppError::validation(format!("Unknown sort option: {other}"))),
        }
    }
}

//! Dashboard aggregates over an account's snippets.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use codekeep_entity::snippet::Snippet;

/// How many snippets the dashboard lists as recent.
pub const RECENT_LIMIT: usize = 5;

/// Snippet count for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub name: String,
    pub count: u64,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of snippets.
    pub total_snippets: u64,
    /// Number of distinct languages.
    pub total_languages: u64,
    /// Number of distinct tags.
    pub total_tags: u64,
    /// Sum of tag counts over all snippets.
    pub tag_usages: u64,
    /// Snippets per language, one decimal; zero with no languages.
    pub avg_snippets_per_language: f64,
    /// Languages by count descending, then name.
    pub language_distribution: Vec<LanguageCount>,
    /// Newest snippets.
    pub recent: Vec<Snippet>,
}

impl DashboardStats {
    /// Computes the stats from snippets ordered newest first.
    pub fn compute(snippets: &[Snippet]) -> Self {
        let mut languages: BTreeMap<&str, u64> = BTreeMap::new();
        let mut tags: HashSet<&str> = HashSet::new();
        let mut tag_usages = 0u64;

        for snippet in snippets {
            *languages.entry(snippet.language.as_str()).or_default() += 1;
            tag_usages += snippet.tags.len() as u64;
            tags.extend(snippet.tags.iter().map(String::as_str));
        }

        let mut language_distribution: Vec<LanguageCount> = languages
            .into_iter()
            .map(|(name, count)| LanguageCount {
                name: name.to_string(),
                count,
            })
            .collect();
        language_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        let total_snippets = snippets.len() as u64;
        let total_languages = language_distribution.len() as u64;
        let avg_snippets_per_language = if total_languages == 0 {
            0.0
        } else {
            (total_snippets as f64 / total_languages as f64 * 10.0).round() / 10.0
        };

        Self {
            total_snippets,
            total_languages,
            total_tags: tags.len() as u64,
            tag_usages,
            avg_snippets_per_language,
            language_distribution,
            recent: snippets.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

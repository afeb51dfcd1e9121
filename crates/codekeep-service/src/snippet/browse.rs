//! Browse view: folder filter, free-text search, sort and selection over
//! a snapshot of an account's snippets.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use codekeep_core::types::{SortDirection, SortOption};
use codekeep_entity::snippet::Snippet;

/// Filter and sort inputs for a browse view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseQuery {
    /// Restrict to one folder; `None` shows every snippet.
    #[serde(default)]
    pub folder: Option<Uuid>,
    /// Case-insensitive substring filter.
    #[serde(default)]
    pub search: String,
    /// Sort order.
    #[serde(default)]
    pub sort: SortOption,
}

/// Current filter, sort and selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseState {
    pub folder: Option<Uuid>,
    pub search: String,
    pub sort: SortOption,
    pub selected: Option<Uuid>,
}

/// The snippet browser state machine.
///
/// Every transition that can change the visible list recomputes it and
/// moves the selection to the first visible snippet.
#[derive(Debug, Clone)]
pub struct BrowseView {
    items: Vec<Snippet>,
    state: BrowseState,
    visible: Vec<usize>,
}

impl BrowseView {
    /// Creates a view with the default state.
    pub fn new(items: Vec<Snippet>) -> Self {
        Self::from_query(items, &BrowseQuery::default())
    }

    /// Creates a view with the given filter and sort applied.
    pub fn from_query(items: Vec<Snippet>, query: &BrowseQuery) -> Self {
        let mut view = Self {
            items,
            state: BrowseState {
                folder: query.folder,
                search: query.search.clone(),
                sort: query.sort,
                selected: None,
            },
            visible: Vec::new(),
        };
        view.recompute();
        view
    }

    /// Current state.
    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    /// All snippets held by the view, unfiltered.
    pub fn items(&self) -> &[Snippet] {
        &self.items
    }

    /// Visible snippets in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Snippet> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    /// Number of visible snippets.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Consumes the view, returning the visible snippets in order.
    pub fn into_visible(self) -> Vec<Snippet> {
        let mut slots: Vec<Option<Snippet>> = self.items.into_iter().map(Some).collect();
        self.visible
            .iter()
            .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
            .collect()
    }

    /// The selected snippet, if any.
    pub fn selected(&self) -> Option<&Snippet> {
        let id = self.state.selected?;
        self.visible().find(|s| s.id == id)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.search = search.into();
        self.recompute();
    }

    pub fn select_folder(&mut self, folder: Option<Uuid>) {
        self.state.folder = folder;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.state.sort = sort;
        self.recompute();
    }

    /// Swaps in a fresh snapshot of the account's snippets.
    pub fn replace_items(&mut self, items: Vec<Snippet>) {
        self.items = items;
        self.recompute();
    }

    /// Drops a snippet from the view. Returns `false` if it was not held.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|s| s.id != id);
        let removed = self.items.len() != before;
        self.recompute();
        removed
    }

    /// Selects a visible snippet. Anything else leaves the selection as is.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.visible().any(|s| s.id == id) {
            self.state.selected = Some(id);
            true
        } else {
            false
        }
    }

    fn recompute(&mut self) {
        let needle = self.state.search.trim().to_lowercase();
        let folder = self.state.folder;

        let mut visible: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, s)| folder.is_none() || s.folder_id == folder)
            .filter(|(_, s)| s.matches_search(&needle))
            .map(|(i, _)| i)
            .collect();

        let items = &self.items;
        let sort = self.state.sort;
        visible.sort_by(|&a, &b| compare(&items[a], &items[b], sort));

        self.state.selected = visible.first().map(|&i| items[i].id);
        self.visible = visible;
    }
}

fn compare(a: &Snippet, b: &Snippet, sort: SortOption) -> Ordering {
    let primary = match sort {
        SortOption::Newest | SortOption::Oldest => a.created_at.cmp(&b.created_at),
        SortOption::NameAsc | SortOption::NameDesc => {
            a.name.to_lowercase().cmp(&b.name.to_lowercase())
        }
    };
    let primary = match sort.direction() {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

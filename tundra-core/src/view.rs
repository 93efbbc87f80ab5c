//! Visible-set derivation: filtering and sorting
//!
//! A pure function over the task list; storage order is never mutated.

use crate::category::{CategoryId, CategorySet};
use crate::task::Task;

/// Sort order for the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Insertion order, no sorting applied
    #[default]
    Insertion,
    /// Newest first by creation time
    Recent,
    /// Case-sensitive lexicographic by text
    Alpha,
    /// Lexicographic by category name, ties broken by text
    Category,
}

impl SortMode {
    /// Create from string; unrecognized values mean "no sort"
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "recent" => Self::Recent,
            "alpha" => Self::Alpha,
            "category" => Self::Category,
            _ => Self::Insertion,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SortMode::Insertion => "insertion",
            SortMode::Recent => "recent",
            SortMode::Alpha => "alpha",
            SortMode::Category => "category",
        }
    }
}

/// Category filter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every category
    #[default]
    All,
    /// Show a single category
    One(CategoryId),
}

/// Ephemeral view state: which slice of the store the user is looking at.
/// Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// true shows the completed view, false the active one
    pub completed: bool,
    pub category: CategoryFilter,
    pub sort: SortMode,
}

/// Derive the visible task list: filter, then stable-sort.
///
/// Returned tasks carry their stable ids, so actions taken from a filtered
/// or sorted view still target the right underlying entity.
pub fn derive_visible<'a>(
    tasks: &'a [Task],
    categories: &CategorySet,
    view: &ViewState,
) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.completed == view.completed)
        .filter(|t| match view.category {
            CategoryFilter::All => true,
            CategoryFilter::One(id) => t.category == id,
        })
        .collect();

    match view.sort {
        SortMode::Insertion => {}
        SortMode::Recent => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Alpha => visible.sort_by(|a, b| a.text.cmp(&b.text)),
        SortMode::Category => visible.sort_by(|a, b| {
            let a_name = categories.name_of(a.category).unwrap_or_default();
            let b_name = categories.name_of(b.category).unwrap_or_default();
            a_name.cmp(b_name).then_with(|| a.text.cmp(&b.text))
        }),
    }

    visible
}

//! Category set with the permanent "Uncategorized" sentinel
//!
//! An ordered sequence of unique names. The sentinel is created with the
//! set and can never be renamed or removed.

use serde::{Deserialize, Serialize};

/// Name of the sentinel category
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Id of the sentinel category, present in every set
pub const UNCATEGORIZED: CategoryId = CategoryId(0);

/// Newtype wrapper for category IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        CategoryId(id)
    }
}

impl From<CategoryId> for u32 {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named grouping for tasks
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Ordered set of unique category names
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategorySet {
    categories: Vec<Category>,
    next_id: u32,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new()
    }
}

impl CategorySet {
    /// Create a set holding only the sentinel
    pub fn new() -> Self {
        CategorySet {
            categories: vec![Category {
                id: UNCATEGORIZED,
                name: UNCATEGORIZED_NAME.to_string(),
            }],
            next_id: 1,
        }
    }

    /// Add a category. Declines on empty-after-trim input and on an exact
    /// (case-sensitive) duplicate of an existing name.
    pub fn add(&mut self, name: &str) -> Option<CategoryId> {
        let name = name.trim();
        if name.is_empty() || self.contains_name(name) {
            return None;
        }
        let id = CategoryId(self.next_id);
        self.next_id += 1;
        self.categories.push(Category {
            id,
            name: name.to_string(),
        });
        Some(id)
    }

    /// Rename a category in place. Declines on the sentinel, unknown ids,
    /// empty names, an unchanged name, and a collision with any other
    /// category.
    pub fn rename(&mut self, id: CategoryId, new_name: &str) -> bool {
        if id == UNCATEGORIZED {
            return false;
        }
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return false;
        }
        let Some(pos) = self.categories.iter().position(|c| c.id == id) else {
            return false;
        };
        if self.categories[pos].name == new_name {
            return false;
        }
        if self.categories.iter().any(|c| c.id != id && c.name == new_name) {
            return false;
        }
        self.categories[pos].name = new_name.to_string();
        true
    }

    /// Remove a category. The sentinel stays no matter what.
    pub fn remove(&mut self, id: CategoryId) -> Option<Category> {
        if id == UNCATEGORIZED {
            return None;
        }
        let pos = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(pos))
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Resolve a category ID to its current name
    pub fn name_of(&self, id: CategoryId) -> Option<&str> {
        self.get(id).map(|c| c.name.as_str())
    }

    /// Look up a category by exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Check membership by ID
    pub fn contains(&self, id: CategoryId) -> bool {
        self.get(id).is_some()
    }

    /// Check membership by exact name
    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Iterate categories in display order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Count categories, sentinel included
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// A set is never empty; the sentinel is always present
    pub fn is_empty(&self) -> bool {
        false
    }
}

//! Task domain model
//!
//! Pure domain logic for to-do items with no I/O operations.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::category::{CategoryId, UNCATEGORIZED};

/// Newtype wrapper for task IDs
///
/// Tasks are addressed by this stable identifier, never by list position,
/// so deleting a task cannot leave anything pointing at a shifted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl From<u32> for TaskId {
    fn from(id: u32) -> Self {
        TaskId(id)
    }
}

impl From<TaskId> for u32 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Category this task belongs to; always a member of the store's set
    pub category: CategoryId,
    /// Assigned at creation, immutable afterwards; breaks ties for sorting
    pub created_at: DateTime<Local>,
}

impl Task {
    /// Create a new incomplete, uncategorized task with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TaskId(0),
            text: text.into(),
            completed: false,
            category: UNCATEGORIZED,
            created_at: Local::now(),
        }
    }

    /// Builder method to set the task ID
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Builder method to set completion status
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Builder method to set the category
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = category;
        self
    }

    /// Builder method to set the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Local>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Toggle completion status
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Creation time used for records that carry no timestamp; sorts as
    /// the oldest possible entry under the `recent` order.
    pub fn epoch() -> DateTime<Local> {
        Local.timestamp_opt(0, 0).single().unwrap_or_else(Local::now)
    }
}

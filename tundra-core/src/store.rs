//! The task/category store
//!
//! Holds the task list, the category set and the ephemeral view and edit
//! state, and applies every mutating operation including the cross-entity
//! cascades. All operations are total over the current state: invalid input
//! (empty strings, duplicate names, unknown ids) silently declines the
//! mutation and leaves the store consistent. A cascade updates every piece
//! of affected state inside one `&mut self` transition, so a partially
//! applied cascade is never observable.

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryId, CategorySet, UNCATEGORIZED};
use crate::error::{CoreError, Result};
use crate::task::{Task, TaskId};
use crate::view::{CategoryFilter, SortMode, ViewState, derive_visible};

/// A staged text edit of one entity: the stable id plus the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit<Id> {
    pub id: Id,
    pub draft: String,
}

/// The single global edit slots. At most one task and one category edit
/// may be open at a time; the two lifecycles are independent.
#[derive(Debug, Clone, Default)]
struct EditState {
    task: Option<Edit<TaskId>>,
    category: Option<Edit<CategoryId>>,
}

/// In-memory task and category state
///
/// Only the durable fields serialize; view and edit state live for the
/// session and reset on load.
#[derive(Serialize, Deserialize, Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_task_id: u32,
    categories: CategorySet,
    #[serde(skip)]
    edit: EditState,
    #[serde(skip)]
    view: ViewState,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store holding only the sentinel category
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_task_id: 1,
            categories: CategorySet::new(),
            edit: EditState::default(),
            view: ViewState::default(),
        }
    }

    // --- task operations ---

    /// Add a task from raw input. Declines empty-after-trim input; on
    /// success the caller clears its input buffer. The new task starts
    /// incomplete and uncategorized.
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = TaskId(self.next_task_id);
        self.next_task_id += 1;
        self.tasks.push(Task::new(text).with_id(id));
        Some(id)
    }

    /// Insert a fully-formed task (used by imports). Keeps id allocation
    /// monotonic and the category invariant intact.
    pub fn insert(&mut self, task: Task) {
        let mut task = task;
        if !self.categories.contains(task.category) {
            task.category = UNCATEGORIZED;
        }
        if task.id.0 >= self.next_task_id {
            self.next_task_id = task.id.0 + 1;
        }
        self.tasks.push(task);
    }

    /// Remove a task. If it was the one being edited, the edit slot is
    /// cleared so nothing references a gone entity.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(pos);
        if self.edit.task.as_ref().is_some_and(|e| e.id == id) {
            self.edit.task = None;
        }
        true
    }

    /// Flip completion on a task; no other field changes
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.toggle_completed();
                true
            }
            None => false,
        }
    }

    /// Move a task to a category. Declines unless the category is a member
    /// of the current set.
    pub fn set_task_category(&mut self, id: TaskId, category: CategoryId) -> bool {
        if !self.categories.contains(category) {
            return false;
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.category = category;
                true
            }
            None => false,
        }
    }

    // --- task edit lifecycle ---

    /// Begin editing a task, staging its current text as the draft.
    /// Starting an edit while another is open moves focus there and
    /// abandons the previous unsaved draft.
    pub fn begin_task_edit(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
            self.edit.task = Some(Edit {
                id,
                draft: task.text.clone(),
            });
        }
    }

    /// The currently open task edit, if any
    pub fn task_edit(&self) -> Option<&Edit<TaskId>> {
        self.edit.task.as_ref()
    }

    /// Replace the staged task draft
    pub fn set_task_draft(&mut self, draft: impl Into<String>) {
        if let Some(edit) = self.edit.task.as_mut() {
            edit.draft = draft.into();
        }
    }

    /// Commit the staged draft. An empty-after-trim draft is a no-op and
    /// the edit stays open; a valid draft replaces the text and closes it.
    pub fn commit_task_edit(&mut self) -> bool {
        let Some(edit) = self.edit.task.as_ref() else {
            return false;
        };
        let draft = edit.draft.trim();
        if draft.is_empty() {
            return false;
        }
        let id = edit.id;
        let committed = match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = draft.to_string();
                true
            }
            None => false,
        };
        self.edit.task = None;
        committed
    }

    /// Close the task edit without mutating anything
    pub fn cancel_task_edit(&mut self) {
        self.edit.task = None;
    }

    // --- category operations ---

    /// Add a category; same decline rules as [`CategorySet::add`]
    pub fn add_category(&mut self, name: &str) -> Option<CategoryId> {
        self.categories.add(name)
    }

    /// Rename a category in place. Tasks and an active filter pointing at
    /// it follow automatically because they hold the id, not the name.
    pub fn rename_category(&mut self, id: CategoryId, new_name: &str) -> bool {
        self.categories.rename(id, new_name)
    }

    /// Delete a category and cascade in one transition: member tasks move
    /// to Uncategorized, a filter pointing here resets to All, and an open
    /// edit of this category is dropped. The sentinel is refused.
    pub fn delete_category(&mut self, id: CategoryId) -> bool {
        if self.categories.remove(id).is_none() {
            return false;
        }
        for task in self.tasks.iter_mut().filter(|t| t.category == id) {
            task.category = UNCATEGORIZED;
        }
        if self.view.category == CategoryFilter::One(id) {
            self.view.category = CategoryFilter::All;
        }
        if self.edit.category.as_ref().is_some_and(|e| e.id == id) {
            self.edit.category = None;
        }
        true
    }

    // --- category edit lifecycle ---

    /// Begin editing a category name. The sentinel never enters edit mode.
    pub fn begin_category_edit(&mut self, id: CategoryId) {
        if id == UNCATEGORIZED {
            return;
        }
        if let Some(category) = self.categories.get(id) {
            self.edit.category = Some(Edit {
                id,
                draft: category.name.clone(),
            });
        }
    }

    /// The currently open category edit, if any
    pub fn category_edit(&self) -> Option<&Edit<CategoryId>> {
        self.edit.category.as_ref()
    }

    /// Replace the staged category draft
    pub fn set_category_draft(&mut self, draft: impl Into<String>) {
        if let Some(edit) = self.edit.category.as_mut() {
            edit.draft = draft.into();
        }
    }

    /// Commit the staged category name through the rename rules. Every
    /// outcome exits edit mode, declined renames included.
    pub fn commit_category_edit(&mut self) -> bool {
        let Some(edit) = self.edit.category.take() else {
            return false;
        };
        self.rename_category(edit.id, &edit.draft)
    }

    /// Close the category edit without mutating anything
    pub fn cancel_category_edit(&mut self) {
        self.edit.category = None;
    }

    // --- view state ---

    /// Switch between the active and completed views
    pub fn set_completed_filter(&mut self, completed: bool) {
        self.view.completed = completed;
    }

    /// Select the category filter. Declines a filter pointing outside the
    /// current set.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        if let CategoryFilter::One(id) = filter
            && !self.categories.contains(id)
        {
            return;
        }
        self.view.category = filter;
    }

    /// Select the sort mode
    pub fn set_sort(&mut self, sort: SortMode) {
        self.view.sort = sort;
    }

    /// The current view state
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The list the user sees: filtered and sorted per the current view
    /// state, storage order untouched
    pub fn visible(&self) -> Vec<&Task> {
        derive_visible(&self.tasks, &self.categories, &self.view)
    }

    // --- accessors ---

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The category set
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Get a task by ID
    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get or return an error if the task is unknown
    pub fn get_task_or_err(&self, id: TaskId) -> Result<&Task> {
        self.get_task(id).ok_or(CoreError::TaskNotFound(id))
    }

    /// Resolve a category name or return an error
    pub fn category_by_name_or_err(&self, name: &str) -> Result<&Category> {
        self.categories
            .find_by_name(name.trim())
            .ok_or_else(|| CoreError::CategoryNotFound(name.trim().to_string()))
    }

    /// Resolve a category ID to its current name
    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories.name_of(id)
    }

    /// Count total tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the store holds no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Count completed tasks
    pub fn count_completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

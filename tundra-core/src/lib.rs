//! Tundra Core - Pure domain logic for the task list
//!
//! This crate contains no I/O operations. Persistence and transport
//! are handled by adapters in consuming crates.

pub mod category;
pub mod error;
pub mod store;
pub mod task;
pub mod view;

pub use category::{Category, CategoryId, CategorySet, UNCATEGORIZED, UNCATEGORIZED_NAME};
pub use error::{CoreError, Result};
pub use store::{Edit, TaskStore};
pub use task::{Task, TaskId};
pub use view::{CategoryFilter, SortMode, ViewState, derive_visible};

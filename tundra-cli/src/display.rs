//! Task display formatting module
//!
//! Handles colored output and the different view modes for task lists

use chrono::{DateTime, Local};
use colored::*;

use tundra_core::{Task, UNCATEGORIZED_NAME};

/// Display mode for the task list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    /// Minimal one-line format
    Compact,
    /// Balanced view with category and age (default)
    Default,
}

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Format a task for display. The category name is resolved by the caller
/// since the task only carries the id.
pub fn format_task(task: &Task, category: &str, mode: DisplayMode, use_color: bool) -> String {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };

    let id_str = if use_color {
        format!("[{}]", task.id).cyan().to_string()
    } else {
        format!("[{}]", task.id)
    };

    let text = if use_color && task.completed {
        task.text.green().to_string()
    } else {
        task.text.clone()
    };

    // The sentinel is the default and carries no label
    let category_str = if category == UNCATEGORIZED_NAME {
        String::new()
    } else if use_color {
        format!(" @{}", category).magenta().to_string()
    } else {
        format!(" @{}", category)
    };

    match mode {
        DisplayMode::Compact => {
            format!("{} {} {}{}", checkbox, id_str, text, category_str)
        }
        DisplayMode::Default => {
            let age = format!("(added {})", format_created_human(task.created_at));
            let age_str = if use_color {
                age.normal().to_string()
            } else {
                age
            };
            format!("{} {} {}{} {}", checkbox, id_str, text, category_str, age_str)
        }
    }
}

/// Format a creation time for human-readable display
pub fn format_created_human(created_at: DateTime<Local>) -> String {
    let today = Local::now().date_naive();
    let date = created_at.date_naive();
    let diff = today.signed_duration_since(date).num_days();

    match diff {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => date.format("%a").to_string().to_lowercase(),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

/// Format a summary line for the visible list
pub fn format_summary(total: usize, completed: usize, use_color: bool) -> String {
    let done = if use_color {
        format!("{} done", completed).green().to_string()
    } else {
        format!("{} done", completed)
    };
    format!("[{} total | {}]", total, done)
}

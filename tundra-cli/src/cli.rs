use clap::{Parser, Subcommand, ValueEnum};

use tundra_core::SortMode;

#[derive(Parser)]
#[command(name = "tundra")]
#[command(about = "Organize tasks into categories, straight from the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortBy {
    Insertion,
    Recent,
    Alpha,
    Category,
}

impl From<SortBy> for SortMode {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Insertion => SortMode::Insertion,
            SortBy::Recent => SortMode::Recent,
            SortBy::Alpha => SortMode::Alpha,
            SortBy::Category => SortMode::Category,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adds a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Category for the task (must already exist)
        #[arg(long, short = 'C', value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Lists tasks with filtering and sorting
    List {
        /// Show the completed view instead of the active one
        #[arg(long)]
        completed: bool,
        /// Filter by category name (use 'all' for every category)
        #[arg(long, short = 'C', value_name = "CATEGORY")]
        category: Option<String>,
        /// Sort order for the visible list
        #[arg(long, value_enum, default_value = "insertion")]
        sort: SortBy,
        /// Use compact one-line format
        #[arg(long, short = 'c')]
        compact: bool,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Toggles task completion status
    Check {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
    },

    /// Removes a task
    Remove {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
    },

    /// Edit a task's text
    Edit {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Move a task to a different category
    Move {
        /// Task ID to move
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
        /// Target category name
        category: String,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Pull categories and tasks from the remote API, replacing local state
    Sync {
        /// Only fetch tasks in this remote category id
        #[arg(long, value_name = "ID")]
        category_id: Option<u32>,
        /// Override the configured API base URL
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Recover tasks from backup file
    Recover {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add a category
    Add {
        /// Category name
        name: String,
    },
    /// Rename a category
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },
    /// Remove a category; its tasks move to Uncategorized
    Remove {
        /// Category name
        name: String,
    },
    /// List all categories
    List,
}

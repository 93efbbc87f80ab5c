use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use tundra_core::{CategoryFilter, TaskId, UNCATEGORIZED_NAME};

use crate::cli::{CategoryAction, Cli, Commands};
use crate::display::{DisplayMode, format_summary, format_task, supports_color};
use crate::error::{CliError, Result};
use crate::remote::{RemoteClient, build_store};
use crate::storage::JsonStorage;

mod cli;
mod config;
mod display;
mod error;
mod remote;
mod storage;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg: config::Config = confy::load("tundra", None)?;
    let mut snapshot_path = PathBuf::from(&cfg.data_directory);
    snapshot_path.push(&cfg.tasks_filename);

    let storage = JsonStorage::new(&snapshot_path);

    match cli.command {
        Commands::Add { text, category } => {
            let mut store = storage.load()?;
            let text = text.join(" ");

            // Resolve before mutating so an unknown name declines the whole add
            let category_id = match &category {
                Some(name) => Some(store.category_by_name_or_err(name)?.id),
                None => None,
            };

            let Some(id) = store.add_task(&text) else {
                return Err(CliError::validation("add", "Task text cannot be empty"));
            };
            if let Some(category_id) = category_id {
                store.set_task_category(id, category_id);
            }
            storage.save(&store)?;

            let task = store.get_task_or_err(id)?;
            match &category {
                Some(name) => println!("Task added: {} @{}", task.text, name.trim()),
                None => println!("Task added: {}", task.text),
            }
        }

        Commands::List {
            completed,
            category,
            sort,
            compact,
            no_color,
        } => {
            let mut store = storage.load()?;

            store.set_completed_filter(completed);
            if let Some(name) = category {
                if name.eq_ignore_ascii_case("all") {
                    store.set_category_filter(CategoryFilter::All);
                } else {
                    let id = store.category_by_name_or_err(&name)?.id;
                    store.set_category_filter(CategoryFilter::One(id));
                }
            }
            store.set_sort(sort.into());

            let visible = store.visible();
            if visible.is_empty() {
                println!("No tasks found.");
            } else {
                let mode = if compact {
                    DisplayMode::Compact
                } else {
                    DisplayMode::Default
                };
                let use_color = !no_color && supports_color();

                for task in &visible {
                    let category_name = store
                        .category_name(task.category)
                        .unwrap_or(UNCATEGORIZED_NAME);
                    println!("{}", format_task(task, category_name, mode, use_color));
                }

                println!();
                let done = visible.iter().filter(|t| t.completed).count();
                println!("{}", format_summary(visible.len(), done, use_color));
            }
        }

        Commands::Check { id } => {
            let mut store = storage.load()?;
            let task_id = TaskId(id);
            if !store.toggle_completed(task_id) {
                return Err(CliError::TaskNotFound(id));
            }
            let task = store.get_task_or_err(task_id)?;
            let status = if task.completed { "done" } else { "open" };
            println!("Marked task #{} as {}: {}", task.id, status, task.text);
            storage.save(&store)?;
        }

        Commands::Remove { id } => {
            let mut store = storage.load()?;
            let task_id = TaskId(id);
            let text = store.get_task_or_err(task_id)?.text.clone();
            store.delete_task(task_id);
            println!("Removed: {}", text);
            storage.save(&store)?;
        }

        Commands::Edit { id, text } => {
            let mut store = storage.load()?;
            let task_id = TaskId(id);
            store.get_task_or_err(task_id)?;

            store.begin_task_edit(task_id);
            store.set_task_draft(text.join(" "));
            if !store.commit_task_edit() {
                return Err(CliError::validation("edit", "Task text cannot be empty"));
            }

            let task = store.get_task_or_err(task_id)?;
            println!("Updated task #{}: {}", task.id, task.text);
            storage.save(&store)?;
        }

        Commands::Move { id, category } => {
            let mut store = storage.load()?;
            let task_id = TaskId(id);
            store.get_task_or_err(task_id)?;
            let category_id = store.category_by_name_or_err(&category)?.id;

            store.set_task_category(task_id, category_id);
            let task = store.get_task_or_err(task_id)?;
            println!("Moved task #{} to {}: {}", task.id, category.trim(), task.text);
            storage.save(&store)?;
        }

        Commands::Category { action } => match action {
            CategoryAction::Add { name } => {
                let mut store = storage.load()?;
                if store.add_category(&name).is_none() {
                    return Err(CliError::validation(
                        "category",
                        format!("'{}' is empty or already exists", name.trim()),
                    ));
                }
                storage.save(&store)?;
                println!("Category added: {}", name.trim());
            }

            CategoryAction::Rename { name, new_name } => {
                let mut store = storage.load()?;
                let id = store.category_by_name_or_err(&name)?.id;
                if !store.rename_category(id, &new_name) {
                    return Err(CliError::validation(
                        "category",
                        format!("Cannot rename '{}' to '{}'", name.trim(), new_name.trim()),
                    ));
                }
                storage.save(&store)?;
                println!("Renamed category '{}' to '{}'", name.trim(), new_name.trim());
            }

            CategoryAction::Remove { name } => {
                let mut store = storage.load()?;
                let id = store.category_by_name_or_err(&name)?.id;
                let moved = store.tasks().iter().filter(|t| t.category == id).count();
                if !store.delete_category(id) {
                    return Err(CliError::validation(
                        "category",
                        format!("'{}' cannot be removed", UNCATEGORIZED_NAME),
                    ));
                }
                storage.save(&store)?;
                println!(
                    "Removed category '{}' ({} task(s) moved to {})",
                    name.trim(),
                    moved,
                    UNCATEGORIZED_NAME
                );
            }

            CategoryAction::List => {
                let store = storage.load()?;
                for category in store.categories().iter() {
                    let count = store
                        .tasks()
                        .iter()
                        .filter(|t| t.category == category.id)
                        .count();
                    println!("{} ({} task(s))", category.name, count);
                }
            }
        },

        Commands::Sync {
            category_id,
            base_url,
        } => {
            let base = base_url.unwrap_or_else(|| cfg.api_base_url.clone());
            let client = RemoteClient::new(base)?;
            let runtime = tokio::runtime::Runtime::new()?;

            let seq = client.begin_fetch();
            if client.is_loading() {
                println!("Fetching tasks from {}...", client.base_url());
            }

            let result = runtime.block_on(async {
                tokio::try_join!(client.fetch_categories(), client.fetch_tasks(category_id))
            });

            match result {
                Ok((categories, tasks)) => {
                    if client.finish_fetch(seq, true) {
                        let store = build_store(&categories, &tasks);
                        storage.save(&store)?;
                        println!(
                            "Synced {} task(s) across {} categor{}.",
                            store.len(),
                            store.categories().len(),
                            if store.categories().len() == 1 { "y" } else { "ies" }
                        );
                    }
                }
                Err(e) => {
                    client.finish_fetch(seq, false);
                    eprintln!("Warning: sync failed, local tasks left untouched: {}", e);
                }
            }
        }

        Commands::Recover { force } => {
            if !storage.backup_exists() {
                return Err(CliError::storage("No backup file found"));
            }

            if !force && !confirm("Restore tasks from backup? Current tasks will be replaced.")? {
                println!("Cancelled.");
                return Ok(());
            }

            let recovered = storage.recover()?;
            storage.save(&recovered)?;
            println!("Recovered {} task(s) from backup.", recovered.len());
        }
    }

    Ok(())
}

/// Ask user for confirmation
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y")
}

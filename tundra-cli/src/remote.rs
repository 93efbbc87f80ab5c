//! Remote API client for the networked variant
//!
//! Read-only access to the category and task endpoints. A successful fetch
//! replaces the local contents wholesale; a failed fetch is reported and
//! leaves prior state untouched. Overlapping fetches resolve
//! last-request-wins through monotonically increasing sequence numbers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Deserialize;

use tundra_core::{Task, TaskId, TaskStore, UNCATEGORIZED};

use crate::error::Result;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One category record as served by `/api/categories.php`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub id: u32,
    pub name: String,
}

/// One task record as served by `/api/tasks.php`
///
/// Everything past id and title is optional; absent fields take the same
/// defaults a locally created task would.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category_id: Option<u32>,
    /// RFC 3339; records without one sort as oldest under `recent`
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// HTTP client for the task API
pub struct RemoteClient {
    base_url: String,
    http: reqwest::Client,
    issued: AtomicU64,
    applied: AtomicU64,
    in_flight: AtomicUsize,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True while any fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Take a sequence number for a new fetch
    pub fn begin_fetch(&self) -> u64 {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Mark a fetch finished and decide whether its result may be applied.
    /// A fetch loses once a later-issued fetch has applied its result.
    pub fn finish_fetch(&self, seq: u64, succeeded: bool) -> bool {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if !succeeded {
            return false;
        }
        self.applied.fetch_max(seq, Ordering::SeqCst) < seq
    }

    /// Fetch all categories
    pub async fn fetch_categories(&self) -> Result<Vec<CategoryRecord>> {
        let url = format!("{}/api/categories.php", self.base_url);
        let records = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(records)
    }

    /// Fetch tasks, optionally filtered server-side by category id
    pub async fn fetch_tasks(&self, category_id: Option<u32>) -> Result<Vec<TaskRecord>> {
        let url = match category_id {
            Some(id) => format!("{}/api/tasks.php?category_id={}", self.base_url, id),
            None => format!("{}/api/tasks.php", self.base_url),
        };
        let records = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(records)
    }
}

/// Build a fresh store from fetched records. Remote categories keep their
/// names; tasks pointing at an unknown or missing category land in
/// Uncategorized, and blank titles are skipped.
pub fn build_store(categories: &[CategoryRecord], tasks: &[TaskRecord]) -> TaskStore {
    let mut store = TaskStore::new();

    // Remote category id -> local id. A payload entry colliding with an
    // existing name (the sentinel included) maps onto that entry.
    let mut id_map = HashMap::new();
    for record in categories {
        if let Some(local) = store.add_category(&record.name) {
            id_map.insert(record.id, local);
        } else if let Some(existing) = store.categories().find_by_name(record.name.trim()) {
            id_map.insert(record.id, existing.id);
        }
    }

    for record in tasks {
        let text = record.title.trim();
        if text.is_empty() {
            continue;
        }
        let category = record
            .category_id
            .and_then(|id| id_map.get(&id).copied())
            .unwrap_or(UNCATEGORIZED);
        let created_at = record
            .created_at
            .map(|dt| dt.with_timezone(&Local))
            .unwrap_or_else(Task::epoch);

        store.insert(
            Task::new(text)
                .with_id(TaskId(record.id))
                .with_completed(record.completed)
                .with_category(category)
                .with_created_at(created_at),
        );
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use tundra_core::UNCATEGORIZED_NAME;

    #[test]
    fn test_task_record_lenient_deserialization() {
        let json = r#"[
            {"id": 1, "title": "Buy milk", "completed": true,
             "category_id": 3, "created_at": "2026-08-20T10:00:00Z"},
            {"id": 2, "title": "Write report"}
        ]"#;

        let records: Vec<TaskRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].completed);
        assert_eq!(records[0].category_id, Some(3));
        assert!(records[1].created_at.is_none());
        assert!(!records[1].completed);
    }

    #[test]
    fn test_category_record_deserialization() {
        let json = r#"[{"id": 3, "name": "Errands"}]"#;
        let records: Vec<CategoryRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].name, "Errands");
    }

    #[test]
    fn test_build_store_maps_categories() {
        let categories = vec![
            CategoryRecord { id: 3, name: "Errands".to_string() },
            CategoryRecord { id: 7, name: "Work".to_string() },
        ];
        let tasks = vec![
            TaskRecord {
                id: 1,
                title: "Buy milk".to_string(),
                completed: false,
                category_id: Some(3),
                created_at: None,
            },
            TaskRecord {
                id: 2,
                title: "No such category".to_string(),
                completed: false,
                category_id: Some(99),
                created_at: None,
            },
            TaskRecord {
                id: 3,
                title: "   ".to_string(),
                completed: false,
                category_id: None,
                created_at: None,
            },
        ];

        let store = build_store(&categories, &tasks);

        // Blank title skipped
        assert_eq!(store.len(), 2);

        let milk = store.get_task(TaskId(1)).unwrap();
        assert_eq!(store.category_name(milk.category), Some("Errands"));
        assert_eq!(milk.created_at, Task::epoch());

        let stray = store.get_task(TaskId(2)).unwrap();
        assert_eq!(store.category_name(stray.category), Some(UNCATEGORIZED_NAME));
    }

    #[test]
    fn test_build_store_handles_sentinel_in_payload() {
        let categories = vec![CategoryRecord { id: 1, name: UNCATEGORIZED_NAME.to_string() }];
        let tasks = vec![TaskRecord {
            id: 5,
            title: "misc".to_string(),
            completed: false,
            category_id: Some(1),
            created_at: None,
        }];

        let store = build_store(&categories, &tasks);
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.get_task(TaskId(5)).unwrap().category, UNCATEGORIZED);
    }

    #[test]
    fn test_last_request_wins_ordering() {
        let client = RemoteClient::new("http://localhost:8000").unwrap();

        let first = client.begin_fetch();
        let second = client.begin_fetch();
        assert!(client.is_loading());

        // The later request lands first and wins
        assert!(client.finish_fetch(second, true));
        // The earlier one arrives afterwards and is discarded
        assert!(!client.finish_fetch(first, true));
        assert!(!client.is_loading());
    }

    #[test]
    fn test_failed_fetch_never_applies() {
        let client = RemoteClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");

        let seq = client.begin_fetch();
        assert!(!client.finish_fetch(seq, false));

        // A later fetch still applies normally
        let seq = client.begin_fetch();
        assert!(client.finish_fetch(seq, true));
    }
}

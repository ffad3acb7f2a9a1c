//! To-do task store.
//!
//! # Responsibility
//! - Load the task list from a [`BlobStore`] once when the store is built.
//! - Write the full list back after every change.
//!
//! # Invariants
//! - Loading never writes and never fails; a missing or corrupt blob is an
//!   empty list.
//! - Task ids are strictly increasing in insertion order.
//! - In-memory state stays authoritative when a write fails.

use crate::config::TASKS_BLOB_KEY;
use crate::logging::single_line;
use crate::model::task::{TaskId, TaskItem};
use crate::repo::blob_repo::BlobStore;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const MAX_LOGGED_DECODE_ERROR_CHARS: usize = 120;

/// Rejection of a task mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Task text is empty after trimming.
    BlankText,
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "task text cannot be blank"),
        }
    }
}

impl Error for TaskStoreError {}

/// Persistent to-do list.
pub struct TaskStore<B: BlobStore> {
    blobs: B,
    items: Vec<TaskItem>,
    clock: fn() -> i64,
}

impl<B: BlobStore> TaskStore<B> {
    /// Builds the store from whatever the blob store holds under `tasks`.
    pub fn load(blobs: B) -> Self {
        Self::load_with_clock(blobs, now_epoch_ms)
    }

    /// Same as [`Self::load`] with an explicit epoch-milliseconds clock.
    pub fn load_with_clock(blobs: B, clock: fn() -> i64) -> Self {
        let items = read_items(&blobs);
        info!(
            "event=tasks_load module=task_store status=ok count={}",
            items.len()
        );
        Self {
            blobs,
            items,
            clock,
        }
    }

    /// Appends an open task with the trimmed `text`.
    ///
    /// # Errors
    /// - `BlankText` when `text` is empty after trimming; nothing changes.
    pub fn add(&mut self, text: &str) -> Result<TaskItem, TaskStoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskStoreError::BlankText);
        }

        let now = (self.clock)();
        let id = match self.items.iter().map(|item| item.id).max() {
            Some(last) if last >= now => last.saturating_add(1),
            _ => now,
        };
        let item = TaskItem::new(id, text, now);
        self.items.push(item.clone());
        self.persist();
        Ok(item)
    }

    /// Removes task `id`. Returns `false` and writes nothing when absent.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Flips completion of task `id`. Returns `false` and writes nothing when absent.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.toggle();
        self.persist();
        true
    }

    pub fn items(&self) -> &[TaskItem] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!("event=tasks_persist module=task_store status=error stage=encode error={err}");
                return;
            }
        };

        if let Err(err) = self.blobs.put(TASKS_BLOB_KEY, &encoded) {
            error!("event=tasks_persist module=task_store status=error stage=write error={err}");
        }
    }
}

fn read_items(blobs: &impl BlobStore) -> Vec<TaskItem> {
    let raw = match blobs.get(TASKS_BLOB_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=tasks_load module=task_store status=error stage=read error={err}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<TaskItem>>(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(
                "event=tasks_load module=task_store status=error stage=decode error={}",
                single_line(&err.to_string(), MAX_LOGGED_DECODE_ERROR_CHARS)
            );
            Vec::new()
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::repo::memory::MemoryBlobStore;

    fn frozen_clock() -> i64 {
        1_000
    }

    #[test]
    fn ids_stay_unique_when_clock_does_not_advance() {
        let mut store = TaskStore::load_with_clock(MemoryBlobStore::new(), frozen_clock);
        let first = store.add("one").unwrap();
        let second = store.add("two").unwrap();
        let third = store.add("three").unwrap();

        assert_eq!(first.id, 1_000);
        assert_eq!(second.id, 1_001);
        assert_eq!(third.id, 1_002);
        assert_eq!(third.created_at, 1_000);
    }

    #[test]
    fn add_trims_text() {
        let mut store = TaskStore::load_with_clock(MemoryBlobStore::new(), frozen_clock);
        assert_eq!(store.add("  Buy milk \n").unwrap().text, "Buy milk");
    }

    #[test]
    fn counts_track_completion() {
        let mut store = TaskStore::load_with_clock(MemoryBlobStore::new(), frozen_clock);
        let first = store.add("one").unwrap();
        store.add("two").unwrap();
        store.toggle(first.id);

        assert_eq!(store.total(), 2);
        assert_eq!(store.completed_count(), 1);
    }
}

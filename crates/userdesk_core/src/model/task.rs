//! To-do item model.
//!
//! # Invariants
//! - `id` is the creation time in epoch milliseconds and is unique per list.
//! - Serialized field names (`id`, `text`, `completed`, `createdAt`) are the
//!   persisted blob format and must stay stable.

use serde::{Deserialize, Serialize};

/// Creation timestamp used as task identity.
pub type TaskId = i64;

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl TaskItem {
    /// Creates an open task stamped at `created_at`.
    pub fn new(id: TaskId, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task repository trait for persistence backends.

use async_trait::async_trait;

use crate::error::OpsdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewTask, OpenTask, Task, TaskStatus};

/// Adapter for the durable task store.
///
/// The repository shares no transaction with the session store: a crash
/// between task persist and session clear leaves a stale session key that
/// expires via TTL. Replaying the final intake step therefore creates a
/// duplicate task (at-least-once, not exactly-once).
#[async_trait]
pub trait TaskStore: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, PRAGMAs).
    async fn initialize(&self) -> Result<(), OpsdeskError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), OpsdeskError>;

    /// Persists a new task with a generated id and `pending` status.
    async fn create_task(&self, task: &NewTask) -> Result<Task, OpsdeskError>;

    /// Looks up a task by id.
    async fn get_task(&self, id: i64) -> Result<Option<Task>, OpsdeskError>;

    /// Sets the status of an existing task. Callers check existence first;
    /// updating an absent id is a no-op.
    async fn set_task_status(&self, id: i64, status: TaskStatus) -> Result<(), OpsdeskError>;

    /// Lists tasks whose status is in `statuses`, each with its assignee's
    /// display name resolved for reporting.
    async fn list_open_tasks(&self, statuses: &[TaskStatus])
        -> Result<Vec<OpenTask>, OpsdeskError>;
}

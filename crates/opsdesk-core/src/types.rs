// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types used across adapter traits and the intake engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`crate::traits::PluginAdapter`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
    Session,
}

/// Lifecycle state of a persisted task.
///
/// Stored as snake_case text in SQLite; the closed enum keeps status
/// transitions exhaustively checkable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// An entry in the assignee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// A durable task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Generated row id.
    pub id: i64,
    pub title: String,
    /// Weak reference to a [`User`]; `None` means unassigned.
    pub assignee_id: Option<i64>,
    /// Free text by contract; the flow accepts it unvalidated.
    pub priority: String,
    pub category: Option<String>,
    /// Two-letter upper-case country code, allow-list filtered at assembly.
    pub country: Option<String>,
    pub project: Option<String>,
    pub status: TaskStatus,
    /// ISO 8601 timestamps, assigned by the storage layer.
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for creating a task; the id, status, and timestamps are assigned
/// by the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub assignee_id: Option<i64>,
    pub priority: String,
    pub category: Option<String>,
    pub country: Option<String>,
    pub project: Option<String>,
}

/// A task row prepared for reporting, with the assignee's display name
/// eagerly resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTask {
    pub id: i64,
    pub title: String,
    pub priority: String,
    pub assignee_id: Option<i64>,
    pub assignee_name: Option<String>,
}

// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Opsdesk task intake service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Opsdesk workspace. The session store,
//! task repository, and notification channel all implement traits defined
//! here so the intake engine can be tested against in-memory fakes.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OpsdeskError;
pub use types::{AdapterType, HealthStatus, NewTask, OpenTask, Task, TaskStatus, User};

pub use traits::{Notifier, PluginAdapter, SessionStore, TaskStore, UserDirectory};

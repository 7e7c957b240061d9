// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User directory trait consumed by the assignee prompt.

use async_trait::async_trait;

use crate::error::OpsdeskError;
use crate::types::User;

/// Read-only directory of users a task can be assigned to.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns all known users, ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, OpsdeskError>;
}

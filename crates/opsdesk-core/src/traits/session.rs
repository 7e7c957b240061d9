// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait for TTL-bounded conversation state.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::OpsdeskError;

/// Chat-scoped key-value storage for in-progress conversation state.
///
/// Keys are composite strings (`step:{chat_id}`, `task:{chat_id}:{field}`);
/// every entry carries its own time-to-live, reset on each overwrite of that
/// key only. A store failure is fatal to the message being processed --
/// implementations must surface it, never drop state silently.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `value` under `key`, overwriting any existing value and
    /// resetting the key's expiry to `ttl` from now.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), OpsdeskError>;

    /// Returns the value for `key`, or `None` once the TTL has elapsed or
    /// after an explicit delete.
    async fn get(&self, key: &str) -> Result<Option<String>, OpsdeskError>;

    /// Removes `key`. Idempotent; absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), OpsdeskError>;
}

// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound notifier trait for sending replies to a chat.

use async_trait::async_trait;

use crate::error::OpsdeskError;

/// Sends a text reply to the originating chat.
///
/// Delivery is fire-and-forget from the flow's point of view: a failed send
/// never changes conversation state. Implementations log and swallow
/// transport failures rather than propagating them.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `text` to the chat identified by `chat_id`.
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), OpsdeskError>;
}

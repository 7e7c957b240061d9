// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound update routing and group gating.
//!
//! Decides, before any conversation state is touched, whether an update is
//! processed at all: only text messages pass, channel posts are dropped, and
//! group messages must come from the single allowed group.

use std::sync::Arc;

use metrics::counter;
use teloxide::types::{Message, Update, UpdateKind};
use tracing::{debug, error};

use opsdesk_config::model::TelegramConfig;
use opsdesk_core::Notifier;
use opsdesk_intake::{IntakeEngine, prompts};

/// Pre-engine routing decision for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Hand the message to the intake engine.
    Process,
    /// Reply with the restriction notice and drop the message.
    Restricted,
    /// Drop the message silently.
    Ignore,
}

/// Classify a message against the configured group allow-list.
///
/// Private chats always pass. Group and supergroup chats pass only when
/// their id equals `allowed_group_id`; with no configured id every group is
/// restricted. Channel posts are ignored outright.
pub fn gate(msg: &Message, allowed_group_id: Option<i64>) -> Gate {
    if msg.chat.is_channel() {
        return Gate::Ignore;
    }
    if msg.chat.is_group() || msg.chat.is_supergroup() {
        return if allowed_group_id == Some(msg.chat.id.0) {
            Gate::Process
        } else {
            Gate::Restricted
        };
    }
    Gate::Process
}

/// Remove a literal `@handle` self-mention from the text.
pub fn strip_mention(text: &str, bot_handle: Option<&str>) -> String {
    match bot_handle {
        Some(handle) => text.replace(&format!("@{handle}"), ""),
        None => text.to_string(),
    }
}

/// Routes webhook updates into the intake engine.
pub struct TelegramHandler {
    engine: Arc<IntakeEngine>,
    notifier: Arc<dyn Notifier>,
    allowed_group_id: Option<i64>,
    bot_handle: Option<String>,
}

impl TelegramHandler {
    pub fn new(
        engine: Arc<IntakeEngine>,
        notifier: Arc<dyn Notifier>,
        config: &TelegramConfig,
    ) -> Self {
        Self {
            engine,
            notifier,
            allowed_group_id: config.allowed_group_id,
            bot_handle: config.bot_handle.clone(),
        }
    }

    /// Process one webhook update to completion.
    ///
    /// Never returns an error: the webhook acknowledges every delivery, so
    /// engine failures are logged here and answered with a generic failure
    /// reply instead of propagating.
    pub async fn process_update(&self, update: Update) {
        let msg = match update.kind {
            UpdateKind::Message(msg) => msg,
            other => {
                debug!(kind = ?discriminant_name(&other), "ignoring non-message update");
                return;
            }
        };

        let Some(text) = msg.text() else {
            debug!(chat_id = msg.chat.id.0, "ignoring message without text");
            return;
        };

        match gate(&msg, self.allowed_group_id) {
            Gate::Ignore => {
                debug!(chat_id = msg.chat.id.0, "ignoring channel post");
            }
            Gate::Restricted => {
                counter!("intake_messages_gated_total").increment(1);
                debug!(chat_id = msg.chat.id.0, "rejecting message from disallowed group");
                self.reply(msg.chat.id.0, prompts::RESTRICTED).await;
            }
            Gate::Process => {
                let text = strip_mention(text, self.bot_handle.as_deref());
                if let Err(e) = self.engine.handle_message(msg.chat.id.0, &text).await {
                    error!(chat_id = msg.chat.id.0, error = %e, "message handling failed");
                    self.reply(msg.chat.id.0, prompts::FAILURE).await;
                }
            }
        }
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.notifier.send(chat_id, text).await {
            error!(chat_id, error = %e, "failed to send gating reply");
        }
    }
}

fn discriminant_name(kind: &UpdateKind) -> &'static str {
    match kind {
        UpdateKind::Message(_) => "message",
        UpdateKind::EditedMessage(_) => "edited_message",
        UpdateKind::ChannelPost(_) => "channel_post",
        UpdateKind::EditedChannelPost(_) => "edited_channel_post",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a mock message from JSON matching the Telegram Bot API shape.
    fn make_message(chat_id: i64, chat_type: &str, text: &str) -> Message {
        let chat = match chat_type {
            "private" => serde_json::json!({
                "id": chat_id,
                "type": "private",
                "first_name": "Test",
            }),
            "channel" => serde_json::json!({
                "id": chat_id,
                "type": "channel",
                "title": "Test Channel",
            }),
            other => serde_json::json!({
                "id": chat_id,
                "type": other,
                "title": "Test Group",
            }),
        };

        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": chat,
            "from": {
                "id": 7,
                "is_bot": false,
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    #[test]
    fn private_chats_are_never_gated() {
        let msg = make_message(12345, "private", "/task");
        assert_eq!(gate(&msg, None), Gate::Process);
        assert_eq!(gate(&msg, Some(-100999)), Gate::Process);
    }

    #[test]
    fn matching_group_passes() {
        let msg = make_message(-100123, "supergroup", "/task");
        assert_eq!(gate(&msg, Some(-100123)), Gate::Process);
    }

    #[test]
    fn mismatched_group_is_restricted() {
        let msg = make_message(-100123, "supergroup", "/task");
        assert_eq!(gate(&msg, Some(-100999)), Gate::Restricted);
        let msg = make_message(-200, "group", "/task");
        assert_eq!(gate(&msg, Some(-100999)), Gate::Restricted);
    }

    #[test]
    fn no_configured_group_rejects_all_groups() {
        let msg = make_message(-100123, "supergroup", "/task");
        assert_eq!(gate(&msg, None), Gate::Restricted);
    }

    #[test]
    fn channel_posts_are_ignored() {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": -100555i64,
                "type": "channel",
                "title": "Test Channel",
            },
            "text": "/task",
        });
        let msg: Message = serde_json::from_value(json).unwrap();
        assert_eq!(gate(&msg, Some(-100555)), Gate::Ignore);
    }

    #[test]
    fn strip_mention_removes_literal_handle() {
        assert_eq!(strip_mention("/task@opsdesk_bot", Some("opsdesk_bot")), "/task");
        assert_eq!(strip_mention("/task", Some("opsdesk_bot")), "/task");
        assert_eq!(strip_mention("/task@opsdesk_bot", None), "/task@opsdesk_bot");
    }
}

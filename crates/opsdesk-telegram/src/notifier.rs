// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound replies through the Telegram Bot API.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use tracing::{debug, warn};

use opsdesk_config::model::TelegramConfig;
use opsdesk_core::{AdapterType, HealthStatus, Notifier, OpsdeskError, PluginAdapter};

/// Fire-and-forget Telegram notifier.
///
/// Delivery failures are logged and swallowed: a reply that fails to send
/// must never fail the message that produced it or change conversation
/// state.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    /// Creates a notifier from the Telegram config.
    ///
    /// Requires `telegram.bot_token` to be set and non-empty.
    pub fn new(config: &TelegramConfig) -> Result<Self, OpsdeskError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            OpsdeskError::Config("telegram.bot_token is required for the Telegram notifier".into())
        })?;

        if token.is_empty() {
            return Err(OpsdeskError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
        })
    }
}

#[async_trait]
impl PluginAdapter for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, OpsdeskError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), OpsdeskError> {
        debug!("Telegram notifier shutting down");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), OpsdeskError> {
        if let Err(e) = self
            .bot
            .send_message(Recipient::Id(ChatId(chat_id)), text)
            .await
        {
            warn!(chat_id, error = %e, "failed to deliver Telegram reply");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.map(str::to_string),
            bot_handle: None,
            allowed_group_id: None,
        }
    }

    #[test]
    fn requires_a_token() {
        assert!(TelegramNotifier::new(&config(None)).is_err());
        assert!(TelegramNotifier::new(&config(Some(""))).is_err());
        assert!(TelegramNotifier::new(&config(Some("123:abc"))).is_ok());
    }

    #[test]
    fn reports_as_channel_adapter() {
        let notifier = TelegramNotifier::new(&config(Some("123:abc"))).unwrap();
        assert_eq!(notifier.name(), "telegram");
        assert_eq!(notifier.adapter_type(), AdapterType::Channel);
    }
}

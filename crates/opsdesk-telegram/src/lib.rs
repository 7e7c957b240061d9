// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram boundary for the Opsdesk task intake service.
//!
//! Inbound, a webhook route receives one Telegram `Update` per POST, gates
//! it by chat type and group allow-list, and hands the text to the intake
//! engine. Outbound, [`TelegramNotifier`] delivers replies through the Bot
//! API fire-and-forget.

pub mod handler;
pub mod notifier;
pub mod webhook;

pub use handler::TelegramHandler;
pub use notifier::TelegramNotifier;
pub use webhook::webhook_router;

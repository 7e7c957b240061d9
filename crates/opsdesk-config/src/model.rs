// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Opsdesk service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Opsdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpsdeskConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Webhook HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Conversation session store settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Task intake allow-lists.
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "opsdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the Telegram channel.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Bot username whose `@mention` is stripped from inbound text.
    #[serde(default)]
    pub bot_handle: Option<String>,

    /// The single group/supergroup chat id the bot accepts messages from.
    /// `None` rejects all group chats; private chats are never gated.
    #[serde(default)]
    pub allowed_group_id: Option<i64>,
}

/// Webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("opsdesk").join("opsdesk.db"))
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| "opsdesk.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Conversation session store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Time-to-live for each session key, in seconds. Every write to a key
    /// resets that key's expiry.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

/// Allow-lists applied when a collected task is assembled for persistence.
///
/// Values outside an allow-list are dropped from the task silently, by
/// design; the flow is never blocked on an unrecognized value.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Accepted task categories.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Accepted two-letter country codes (upper-case).
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,

    /// Accepted project names.
    #[serde(default = "default_projects")]
    pub projects: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            countries: default_countries(),
            projects: default_projects(),
        }
    }
}

fn default_categories() -> Vec<String> {
    ["dev", "design", "sales", "marketing", "support"]
        .map(str::to_string)
        .to_vec()
}

fn default_countries() -> Vec<String> {
    ["AE", "SA", "QA", "KW", "OM", "BH", "IN", "US", "GB"]
        .map(str::to_string)
        .to_vec()
}

fn default_projects() -> Vec<String> {
    ["alpha", "beta", "crm"].map(str::to_string).to_vec()
}

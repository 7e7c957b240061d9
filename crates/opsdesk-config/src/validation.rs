// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and
//! well-formed country codes.

use crate::diagnostic::ConfigError;
use crate::model::OpsdeskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OpsdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate gateway.host is not empty and looks like an IP or hostname.
    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate database_path is not empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate session TTL is non-zero; a zero TTL would expire every step
    // before the next message arrives.
    if config.session.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "session.ttl_secs must be greater than zero".to_string(),
        });
    }

    // Validate country allow-list entries are two-letter upper-case codes.
    for code in &config.intake.countries {
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "intake.countries entry `{code}` must be a two-letter upper-case code"
                ),
            });
        }
    }

    // Validate the bot handle, when set, is a plausible Telegram username.
    if let Some(handle) = &config.telegram.bot_handle {
        let cleaned = handle.trim_start_matches('@');
        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_alphanumeric() || c == '_') {
            errors.push(ConfigError::Validation {
                message: format!("telegram.bot_handle `{handle}` is not a valid bot username"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

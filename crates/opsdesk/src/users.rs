// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `opsdesk users` command implementation.
//!
//! The assignee directory rendered in the intake prompt is maintained here;
//! the conversation flow itself only reads it.

use clap::Subcommand;

use opsdesk_config::model::OpsdeskConfig;
use opsdesk_core::{OpsdeskError, TaskStore, UserDirectory};
use opsdesk_storage::SqliteTaskStore;

/// `opsdesk users` subcommands.
#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Add or update a directory entry.
    Add {
        /// Telegram user id.
        id: i64,
        /// Display name shown in prompts and reports.
        name: String,
    },
    /// List all directory entries.
    List,
}

/// Runs the `opsdesk users` command to completion.
pub async fn run_users(config: OpsdeskConfig, command: UsersCommand) -> Result<(), OpsdeskError> {
    let storage = SqliteTaskStore::new(config.storage.clone());
    storage.initialize().await?;

    match command {
        UsersCommand::Add { id, name } => {
            storage.upsert_user(id, &name).await?;
            println!("added {name} (ID: {id})");
        }
        UsersCommand::List => {
            let users = storage.list_users().await?;
            if users.is_empty() {
                println!("no users in the directory");
            }
            for user in users {
                println!("{} (ID: {})", user.name, user.id);
            }
        }
    }

    storage.close().await
}

#[cfg(test)]
mod tests {
    use super::*;

    use opsdesk_config::model::StorageConfig;
    use tempfile::tempdir;

    fn config_with_db(path: &str) -> OpsdeskConfig {
        OpsdeskConfig {
            storage: StorageConfig {
                database_path: path.to_string(),
                wal_mode: true,
            },
            ..OpsdeskConfig::default()
        }
    }

    #[tokio::test]
    async fn add_then_list_round_trips() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("users.db");
        let config = config_with_db(db_path.to_str().unwrap());

        run_users(
            config.clone(),
            UsersCommand::Add {
                id: 1,
                name: "Alice".to_string(),
            },
        )
        .await
        .unwrap();

        // Adding the same id again updates the name instead of duplicating.
        run_users(
            config.clone(),
            UsersCommand::Add {
                id: 1,
                name: "Alice B".to_string(),
            },
        )
        .await
        .unwrap();

        let storage = SqliteTaskStore::new(config.storage.clone());
        storage.initialize().await.unwrap();
        let users = storage.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Alice B");
    }
}

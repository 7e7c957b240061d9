// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assignee directory operations.

use opsdesk_core::{OpsdeskError, User};
use rusqlite::params;

use crate::database::Database;

/// List all known users, ordered by id.
pub async fn list_users(db: &Database) -> Result<Vec<User>, OpsdeskError> {
    db.connection()
        .call(|conn| -> Result<Vec<User>, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT id, name FROM users ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or update a directory entry.
pub async fn upsert_user(db: &Database, id: i64, name: &str) -> Result<(), OpsdeskError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                params![id, name],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use opsdesk_core::OpsdeskError;
use tracing::debug;

/// Map a tokio-rusqlite call error into the crate-wide storage error.
///
/// `Connection::call` is generic over the closure's error type, so this
/// accepts any `Error<E>` the query modules produce.
pub(crate) fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> OpsdeskError
where
    tokio_rusqlite::Error<E>: std::error::Error + Send + Sync + 'static,
{
    OpsdeskError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database.
///
/// Cheap to clone; all clones share the same background connection thread.
#[derive(Clone, Debug)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run
    /// pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, OpsdeskError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| OpsdeskError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| OpsdeskError::Storage {
                source: Box::new(e),
            })?;

        let pragmas = if wal_mode {
            "PRAGMA journal_mode=WAL;\
             PRAGMA synchronous=NORMAL;\
             PRAGMA foreign_keys=ON;\
             PRAGMA busy_timeout=5000;"
        } else {
            "PRAGMA foreign_keys=ON;\
             PRAGMA busy_timeout=5000;"
        };

        conn.call(move |c| -> Result<(), rusqlite::Error> { c.execute_batch(pragmas) })
            .await
            .map_err(map_tr_err)?;

        conn.call(|c| -> Result<(), refinery::Error> { crate::migrations::run_migrations(c) })
            .await
            .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened and migrated");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), OpsdeskError> {
        self.conn
            .call(|c| -> Result<(), rusqlite::Error> {
                c.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        // Both migration tables must exist after open.
        let count: i64 = db
            .connection()
            .call(|c| -> Result<i64, rusqlite::Error> {
                let n = c.query_row(
                    "SELECT count(*) FROM sqlite_master
                     WHERE type = 'table' AND name IN ('tasks', 'users')",
                    [],
                    |row| row.get(0),
                )?;
                Ok(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 2);

        db.close().await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn open_on_directory_path_surfaces_storage_error() {
        let dir = tempdir().unwrap();
        // A directory is not a valid database file.
        let err = Database::open(dir.path().to_str().unwrap(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, OpsdeskError::Storage { .. }));
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        let db = Database::open(path, true).await.unwrap();
        db.close().await.unwrap();
        drop(db);

        // Second open must not fail re-running migrations.
        let db = Database::open(path, true).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_without_wal_still_migrates() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nowal.db");
        let db = Database::open(db_path.to_str().unwrap(), false)
            .await
            .unwrap();
        db.close().await.unwrap();
    }
}

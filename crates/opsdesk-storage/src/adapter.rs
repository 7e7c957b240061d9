// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the TaskStore and UserDirectory traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use opsdesk_config::model::StorageConfig;
use opsdesk_core::{
    AdapterType, HealthStatus, NewTask, OpenTask, OpsdeskError, PluginAdapter, Task, TaskStatus,
    TaskStore, User, UserDirectory,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed task store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`TaskStore::initialize`].
pub struct SqliteTaskStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteTaskStore {
    /// Create a new SqliteTaskStore with the given configuration.
    ///
    /// The database connection is not opened until [`TaskStore::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not
    /// initialized.
    fn db(&self) -> Result<&Database, OpsdeskError> {
        self.db.get().ok_or_else(|| OpsdeskError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Insert or update a directory entry. Used by the `users` CLI and tests.
    pub async fn upsert_user(&self, id: i64, name: &str) -> Result<(), OpsdeskError> {
        queries::users::upsert_user(self.db()?, id, name).await
    }
}

#[async_trait]
impl PluginAdapter for SqliteTaskStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, OpsdeskError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), OpsdeskError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn initialize(&self) -> Result<(), OpsdeskError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| OpsdeskError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite task store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), OpsdeskError> {
        self.db()?.close().await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, OpsdeskError> {
        queries::tasks::create_task(self.db()?, task).await
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, OpsdeskError> {
        queries::tasks::get_task(self.db()?, id).await
    }

    async fn set_task_status(&self, id: i64, status: TaskStatus) -> Result<(), OpsdeskError> {
        queries::tasks::set_task_status(self.db()?, id, status).await
    }

    async fn list_open_tasks(
        &self,
        statuses: &[TaskStatus],
    ) -> Result<Vec<OpenTask>, OpsdeskError> {
        queries::tasks::list_open_tasks(self.db()?, statuses).await
    }
}

#[async_trait]
impl UserDirectory for SqliteTaskStore {
    async fn list_users(&self) -> Result<Vec<User>, OpsdeskError> {
        queries::users::list_users(self.db()?).await
    }
}

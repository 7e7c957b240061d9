// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task CRUD operations.

use std::str::FromStr;

use opsdesk_core::{NewTask, OpenTask, OpsdeskError, Task, TaskStatus};
use rusqlite::{params, params_from_iter};

use crate::database::Database;

const TASK_COLUMNS: &str =
    "id, title, assignee_id, priority, category, country, project, status, created_at, updated_at";

fn task_from_row(row: &rusqlite::Row<'_>) -> Result<Task, rusqlite::Error> {
    let status_text: String = row.get(7)?;
    let status = TaskStatus::from_str(&status_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        assignee_id: row.get(2)?,
        priority: row.get(3)?,
        category: row.get(4)?,
        country: row.get(5)?,
        project: row.get(6)?,
        status,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Insert a new task with `pending` status and return the stored row.
pub async fn create_task(db: &Database, task: &NewTask) -> Result<Task, OpsdeskError> {
    let task = task.clone();
    db.connection()
        .call(move |conn| -> Result<Task, rusqlite::Error> {
            conn.execute(
                "INSERT INTO tasks (title, assignee_id, priority, category, country, project,
                                    status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7,
                         strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
                         strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![
                    task.title,
                    task.assignee_id,
                    task.priority,
                    task.category,
                    task.country,
                    task.project,
                    TaskStatus::Pending.to_string(),
                ],
            )?;
            let id = conn.last_insert_rowid();
            let stored = conn.query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                task_from_row,
            )?;
            Ok(stored)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a task by id.
pub async fn get_task(db: &Database, id: i64) -> Result<Option<Task>, OpsdeskError> {
    db.connection()
        .call(move |conn| -> Result<Option<Task>, rusqlite::Error> {
            let result = conn.query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                task_from_row,
            );
            match result {
                Ok(task) => Ok(Some(task)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set a task's status and bump `updated_at`. Updating an absent id affects
/// zero rows and is not an error.
pub async fn set_task_status(
    db: &Database,
    id: i64,
    status: TaskStatus,
) -> Result<(), OpsdeskError> {
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "UPDATE tasks
                 SET status = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![status.to_string(), id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List tasks whose status is in `statuses`, oldest first, with each
/// assignee's display name resolved for reporting.
pub async fn list_open_tasks(
    db: &Database,
    statuses: &[TaskStatus],
) -> Result<Vec<OpenTask>, OpsdeskError> {
    let status_texts: Vec<String> = statuses.iter().map(ToString::to_string).collect();
    db.connection()
        .call(move |conn| -> Result<Vec<OpenTask>, rusqlite::Error> {
            if status_texts.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders = vec!["?"; status_texts.len()].join(", ");
            let sql = format!(
                "SELECT t.id, t.title, t.priority, t.assignee_id, u.name
                 FROM tasks t
                 LEFT JOIN users u ON u.id = t.assignee_id
                 WHERE t.status IN ({placeholders})
                 ORDER BY t.id ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(status_texts.iter()), |row| {
                Ok(OpenTask {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    priority: row.get(2)?,
                    assignee_id: row.get(3)?,
                    assignee_name: row.get(4)?,
                })
            })?;
            let mut tasks = Vec::new();
            for row in rows {
                tasks.push(row?);
            }
            Ok(tasks)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users::upsert_user;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tasks.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn make_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            priority: "high".to_string(),
            ..NewTask::default()
        }
    }

    #[tokio::test]
    async fn create_task_assigns_id_and_pending_status() {
        let (db, _dir) = setup_db().await;
        let task = create_task(&db, &make_task("Ship release")).await.unwrap();
        assert!(task.id > 0);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.title, "Ship release");
        assert!(!task.created_at.is_empty());
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increment() {
        let (db, _dir) = setup_db().await;
        let first = create_task(&db, &make_task("a")).await.unwrap();
        let second = create_task(&db, &make_task("b")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn get_task_round_trips_optional_fields() {
        let (db, _dir) = setup_db().await;
        let new = NewTask {
            title: "Fix bug".to_string(),
            assignee_id: Some(7),
            priority: "low".to_string(),
            category: Some("dev".to_string()),
            country: Some("AE".to_string()),
            project: None,
        };
        let created = create_task(&db, &new).await.unwrap();
        let fetched = get_task(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.assignee_id, Some(7));
        assert_eq!(fetched.category.as_deref(), Some("dev"));
        assert_eq!(fetched.country.as_deref(), Some("AE"));
        assert!(fetched.project.is_none());
    }

    #[tokio::test]
    async fn get_missing_task_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_task(&db, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_task_status_updates_row() {
        let (db, _dir) = setup_db().await;
        let task = create_task(&db, &make_task("Close me")).await.unwrap();
        set_task_status(&db, task.id, TaskStatus::Completed)
            .await
            .unwrap();
        let fetched = get_task(&db, task.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn set_status_on_missing_id_is_a_noop() {
        let (db, _dir) = setup_db().await;
        set_task_status(&db, 999, TaskStatus::Completed)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_open_tasks_filters_by_status_and_resolves_names() {
        let (db, _dir) = setup_db().await;
        upsert_user(&db, 1, "Alice").await.unwrap();

        let assigned = NewTask {
            title: "Assigned".to_string(),
            assignee_id: Some(1),
            priority: "high".to_string(),
            ..NewTask::default()
        };
        let unassigned = make_task("Unassigned");
        let a = create_task(&db, &assigned).await.unwrap();
        let b = create_task(&db, &unassigned).await.unwrap();
        let done = create_task(&db, &make_task("Done")).await.unwrap();
        set_task_status(&db, done.id, TaskStatus::Completed)
            .await
            .unwrap();

        let open = list_open_tasks(&db, &[TaskStatus::Pending, TaskStatus::InProgress])
            .await
            .unwrap();
        assert_eq!(open.len(), 2);
        assert_eq!(open[0].id, a.id);
        assert_eq!(open[0].assignee_name.as_deref(), Some("Alice"));
        assert_eq!(open[1].id, b.id);
        assert!(open[1].assignee_name.is_none());
    }

    #[tokio::test]
    async fn list_open_tasks_with_no_statuses_is_empty() {
        let (db, _dir) = setup_db().await;
        create_task(&db, &make_task("x")).await.unwrap();
        let open = list_open_tasks(&db, &[]).await.unwrap();
        assert!(open.is_empty());
    }
}

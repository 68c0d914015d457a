//! Task Repository
//!
//! SQLite-backed implementation for Task CRUD and status moves.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Task, TaskPriority, TaskStatus, WireValue};
use super::db::{with_conn, SharedConn};
use super::traits::{Repository, StatusRepository};

const TASK_COLUMNS: &str =
    "id, title, description, due_date, priority, status, assigned_to, created_at, updated_at";

/// SQLite implementation of Task repository
pub struct TaskRepository {
    conn: SharedConn,
}

impl TaskRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        priority: TaskPriority::from_stored(&row.get::<_, String>(4)?, row.get(0)?),
        status: TaskStatus::from_stored(&row.get::<_, String>(5)?, row.get(0)?),
        assigned_to: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn select_task(conn: &Connection, id: u32) -> DomainResult<Option<Task>> {
    let sql = format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_task).optional()?)
}

fn not_found(id: u32) -> DomainError {
    DomainError::NotFound(format!("task {}", id))
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        entity.validate()?;
        with_conn(&self.conn, |conn| {
            conn.execute(
                "INSERT INTO tasks (title, description, due_date, priority, status, assigned_to)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entity.title.trim(),
                    entity.description,
                    entity.due_date,
                    entity.priority.as_str(),
                    entity.status.as_str(),
                    entity.assigned_to,
                ],
            )?;
            let id = conn.last_insert_rowid() as u32;
            select_task(conn, id)?.ok_or_else(|| not_found(id))
        })
        .await
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Task>> {
        with_conn(&self.conn, |conn| select_task(conn, id)).await
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        with_conn(&self.conn, |conn| {
            let sql = format!("SELECT {} FROM tasks ORDER BY created_at DESC, id DESC", TASK_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map([], row_to_task)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
        .await
    }

    async fn update(&self, entity: &Task) -> DomainResult<Task> {
        entity.validate()?;
        with_conn(&self.conn, |conn| {
            let changed = conn.execute(
                "UPDATE tasks SET title = ?1, description = ?2, due_date = ?3, priority = ?4, status = ?5,
                    assigned_to = ?6, updated_at = CAST(strftime('%s', 'now') AS INTEGER)
                 WHERE id = ?7",
                params![
                    entity.title.trim(),
                    entity.description,
                    entity.due_date,
                    entity.priority.as_str(),
                    entity.status.as_str(),
                    entity.assigned_to,
                    entity.id,
                ],
            )?;
            if changed == 0 {
                return Err(not_found(entity.id));
            }
            select_task(conn, entity.id)?.ok_or_else(|| not_found(entity.id))
        })
        .await
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        with_conn(&self.conn, |conn| {
            if conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])? == 0 {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl StatusRepository<Task> for TaskRepository {
    async fn update_status(&self, id: u32, status: &str) -> DomainResult<Task> {
        let status = TaskStatus::parse(status)?;
        with_conn(&self.conn, |conn| {
            let changed = conn.execute(
                "UPDATE tasks SET status = ?1, updated_at = CAST(strftime('%s', 'now') AS INTEGER) WHERE id = ?2",
                params![status.as_str(), id],
            )?;
            if changed == 0 {
                return Err(not_found(id));
            }
            select_task(conn, id)?.ok_or_else(|| not_found(id))
        })
        .await
    }
}

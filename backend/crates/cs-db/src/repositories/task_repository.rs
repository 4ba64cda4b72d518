use crate::Result;
use crate::decode::{json_field, timestamp_field, uuid_field};

use cs_core::ordering::{self, PositionShift};
use cs_core::{Task, TaskPriority, UserSummary};

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

pub struct TaskRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    list_id: String,
    board_id: String,
    title: String,
    description: String,
    position: i64,
    priority: String,
    due_date: Option<i64>,
    is_completed: bool,
    labels: String,
    checklist: String,
    attachments: String,
    created_at: i64,
    updated_at: i64,
}

impl TaskRow {
    fn into_task(self) -> Result<Task> {
        Ok(Task {
            id: uuid_field("task.id", &self.id)?,
            list_id: uuid_field("task.list_id", &self.list_id)?,
            board_id: uuid_field("task.board_id", &self.board_id)?,
            title: self.title,
            description: self.description,
            position: self.position as i32,
            priority: TaskPriority::from_str(&self.priority)
                .map_err(|e| crate::DbError::decode(e.to_string()))?,
            due_date: self
                .due_date
                .map(|ts| timestamp_field("task.due_date", ts))
                .transpose()?,
            is_completed: self.is_completed,
            labels: json_field("task.labels", &self.labels)?,
            checklist: json_field("task.checklist", &self.checklist)?,
            attachments: json_field("task.attachments", &self.attachments)?,
            created_at: timestamp_field("task.created_at", self.created_at)?,
            updated_at: timestamp_field("task.updated_at", self.updated_at)?,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, list_id, board_id, title, description, position, \
                              priority, due_date, is_completed, labels, checklist, attachments, \
                              created_at, updated_at FROM tasks";

impl TaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count_in_list(&self, list_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE list_id = ?")
            .bind(list_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Inserts a task at `task.position`, shifting existing siblings at
    /// that position and beyond one slot right. Appends (position ==
    /// sibling count) shift nothing.
    pub async fn create(&self, task: &Task) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        Self::shift_siblings(&mut tx, task.list_id, ordering::insert_shift(task.position)).await?;

        sqlx::query(
            r#"
              INSERT INTO tasks (
                  id, list_id, board_id, title, description, position, priority,
                  due_date, is_completed, labels, checklist, attachments,
                  created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(task.id.to_string())
        .bind(task.list_id.to_string())
        .bind(task.board_id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.position)
        .bind(task.priority.as_str())
        .bind(task.due_date.map(|dt| dt.timestamp()))
        .bind(task.is_completed)
        .bind(serde_json::to_string(&task.labels).unwrap_or_else(|_| "[]".into()))
        .bind(serde_json::to_string(&task.checklist).unwrap_or_else(|_| "[]".into()))
        .bind(serde_json::to_string(&task.attachments).unwrap_or_else(|_| "[]".into()))
        .bind(task.created_at.timestamp())
        .bind(task.updated_at.timestamp())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TaskRow::into_task).transpose()
    }

    pub async fn find_by_list(&self, list_id: Uuid) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("{} WHERE list_id = ? ORDER BY position", SELECT_COLUMNS))
                .bind(list_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// All tasks on a board, grouped by list and ordered within each list.
    pub async fn find_by_board(&self, board_id: Uuid) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            "{} WHERE board_id = ? ORDER BY list_id, position",
            SELECT_COLUMNS
        ))
        .bind(board_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Updates the non-positional fields. Position and containment only
    /// change through the move/delete operations.
    pub async fn update(&self, task: &Task) -> Result<()> {
        sqlx::query(
            r#"
              UPDATE tasks
              SET title = ?, description = ?, priority = ?, due_date = ?,
                  is_completed = ?, labels = ?, checklist = ?, attachments = ?,
                  updated_at = ?
              WHERE id = ?
              "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority.as_str())
        .bind(task.due_date.map(|dt| dt.timestamp()))
        .bind(task.is_completed)
        .bind(serde_json::to_string(&task.labels).unwrap_or_else(|_| "[]".into()))
        .bind(serde_json::to_string(&task.checklist).unwrap_or_else(|_| "[]".into()))
        .bind(serde_json::to_string(&task.attachments).unwrap_or_else(|_| "[]".into()))
        .bind(task.updated_at.timestamp())
        .bind(task.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the task and closes the position gap it leaves behind.
    pub async fn delete(&self, task: &Task) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task.id.to_string())
            .execute(&mut *tx)
            .await?;

        Self::shift_siblings(&mut tx, task.list_id, ordering::remove_shift(task.position)).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Same-list reorder. The caller is expected to have short-circuited
    /// the no-op case; a no-op here still commits without writes.
    pub async fn move_within(&self, task: &Task, new_position: i32) -> Result<()> {
        let Some(shift) = ordering::move_shift(task.position, new_position) else {
            return Ok(());
        };

        let mut tx = self.pool.begin().await?;

        Self::shift_siblings(&mut tx, task.list_id, shift).await?;
        Self::place(&mut tx, task.id, task.list_id, new_position).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Cross-list move: source siblings close the gap, destination siblings
    /// make room, then the task is re-homed at `new_position`.
    pub async fn move_across(&self, task: &Task, dest_list: Uuid, new_position: i32) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        Self::shift_siblings(&mut tx, task.list_id, ordering::remove_shift(task.position)).await?;
        Self::shift_siblings(&mut tx, dest_list, ordering::insert_shift(new_position)).await?;
        Self::place(&mut tx, task.id, dest_list, new_position).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn assignees(&self, task_id: Uuid) -> Result<Vec<Uuid>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT user_id FROM task_assignees WHERE task_id = ?")
                .bind(task_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.iter()
            .map(|(user_id,)| uuid_field("task_assignees.user_id", user_id))
            .collect()
    }

    pub async fn set_assignees(&self, task_id: Uuid, user_ids: &[Uuid]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM task_assignees WHERE task_id = ?")
            .bind(task_id.to_string())
            .execute(&mut *tx)
            .await?;

        for user_id in user_ids {
            sqlx::query("INSERT INTO task_assignees (task_id, user_id) VALUES (?, ?)")
                .bind(task_id.to_string())
                .bind(user_id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Assignee summaries for every task on the board, keyed by task id.
    pub async fn assignee_summaries_by_board(
        &self,
        board_id: Uuid,
    ) -> Result<HashMap<Uuid, Vec<UserSummary>>> {
        let rows: Vec<(String, String, String, String, Option<String>)> = sqlx::query_as(
            r#"
              SELECT ta.task_id, u.id, u.name, u.email, u.avatar
              FROM task_assignees ta
              JOIN users u ON u.id = ta.user_id
              JOIN tasks t ON t.id = ta.task_id
              WHERE t.board_id = ?
              "#,
        )
        .bind(board_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let mut by_task: HashMap<Uuid, Vec<UserSummary>> = HashMap::new();
        for (task_id, user_id, name, email, avatar) in rows {
            by_task
                .entry(uuid_field("task_assignees.task_id", &task_id)?)
                .or_default()
                .push(UserSummary {
                    id: uuid_field("users.id", &user_id)?,
                    name,
                    email,
                    avatar,
                });
        }

        Ok(by_task)
    }

    async fn shift_siblings(
        tx: &mut Transaction<'_, Sqlite>,
        list_id: Uuid,
        shift: PositionShift,
    ) -> Result<()> {
        match shift.upper {
            Some(upper) => {
                sqlx::query(
                    "UPDATE tasks SET position = position + ? \
                     WHERE list_id = ? AND position >= ? AND position <= ?",
                )
                .bind(shift.delta)
                .bind(list_id.to_string())
                .bind(shift.lower)
                .bind(upper)
                .execute(&mut **tx)
                .await?
            }
            None => {
                sqlx::query(
                    "UPDATE tasks SET position = position + ? \
                     WHERE list_id = ? AND position >= ?",
                )
                .bind(shift.delta)
                .bind(list_id.to_string())
                .bind(shift.lower)
                .execute(&mut **tx)
                .await?
            }
        };

        Ok(())
    }

    /// Writes the moved task's own containment and position, always last.
    async fn place(
        tx: &mut Transaction<'_, Sqlite>,
        task_id: Uuid,
        list_id: Uuid,
        position: i32,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();

        sqlx::query("UPDATE tasks SET list_id = ?, position = ?, updated_at = ? WHERE id = ?")
            .bind(list_id.to_string())
            .bind(position)
            .bind(now.timestamp())
            .bind(task_id.to_string())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

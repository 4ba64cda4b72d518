use crate::Result;
use crate::decode::{json_field, timestamp_field, uuid_field};

use cs_core::Comment;

use sqlx::SqlitePool;
use uuid::Uuid;

pub struct CommentRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: String,
    task_id: String,
    author_id: String,
    text: String,
    mentions: String,
    edited: bool,
    edited_at: Option<i64>,
    created_at: i64,
}

impl CommentRow {
    fn into_comment(self) -> Result<Comment> {
        Ok(Comment {
            id: uuid_field("comment.id", &self.id)?,
            task_id: uuid_field("comment.task_id", &self.task_id)?,
            author_id: uuid_field("comment.author_id", &self.author_id)?,
            text: self.text,
            mentions: json_field("comment.mentions", &self.mentions)?,
            edited: self.edited,
            edited_at: self
                .edited_at
                .map(|ts| timestamp_field("comment.edited_at", ts))
                .transpose()?,
            created_at: timestamp_field("comment.created_at", self.created_at)?,
        })
    }
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            r#"
              INSERT INTO comments (id, task_id, author_id, text, mentions,
                                    edited, edited_at, created_at)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(comment.id.to_string())
        .bind(comment.task_id.to_string())
        .bind(comment.author_id.to_string())
        .bind(&comment.text)
        .bind(serde_json::to_string(&comment.mentions).unwrap_or_else(|_| "[]".into()))
        .bind(comment.edited)
        .bind(comment.edited_at.map(|dt| dt.timestamp()))
        .bind(comment.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        let row: Option<CommentRow> = sqlx::query_as(
            "SELECT id, task_id, author_id, text, mentions, edited, edited_at, created_at \
             FROM comments WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CommentRow::into_comment).transpose()
    }

    /// Newest first, matching the source system's comment feed.
    pub async fn find_by_task(&self, task_id: Uuid) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, task_id, author_id, text, mentions, edited, edited_at, created_at \
             FROM comments WHERE task_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(task_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CommentRow::into_comment).collect()
    }

    pub async fn update(&self, comment: &Comment) -> Result<()> {
        sqlx::query("UPDATE comments SET text = ?, edited = ?, edited_at = ? WHERE id = ?")
            .bind(&comment.text)
            .bind(comment.edited)
            .bind(comment.edited_at.map(|dt| dt.timestamp()))
            .bind(comment.id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

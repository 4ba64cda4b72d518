use crate::Result;
use crate::decode::{json_field, timestamp_field, uuid_field, uuid_field_opt};

use cs_core::Activity;

use sqlx::SqlitePool;
use uuid::Uuid;

pub struct ActivityRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: String,
    board_id: String,
    task_id: Option<String>,
    list_id: Option<String>,
    user_id: String,
    action: String,
    description: String,
    metadata: String,
    created_at: i64,
}

impl ActivityRow {
    fn into_activity(self) -> Result<Activity> {
        Ok(Activity {
            id: uuid_field("activity.id", &self.id)?,
            board_id: uuid_field("activity.board_id", &self.board_id)?,
            task_id: uuid_field_opt("activity.task_id", self.task_id.as_deref())?,
            list_id: uuid_field_opt("activity.list_id", self.list_id.as_deref())?,
            user_id: uuid_field("activity.user_id", &self.user_id)?,
            action: self.action,
            description: self.description,
            metadata: json_field("activity.metadata", &self.metadata)?,
            created_at: timestamp_field("activity.created_at", self.created_at)?,
        })
    }
}

impl ActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append-only: activity rows are written once and never updated.
    pub async fn create(&self, activity: &Activity) -> Result<()> {
        sqlx::query(
            r#"
              INSERT INTO activity (id, board_id, task_id, list_id, user_id,
                                    action, description, metadata, created_at)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(activity.id.to_string())
        .bind(activity.board_id.to_string())
        .bind(activity.task_id.map(|id| id.to_string()))
        .bind(activity.list_id.map(|id| id.to_string()))
        .bind(activity.user_id.to_string())
        .bind(&activity.action)
        .bind(&activity.description)
        .bind(serde_json::to_string(&activity.metadata).unwrap_or_else(|_| "null".into()))
        .bind(activity.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Board feed, newest first.
    pub async fn find_by_board(
        &self,
        board_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Activity>> {
        let rows: Vec<ActivityRow> = sqlx::query_as(
            r#"
              SELECT id, board_id, task_id, list_id, user_id, action,
                     description, metadata, created_at
              FROM activity
              WHERE board_id = ?
              ORDER BY created_at DESC, rowid DESC
              LIMIT ? OFFSET ?
              "#,
        )
        .bind(board_id.to_string())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ActivityRow::into_activity).collect()
    }

    pub async fn count_by_board(&self, board_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity WHERE board_id = ?")
            .bind(board_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

use crate::Result;
use crate::decode::uuid_field;

use cs_core::UserSummary;

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Users are owned by the auth collaborator; this repository only keeps the
/// minimal projection needed for assignee/member resolution.
pub struct UserRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    avatar: Option<String>,
}

impl UserRow {
    fn into_summary(self) -> Result<UserSummary> {
        Ok(UserSummary {
            id: uuid_field("user.id", &self.id)?,
            name: self.name,
            email: self.email,
            avatar: self.avatar,
        })
    }
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &UserSummary) -> Result<()> {
        sqlx::query("INSERT INTO users (id, name, email, avatar, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.avatar)
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserSummary>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, name, email, avatar FROM users WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(UserRow::into_summary).transpose()
    }

    /// Member summaries for a board, joined through board_members.
    pub async fn find_board_members(&self, board_id: Uuid) -> Result<Vec<UserSummary>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
              SELECT u.id, u.name, u.email, u.avatar
              FROM users u
              JOIN board_members m ON m.user_id = u.id
              WHERE m.board_id = ?
              "#,
        )
        .bind(board_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_summary).collect()
    }
}

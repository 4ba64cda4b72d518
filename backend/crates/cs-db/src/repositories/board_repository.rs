use crate::Result;
use crate::decode::{timestamp_field, uuid_field};

use cs_core::{Board, BoardMember, BoardRole};

use std::str::FromStr;

use sqlx::SqlitePool;
use uuid::Uuid;

pub struct BoardRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct BoardRow {
    id: String,
    title: String,
    description: Option<String>,
    owner_id: String,
    background_color: String,
    background_image: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl BoardRow {
    fn into_board(self) -> Result<Board> {
        Ok(Board {
            id: uuid_field("board.id", &self.id)?,
            title: self.title,
            description: self.description,
            owner_id: uuid_field("board.owner_id", &self.owner_id)?,
            background_color: self.background_color,
            background_image: self.background_image,
            created_at: timestamp_field("board.created_at", self.created_at)?,
            updated_at: timestamp_field("board.updated_at", self.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: String,
    board_id: String,
    user_id: String,
    role: String,
    created_at: i64,
}

impl MemberRow {
    fn into_member(self) -> Result<BoardMember> {
        Ok(BoardMember {
            id: uuid_field("board_member.id", &self.id)?,
            board_id: uuid_field("board_member.board_id", &self.board_id)?,
            user_id: uuid_field("board_member.user_id", &self.user_id)?,
            role: BoardRole::from_str(&self.role)
                .map_err(|e| crate::DbError::decode(e.to_string()))?,
            created_at: timestamp_field("board_member.created_at", self.created_at)?,
        })
    }
}

const BOARD_COLUMNS: &str = "id, title, description, owner_id, background_color, \
                             background_image, created_at, updated_at";

impl BoardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, board: &Board) -> Result<()> {
        sqlx::query(&format!(
            "INSERT INTO boards ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            BOARD_COLUMNS
        ))
        .bind(board.id.to_string())
        .bind(&board.title)
        .bind(&board.description)
        .bind(board.owner_id.to_string())
        .bind(&board.background_color)
        .bind(&board.background_image)
        .bind(board.created_at.timestamp())
        .bind(board.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>> {
        let row: Option<BoardRow> = sqlx::query_as(&format!(
            "SELECT {} FROM boards WHERE id = ?",
            BOARD_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BoardRow::into_board).transpose()
    }

    /// Boards the user owns or is a member of, most recently updated first.
    pub async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Board>> {
        let id = user_id.to_string();

        let rows: Vec<BoardRow> = sqlx::query_as(&format!(
            r#"
              SELECT DISTINCT b.{}
              FROM boards b
              LEFT JOIN board_members m ON m.board_id = b.id
              WHERE b.owner_id = ? OR m.user_id = ?
              ORDER BY b.updated_at DESC
              "#,
            BOARD_COLUMNS.replace(", ", ", b.")
        ))
        .bind(&id)
        .bind(&id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BoardRow::into_board).collect()
    }

    pub async fn update(&self, board: &Board) -> Result<()> {
        sqlx::query(
            r#"
              UPDATE boards
              SET title = ?, description = ?, background_color = ?,
                  background_image = ?, updated_at = ?
              WHERE id = ?
              "#,
        )
        .bind(&board.title)
        .bind(&board.description)
        .bind(&board.background_color)
        .bind(&board.background_image)
        .bind(board.updated_at.timestamp())
        .bind(board.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the board and everything hanging off it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let id = id.to_string();
        let mut tx = self.pool.begin().await?;

        for statement in [
            "DELETE FROM activity WHERE board_id = ?",
            "DELETE FROM tasks WHERE board_id = ?",
            "DELETE FROM lists WHERE board_id = ?",
            "DELETE FROM board_members WHERE board_id = ?",
            "DELETE FROM boards WHERE id = ?",
        ] {
            sqlx::query(statement).bind(&id).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn add_member(&self, member: &BoardMember) -> Result<()> {
        sqlx::query(
            r#"
              INSERT INTO board_members (id, board_id, user_id, role, created_at)
              VALUES (?, ?, ?, ?, ?)
              "#,
        )
        .bind(member.id.to_string())
        .bind(member.board_id.to_string())
        .bind(member.user_id.to_string())
        .bind(member.role.as_str())
        .bind(member.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove_member(&self, board_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM board_members WHERE board_id = ? AND user_id = ?")
            .bind(board_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_member(&self, board_id: Uuid, user_id: Uuid) -> Result<Option<BoardMember>> {
        let row: Option<MemberRow> = sqlx::query_as(
            "SELECT id, board_id, user_id, role, created_at \
             FROM board_members WHERE board_id = ? AND user_id = ?",
        )
        .bind(board_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MemberRow::into_member).transpose()
    }

    pub async fn members(&self, board_id: Uuid) -> Result<Vec<BoardMember>> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            "SELECT id, board_id, user_id, role, created_at \
             FROM board_members WHERE board_id = ?",
        )
        .bind(board_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MemberRow::into_member).collect()
    }
}

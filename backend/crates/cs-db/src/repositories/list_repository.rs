use crate::Result;
use crate::decode::{timestamp_field, uuid_field};

use cs_core::List;
use cs_core::ordering::{self, PositionShift};

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

pub struct ListRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ListRow {
    id: String,
    board_id: String,
    title: String,
    position: i64,
    created_at: i64,
    updated_at: i64,
}

impl ListRow {
    fn into_list(self) -> Result<List> {
        Ok(List {
            id: uuid_field("list.id", &self.id)?,
            board_id: uuid_field("list.board_id", &self.board_id)?,
            title: self.title,
            position: self.position as i32,
            created_at: timestamp_field("list.created_at", self.created_at)?,
            updated_at: timestamp_field("list.updated_at", self.updated_at)?,
        })
    }
}

impl ListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count_on_board(&self, board_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lists WHERE board_id = ?")
            .bind(board_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Inserts a list at `list.position`, shifting the board's existing
    /// lists at that position and beyond one slot right.
    pub async fn create(&self, list: &List) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        Self::shift_siblings(&mut tx, list.board_id, ordering::insert_shift(list.position))
            .await?;

        sqlx::query(
            r#"
              INSERT INTO lists (id, board_id, title, position, created_at, updated_at)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(list.id.to_string())
        .bind(list.board_id.to_string())
        .bind(&list.title)
        .bind(list.position)
        .bind(list.created_at.timestamp())
        .bind(list.updated_at.timestamp())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<List>> {
        let row: Option<ListRow> = sqlx::query_as(
            "SELECT id, board_id, title, position, created_at, updated_at \
             FROM lists WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ListRow::into_list).transpose()
    }

    pub async fn find_by_board(&self, board_id: Uuid) -> Result<Vec<List>> {
        let rows: Vec<ListRow> = sqlx::query_as(
            "SELECT id, board_id, title, position, created_at, updated_at \
             FROM lists WHERE board_id = ? ORDER BY position",
        )
        .bind(board_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ListRow::into_list).collect()
    }

    pub async fn update(&self, list: &List) -> Result<()> {
        sqlx::query("UPDATE lists SET title = ?, updated_at = ? WHERE id = ?")
            .bind(&list.title)
            .bind(list.updated_at.timestamp())
            .bind(list.id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Deletes the list with all its tasks and closes the position gap on
    /// the board.
    pub async fn delete(&self, list: &List) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tasks WHERE list_id = ?")
            .bind(list.id.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(list.id.to_string())
            .execute(&mut *tx)
            .await?;

        Self::shift_siblings(&mut tx, list.board_id, ordering::remove_shift(list.position))
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Board-level reorder. No-op moves commit without writes.
    pub async fn move_to(&self, list: &List, new_position: i32) -> Result<()> {
        let Some(shift) = ordering::move_shift(list.position, new_position) else {
            return Ok(());
        };

        let mut tx = self.pool.begin().await?;

        Self::shift_siblings(&mut tx, list.board_id, shift).await?;

        sqlx::query("UPDATE lists SET position = ?, updated_at = ? WHERE id = ?")
            .bind(new_position)
            .bind(Utc::now().timestamp())
            .bind(list.id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn shift_siblings(
        tx: &mut Transaction<'_, Sqlite>,
        board_id: Uuid,
        shift: PositionShift,
    ) -> Result<()> {
        match shift.upper {
            Some(upper) => {
                sqlx::query(
                    "UPDATE lists SET position = position + ? \
                     WHERE board_id = ? AND position >= ? AND position <= ?",
                )
                .bind(shift.delta)
                .bind(board_id.to_string())
                .bind(shift.lower)
                .bind(upper)
                .execute(&mut **tx)
                .await?
            }
            None => {
                sqlx::query(
                    "UPDATE lists SET position = position + ? \
                     WHERE board_id = ? AND position >= ?",
                )
                .bind(shift.delta)
                .bind(board_id.to_string())
                .bind(shift.lower)
                .execute(&mut **tx)
                .await?
            }
        };

        Ok(())
    }
}

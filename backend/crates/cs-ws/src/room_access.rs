use crate::Result;

use cs_core::Permission;
use cs_db::BoardRepository;

use sqlx::SqlitePool;
use uuid::Uuid;

/// Whether the user may join a board's room: the owner always can, any
/// member with at least view permission can, everyone else cannot. A
/// missing board reads as denied rather than leaking its absence.
pub async fn can_join(pool: &SqlitePool, board_id: Uuid, user_id: Uuid) -> Result<bool> {
    let boards = BoardRepository::new(pool.clone());

    let Some(board) = boards.find_by_id(board_id).await? else {
        return Ok(false);
    };

    if board.owner_id == user_id {
        return Ok(true);
    }

    Ok(boards
        .find_member(board_id, user_id)
        .await?
        .is_some_and(|m| m.has_permission(Permission::View)))
}

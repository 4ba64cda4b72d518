//! Board-level permission checks shared by the REST handlers.
//!
//! The owner of a board passes every check. Everyone else must hold a
//! membership row whose role grants the required permission. A user with
//! no membership at all is rejected the same way a viewer asking for
//! edit rights is, so the response does not reveal board membership.

use crate::ApiError;

use cs_core::{Board, Permission};
use cs_db::BoardRepository;

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Load a board and verify the user holds `required` permission on it.
///
/// Returns the board on success so the caller does not have to fetch it
/// again. A missing board is a 404; an insufficient role is a 403.
pub async fn require_board_access(
    pool: &SqlitePool,
    board_id: Uuid,
    user_id: Uuid,
    required: Permission,
) -> crate::ApiResult<Board> {
    let repo = BoardRepository::new(pool.clone());

    let board = repo
        .find_by_id(board_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Board {} not found", board_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    // The owner holds every permission implicitly
    if board.owner_id == user_id {
        return Ok(board);
    }

    match repo.find_member(board_id, user_id).await? {
        Some(member) if member.has_permission(required) => Ok(board),
        _ => Err(ApiError::Forbidden {
            message: format!("No access to board {}", board_id),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

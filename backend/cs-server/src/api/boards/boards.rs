//! Board REST API handlers
//!
//! Boards are the top-level containers. The GET endpoint returns the full
//! nested snapshot (board, members, lists, tasks) that clients render from
//! and refetch after missing realtime events.

use crate::api::activity::activity::record;
use crate::api::authorize::require_board_access;
use crate::api::validate;
use crate::{
    AddMemberRequest, ApiError, ApiResult, BoardListResponse, BoardResponse, CreateBoardRequest,
    DeleteResponse, UpdateBoardRequest, UserId,
};

use cs_core::{Activity, Board, BoardMember, BoardRole, BoardSnapshot, Permission};
use cs_db::{BoardLoader, BoardRepository, UserRepository};
use cs_ws::AppState;

use std::panic::Location;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use error_location::ErrorLocation;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/boards
///
/// List boards the requesting user owns or is a member of
pub async fn list_boards(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> ApiResult<Json<BoardListResponse>> {
    let repo = BoardRepository::new(state.pool.clone());
    let boards = repo.find_for_user(user_id).await?;

    Ok(Json(BoardListResponse { boards }))
}

/// POST /api/v1/boards
///
/// Create a new board owned by the requesting user
pub async fn create_board(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<Json<BoardResponse>> {
    let title = validate::title(&req.title)?;

    let mut board = Board::new(title, req.description, user_id);
    if let Some(color) = req.background_color {
        board.background_color = color;
    }

    let repo = BoardRepository::new(state.pool.clone());
    repo.create(&board).await?;

    record(
        &state.pool,
        Activity::new(
            board.id,
            user_id,
            "board_created",
            format!("created board \"{}\"", board.title),
        ),
    )
    .await;

    Ok(Json(BoardResponse { board }))
}

/// GET /api/v1/boards/:id
///
/// Full board snapshot: board fields plus members, lists, and tasks in
/// position order
pub async fn get_board(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<BoardSnapshot>> {
    let board_id = Uuid::parse_str(&id)?;

    require_board_access(&state.pool, board_id, user_id, Permission::View).await?;

    let snapshot = BoardLoader::new(state.pool.clone())
        .load(board_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Board {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(snapshot))
}

/// PUT /api/v1/boards/:id
///
/// Update board metadata (title, description, background)
pub async fn update_board(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<BoardResponse>> {
    let board_id = Uuid::parse_str(&id)?;

    let mut board =
        require_board_access(&state.pool, board_id, user_id, Permission::Admin).await?;

    if let Some(title) = req.title {
        board.title = validate::title(&title)?;
    }
    if let Some(description) = req.description {
        board.description = Some(description);
    }
    if let Some(color) = req.background_color {
        board.background_color = color;
    }
    if let Some(image) = req.background_image {
        board.background_image = Some(image);
    }
    board.updated_at = Utc::now();

    let repo = BoardRepository::new(state.pool.clone());
    repo.update(&board).await?;

    record(
        &state.pool,
        Activity::new(
            board.id,
            user_id,
            "board_updated",
            format!("updated board \"{}\"", board.title),
        ),
    )
    .await;

    Ok(Json(BoardResponse { board }))
}

/// DELETE /api/v1/boards/:id
///
/// Delete a board and everything on it
pub async fn delete_board(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let board_id = Uuid::parse_str(&id)?;

    let board =
        require_board_access(&state.pool, board_id, user_id, Permission::View).await?;

    // Admin members may manage the board, but only its owner can destroy it.
    if board.owner_id != user_id {
        return Err(ApiError::forbidden("only the board owner can delete it"));
    }

    let repo = BoardRepository::new(state.pool.clone());
    repo.delete(board.id).await?;

    Ok(Json(DeleteResponse::new(board.id)))
}

/// POST /api/v1/boards/:id/members
///
/// Add a user to the board with a role
pub async fn add_member(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<Json<BoardMember>> {
    let board_id = Uuid::parse_str(&id)?;
    let member_user_id = Uuid::parse_str(&req.user_id)?;

    let role = BoardRole::from_str(&req.role).map_err(|_| ApiError::Validation {
        message: format!(
            "Invalid role: {}. Valid values: admin, member, viewer",
            req.role
        ),
        field: Some("role".into()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let board =
        require_board_access(&state.pool, board_id, user_id, Permission::Admin).await?;

    // The owner has implicit access and never needs a membership row
    if member_user_id == board.owner_id {
        return Err(ApiError::validation(
            "Board owner is already a member",
            Some("user_id"),
        ));
    }

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(member_user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("User {} not found", member_user_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let repo = BoardRepository::new(state.pool.clone());
    if repo.find_member(board_id, member_user_id).await?.is_some() {
        return Err(ApiError::validation(
            "User is already a board member",
            Some("user_id"),
        ));
    }

    let member = BoardMember::new(board_id, member_user_id, role);
    repo.add_member(&member).await?;

    record(
        &state.pool,
        Activity::new(
            board_id,
            user_id,
            "member_added",
            format!("added {} as {}", user.name, role),
        ),
    )
    .await;

    Ok(Json(member))
}

/// DELETE /api/v1/boards/:id/members/:user_id
///
/// Remove a member from the board
pub async fn remove_member(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path((id, member_id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    let board_id = Uuid::parse_str(&id)?;
    let member_user_id = Uuid::parse_str(&member_id)?;

    let board =
        require_board_access(&state.pool, board_id, user_id, Permission::Admin).await?;

    if member_user_id == board.owner_id {
        return Err(ApiError::validation(
            "Board owner cannot be removed",
            Some("user_id"),
        ));
    }

    let repo = BoardRepository::new(state.pool.clone());
    let removed = repo.remove_member(board_id, member_user_id).await?;
    if !removed {
        return Err(ApiError::not_found(format!(
            "User {} is not a member of board {}",
            member_user_id, board_id
        )));
    }

    record(
        &state.pool,
        Activity::new(
            board_id,
            user_id,
            "member_removed",
            format!("removed member {}", member_user_id),
        ),
    )
    .await;

    Ok(Json(DeleteResponse::new(member_user_id)))
}

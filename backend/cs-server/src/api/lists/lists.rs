//! List REST API handlers
//!
//! Lists are position-indexed columns on a board. Every structural change
//! (create, delete, move) runs under the board's container lock so
//! concurrent reorders cannot interleave their position updates.

use crate::api::activity::activity::record;
use crate::api::authorize::require_board_access;
use crate::api::validate;
use crate::{
    ApiError, ApiResult, BoardListsResponse, CreateListRequest, DeleteResponse, ListResponse,
    ListSetResponse, MoveListRequest, UpdateListRequest, UserId,
};

use cs_core::{Activity, List, Permission};
use cs_db::{BoardLoader, ListRepository};
use cs_ws::AppState;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use error_location::ErrorLocation;
use serde_json::json;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/boards/:id/lists
///
/// The board's ordered lists, each with its ordered tasks
pub async fn list_lists(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<BoardListsResponse>> {
    let board_id = Uuid::parse_str(&id)?;

    require_board_access(&state.pool, board_id, user_id, Permission::View).await?;

    let lists = BoardLoader::new(state.pool.clone())
        .load_lists(board_id)
        .await?;

    Ok(Json(BoardListsResponse { lists }))
}

/// POST /api/v1/boards/:id/lists
///
/// Create a list at the given position (append when absent)
pub async fn create_list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<CreateListRequest>,
) -> ApiResult<Json<ListResponse>> {
    let board_id = Uuid::parse_str(&id)?;
    let title = validate::title(&req.title)?;

    require_board_access(&state.pool, board_id, user_id, Permission::Edit).await?;

    // Serialize against concurrent structural changes on this board
    let _lock = state.locks.acquire(board_id).await;

    let repo = ListRepository::new(state.pool.clone());
    let count = repo.count_on_board(board_id).await?;

    let position = req.position.unwrap_or(count as i32);
    validate::insert_position(position, count)?;

    let list = List::new(board_id, title, position);
    repo.create(&list).await?;

    record(
        &state.pool,
        Activity::new(
            board_id,
            user_id,
            "list_created",
            format!("added list \"{}\"", list.title),
        )
        .with_list(list.id),
    )
    .await;

    Ok(Json(ListResponse { list }))
}

/// PUT /api/v1/lists/:id
///
/// Rename a list
pub async fn update_list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<UpdateListRequest>,
) -> ApiResult<Json<ListResponse>> {
    let list_id = Uuid::parse_str(&id)?;

    let mut list = find_list(&state, list_id).await?;
    require_board_access(&state.pool, list.board_id, user_id, Permission::Edit).await?;

    list.title = validate::title(&req.title)?;
    list.updated_at = Utc::now();

    let repo = ListRepository::new(state.pool.clone());
    repo.update(&list).await?;

    record(
        &state.pool,
        Activity::new(
            list.board_id,
            user_id,
            "list_renamed",
            format!("renamed list to \"{}\"", list.title),
        )
        .with_list(list.id),
    )
    .await;

    Ok(Json(ListResponse { list }))
}

/// DELETE /api/v1/lists/:id
///
/// Delete a list with all its tasks; later lists close the gap
pub async fn delete_list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let list_id = Uuid::parse_str(&id)?;

    let list = find_list(&state, list_id).await?;
    require_board_access(&state.pool, list.board_id, user_id, Permission::Edit).await?;

    let _lock = state.locks.acquire(list.board_id).await;
    // The list may have been reordered while we waited for the lock;
    // closing the gap needs its current position.
    let list = find_list(&state, list_id).await?;

    let repo = ListRepository::new(state.pool.clone());
    repo.delete(&list).await?;

    record(
        &state.pool,
        Activity::new(
            list.board_id,
            user_id,
            "list_deleted",
            format!("deleted list \"{}\"", list.title),
        ),
    )
    .await;

    Ok(Json(DeleteResponse::new(list.id)))
}

/// PUT /api/v1/lists/:id/move
///
/// Reorder a list on its board; responds with the board's full
/// re-ordered list set
pub async fn move_list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<MoveListRequest>,
) -> ApiResult<Json<ListSetResponse>> {
    let list_id = Uuid::parse_str(&id)?;

    let list = find_list(&state, list_id).await?;
    require_board_access(&state.pool, list.board_id, user_id, Permission::Edit).await?;

    let _lock = state.locks.acquire(list.board_id).await;
    // Re-read under the lock: a concurrent reorder may have shifted the
    // positions the move computes from.
    let list = find_list(&state, list_id).await?;

    let repo = ListRepository::new(state.pool.clone());
    let count = repo.count_on_board(list.board_id).await?;
    validate::move_position(req.position, count)?;

    let old_position = list.position;
    repo.move_to(&list, req.position).await?;

    if req.position != old_position {
        let mut activity = Activity::new(
            list.board_id,
            user_id,
            "list_moved",
            format!("moved list \"{}\"", list.title),
        )
        .with_list(list.id);
        activity.metadata = json!({ "from": old_position, "to": req.position });
        record(&state.pool, activity).await;
    }

    let lists = repo.find_by_board(list.board_id).await?;
    Ok(Json(ListSetResponse { lists }))
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_list(state: &AppState, list_id: Uuid) -> ApiResult<List> {
    ListRepository::new(state.pool.clone())
        .find_by_id(list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("List {} not found", list_id),
            location: ErrorLocation::from(Location::caller()),
        })
}

//! Comment REST API handlers
//!
//! Comments hang off tasks. Editing is restricted to the author; deleting
//! is allowed for the author or a board admin.

use crate::api::activity::activity::record;
use crate::api::authorize::require_board_access;
use crate::{
    ApiError, ApiResult, CommentListResponse, CommentResponse, CreateCommentRequest,
    DeleteResponse, UpdateCommentRequest, UserId,
};

use cs_core::{Activity, Comment, Permission, Task};
use cs_db::{CommentRepository, TaskRepository};
use cs_ws::AppState;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use error_location::ErrorLocation;
use uuid::Uuid;

const MAX_COMMENT_LEN: usize = 2000;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/tasks/:id/comments
///
/// Comments of a task, newest first
pub async fn list_comments(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<CommentListResponse>> {
    let task_id = Uuid::parse_str(&id)?;

    let task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::View).await?;

    let repo = CommentRepository::new(state.pool.clone());
    let comments = repo.find_by_task(task_id).await?;

    Ok(Json(CommentListResponse { comments }))
}

/// POST /api/v1/tasks/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let task_id = Uuid::parse_str(&id)?;
    let text = validate_text(&req.text)?;

    let task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::Edit).await?;

    let mut mentions = Vec::with_capacity(req.mentions.len());
    for raw in &req.mentions {
        mentions.push(Uuid::parse_str(raw)?);
    }

    let comment = Comment::new(task_id, user_id, text, mentions);
    let repo = CommentRepository::new(state.pool.clone());
    repo.create(&comment).await?;

    record(
        &state.pool,
        Activity::new(
            task.board_id,
            user_id,
            "comment_added",
            format!("commented on \"{}\"", task.title),
        )
        .with_task(task.id)
        .with_list(task.list_id),
    )
    .await;

    Ok(Json(CommentResponse { comment }))
}

/// PUT /api/v1/comments/:id
///
/// Edit a comment; only the author may do this
pub async fn update_comment(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment_id = Uuid::parse_str(&id)?;
    let text = validate_text(&req.text)?;

    let mut comment = find_comment(&state, comment_id).await?;
    let task = find_task(&state, comment.task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::View).await?;

    if comment.author_id != user_id {
        return Err(ApiError::forbidden("Only the author can edit a comment"));
    }

    comment.text = text;
    comment.edited = true;
    comment.edited_at = Some(Utc::now());

    let repo = CommentRepository::new(state.pool.clone());
    repo.update(&comment).await?;

    Ok(Json(CommentResponse { comment }))
}

/// DELETE /api/v1/comments/:id
///
/// Delete a comment; allowed for the author or a board admin
pub async fn delete_comment(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let comment_id = Uuid::parse_str(&id)?;

    let comment = find_comment(&state, comment_id).await?;
    let task = find_task(&state, comment.task_id).await?;

    if comment.author_id == user_id {
        require_board_access(&state.pool, task.board_id, user_id, Permission::View).await?;
    } else {
        require_board_access(&state.pool, task.board_id, user_id, Permission::Admin).await?;
    }

    let repo = CommentRepository::new(state.pool.clone());
    let deleted = repo.delete(comment_id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!(
            "Comment {} not found",
            comment_id
        )));
    }

    record(
        &state.pool,
        Activity::new(
            task.board_id,
            user_id,
            "comment_deleted",
            format!("deleted a comment on \"{}\"", task.title),
        )
        .with_task(task.id)
        .with_list(task.list_id),
    )
    .await;

    Ok(Json(DeleteResponse::new(comment_id)))
}

// =============================================================================
// Helpers
// =============================================================================

async fn find_comment(state: &AppState, comment_id: Uuid) -> ApiResult<Comment> {
    CommentRepository::new(state.pool.clone())
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Comment {} not found", comment_id),
            location: ErrorLocation::from(Location::caller()),
        })
}

async fn find_task(state: &AppState, task_id: Uuid) -> ApiResult<Task> {
    TaskRepository::new(state.pool.clone())
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Task {} not found", task_id),
            location: ErrorLocation::from(Location::caller()),
        })
}

fn validate_text(raw: &str) -> ApiResult<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ApiError::validation(
            "Comment text must not be empty",
            Some("text"),
        ));
    }
    if text.len() > MAX_COMMENT_LEN {
        return Err(ApiError::validation(
            format!("Comment text must be at most {} characters", MAX_COMMENT_LEN),
            Some("text"),
        ));
    }
    Ok(text.to_string())
}

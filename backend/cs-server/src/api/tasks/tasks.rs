//! Task REST API handlers
//!
//! Tasks are position-indexed within their list. Same-list reorders run
//! under the list's container lock; cross-list moves lock both lists in
//! id order so the source gap-close and destination make-room updates
//! cannot interleave with a concurrent move.

use crate::api::activity::activity::record;
use crate::api::authorize::require_board_access;
use crate::api::validate;
use crate::{
    ApiError, ApiResult, CreateTaskRequest, DeleteResponse, MoveTaskRequest, SearchTasksQuery,
    SetAssigneesRequest, TaskListResponse, TaskResponse, UpdateTaskRequest, UserId,
    api::tasks::assignees_response::AssigneesResponse,
};

use cs_core::{Activity, Permission, Task, TaskPriority};
use cs_db::{ListRepository, TaskRepository, UserRepository};
use cs_ws::AppState;

use std::panic::Location;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{NaiveDate, Utc};
use error_location::ErrorLocation;
use serde_json::json;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/lists/:id/tasks
///
/// Tasks of a list in position order
pub async fn list_tasks(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskListResponse>> {
    let list_id = Uuid::parse_str(&id)?;

    let list = find_list(&state, list_id).await?;
    require_board_access(&state.pool, list.board_id, user_id, Permission::View).await?;

    let repo = TaskRepository::new(state.pool.clone());
    let tasks = repo.find_by_list(list_id).await?;

    Ok(Json(TaskListResponse { tasks }))
}

/// POST /api/v1/lists/:id/tasks
///
/// Create a task at the given position (append when absent)
pub async fn create_task(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let list_id = Uuid::parse_str(&id)?;
    let title = validate::title(&req.title)?;

    let list = find_list(&state, list_id).await?;
    require_board_access(&state.pool, list.board_id, user_id, Permission::Edit).await?;

    // Serialize against concurrent structural changes in this list
    let _lock = state.locks.acquire(list_id).await;

    let repo = TaskRepository::new(state.pool.clone());
    let count = repo.count_in_list(list_id).await?;

    let position = req.position.unwrap_or(count as i32);
    validate::insert_position(position, count)?;

    let mut task = Task::new(list_id, list.board_id, title, position);
    if let Some(description) = req.description {
        task.description = description;
    }
    if let Some(ref priority) = req.priority {
        task.priority = parse_priority(priority)?;
    }
    task.due_date = req.due_date;

    repo.create(&task).await?;

    record(
        &state.pool,
        Activity::new(
            task.board_id,
            user_id,
            "task_created",
            format!("added task \"{}\"", task.title),
        )
        .with_task(task.id)
        .with_list(list_id),
    )
    .await;

    Ok(Json(TaskResponse { task }))
}

/// GET /api/v1/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = Uuid::parse_str(&id)?;

    let task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::View).await?;

    Ok(Json(TaskResponse { task }))
}

/// PUT /api/v1/tasks/:id
///
/// Update the non-positional task fields
pub async fn update_task(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = Uuid::parse_str(&id)?;

    let mut task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::Edit).await?;

    if let Some(title) = req.title {
        task.title = validate::title(&title)?;
    }
    if let Some(description) = req.description {
        task.description = description;
    }
    if let Some(ref priority) = req.priority {
        task.priority = parse_priority(priority)?;
    }
    if let Some(due_date) = req.due_date {
        task.due_date = due_date;
    }
    if let Some(is_completed) = req.is_completed {
        task.is_completed = is_completed;
    }
    if let Some(labels) = req.labels {
        task.labels = labels;
    }
    if let Some(checklist) = req.checklist {
        task.checklist = checklist;
    }
    task.updated_at = Utc::now();

    let repo = TaskRepository::new(state.pool.clone());
    repo.update(&task).await?;

    record(
        &state.pool,
        Activity::new(
            task.board_id,
            user_id,
            "task_updated",
            format!("updated task \"{}\"", task.title),
        )
        .with_task(task.id)
        .with_list(task.list_id),
    )
    .await;

    Ok(Json(TaskResponse { task }))
}

/// DELETE /api/v1/tasks/:id
///
/// Delete a task; later tasks in the list close the gap
pub async fn delete_task(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let task_id = Uuid::parse_str(&id)?;

    let task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::Edit).await?;

    // Closing the gap needs the task's current list and position, so the
    // read feeding the delete happens under the list lock.
    let (_lock, task) = lock_task(&state, task_id).await?;

    let repo = TaskRepository::new(state.pool.clone());
    repo.delete(&task).await?;

    record(
        &state.pool,
        Activity::new(
            task.board_id,
            user_id,
            "task_deleted",
            format!("deleted task \"{}\"", task.title),
        )
        .with_list(task.list_id),
    )
    .await;

    Ok(Json(DeleteResponse::new(task.id)))
}

/// PUT /api/v1/tasks/:id/move
///
/// Reorder within the list, or move to another list on the same board
pub async fn move_task(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<MoveTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = Uuid::parse_str(&id)?;

    let task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::Edit).await?;

    let explicit_dest = match req.list_id {
        Some(ref raw) => Some(Uuid::parse_str(raw)?),
        None => None,
    };
    if let Some(dest_id) = explicit_dest {
        let dest = find_list(&state, dest_id).await?;
        if dest.board_id != task.board_id {
            return Err(ApiError::validation(
                "Destination list is on a different board",
                Some("list_id"),
            ));
        }
    }

    // Both lists stay locked while positions are read and rewritten. If
    // a concurrent move relocated the task before we got the locks, the
    // source lock we hold is for the wrong list, so re-check and retry.
    let (_locks, task) = loop {
        let snapshot = find_task(&state, task_id).await?;
        let dest = explicit_dest.unwrap_or(snapshot.list_id);
        let guards = state.locks.acquire_pair(snapshot.list_id, dest).await;
        let current = find_task(&state, task_id).await?;
        if current.list_id == snapshot.list_id {
            break (guards, current);
        }
    };
    let dest_list_id = explicit_dest.unwrap_or(task.list_id);

    let repo = TaskRepository::new(state.pool.clone());

    if dest_list_id == task.list_id {
        let count = repo.count_in_list(task.list_id).await?;
        validate::move_position(req.position, count)?;

        repo.move_within(&task, req.position).await?;
    } else {
        let count = repo.count_in_list(dest_list_id).await?;
        validate::insert_position(req.position, count)?;

        repo.move_across(&task, dest_list_id, req.position).await?;
    }

    if dest_list_id != task.list_id || req.position != task.position {
        let mut activity = Activity::new(
            task.board_id,
            user_id,
            "task_moved",
            format!("moved task \"{}\"", task.title),
        )
        .with_task(task.id)
        .with_list(dest_list_id);
        activity.metadata = json!({
            "from_list": task.list_id,
            "to_list": dest_list_id,
            "from": task.position,
            "to": req.position,
        });
        record(&state.pool, activity).await;
    }

    // Reflect the new placement in the response
    let task = find_task(&state, task_id).await?;
    Ok(Json(TaskResponse { task }))
}

/// PUT /api/v1/tasks/:id/complete
///
/// Flip the completion flag of a task
pub async fn toggle_complete(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = Uuid::parse_str(&id)?;

    let mut task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::Edit).await?;

    task.is_completed = !task.is_completed;
    task.updated_at = Utc::now();

    let repo = TaskRepository::new(state.pool.clone());
    repo.update(&task).await?;

    let (action, verb) = if task.is_completed {
        ("task_completed", "completed")
    } else {
        ("task_reopened", "reopened")
    };
    record(
        &state.pool,
        Activity::new(
            task.board_id,
            user_id,
            action,
            format!("{} task \"{}\"", verb, task.title),
        )
        .with_task(task.id)
        .with_list(task.list_id),
    )
    .await;

    Ok(Json(TaskResponse { task }))
}

/// GET /api/v1/boards/:id/tasks/search
///
/// Filter the board's tasks by text, priority, assignee, label or
/// due day; newest first
pub async fn search_tasks(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Query(query): Query<SearchTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let board_id = Uuid::parse_str(&id)?;

    require_board_access(&state.pool, board_id, user_id, Permission::View).await?;

    let priority = match query.priority {
        Some(ref raw) => Some(parse_priority(raw)?),
        None => None,
    };
    let assignee = match query.assignee {
        Some(ref raw) => Some(Uuid::parse_str(raw)?),
        None => None,
    };
    let due_day = match query.due {
        Some(ref raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            ApiError::validation("Invalid due filter, expected YYYY-MM-DD", Some("due"))
        })?),
        None => None,
    };
    let text = query.q.map(|q| q.to_lowercase());

    let repo = TaskRepository::new(state.pool.clone());
    let assignees_by_task = match assignee {
        Some(_) => Some(repo.assignee_summaries_by_board(board_id).await?),
        None => None,
    };

    let mut tasks: Vec<Task> = repo
        .find_by_board(board_id)
        .await?
        .into_iter()
        .filter(|task| {
            if let Some(ref needle) = text {
                let hit = task.title.to_lowercase().contains(needle)
                    || task.description.to_lowercase().contains(needle);
                if !hit {
                    return false;
                }
            }
            if let Some(wanted) = priority {
                if task.priority != wanted {
                    return false;
                }
            }
            if let Some(user) = assignee {
                let assigned = assignees_by_task
                    .as_ref()
                    .and_then(|map| map.get(&task.id))
                    .is_some_and(|users| users.iter().any(|u| u.id == user));
                if !assigned {
                    return false;
                }
            }
            if let Some(ref label) = query.label {
                if !task.labels.iter().any(|l| &l.text == label) {
                    return false;
                }
            }
            if let Some(day) = due_day {
                match task.due_date {
                    Some(due) => {
                        if due.date_naive() != day {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        })
        .collect();

    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(TaskListResponse { tasks }))
}

/// PUT /api/v1/tasks/:id/assignees
///
/// Replace the assignee set of a task
pub async fn set_assignees(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<SetAssigneesRequest>,
) -> ApiResult<Json<AssigneesResponse>> {
    let task_id = Uuid::parse_str(&id)?;

    let task = find_task(&state, task_id).await?;
    require_board_access(&state.pool, task.board_id, user_id, Permission::Edit).await?;

    let mut assignees = Vec::with_capacity(req.user_ids.len());
    for raw in &req.user_ids {
        assignees.push(Uuid::parse_str(raw)?);
    }

    let users = UserRepository::new(state.pool.clone());
    for assignee in &assignees {
        if users.find_by_id(*assignee).await?.is_none() {
            return Err(ApiError::NotFound {
                message: format!("User {} not found", assignee),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    let repo = TaskRepository::new(state.pool.clone());
    repo.set_assignees(task_id, &assignees).await?;

    record(
        &state.pool,
        Activity::new(
            task.board_id,
            user_id,
            "task_assigned",
            format!("updated assignees of \"{}\"", task.title),
        )
        .with_task(task.id)
        .with_list(task.list_id),
    )
    .await;

    Ok(Json(AssigneesResponse { task_id, assignees }))
}

// =============================================================================
// Helpers
// =============================================================================

/// Locks the list the task currently sits in and returns the task as it
/// is under that lock. The containing list can change between reading
/// the task and acquiring the lock, so this re-reads and retries until
/// the held lock matches the task's list.
async fn lock_task(state: &AppState, task_id: Uuid) -> ApiResult<(OwnedMutexGuard<()>, Task)> {
    loop {
        let snapshot = find_task(state, task_id).await?;
        let guard = state.locks.acquire(snapshot.list_id).await;
        let current = find_task(state, task_id).await?;
        if current.list_id == snapshot.list_id {
            return Ok((guard, current));
        }
    }
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

async fn find_list(state: &AppState, list_id: Uuid) -> ApiResult<cs_core::List> {
    ListRepository::new(state.pool.clone())
        .find_by_id(list_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("List {} not found", list_id),
            location: ErrorLocation::from(Location::caller()),
        })
}

fn parse_priority(raw: &str) -> ApiResult<TaskPriority> {
    TaskPriority::from_str(raw).map_err(|_| {
        ApiError::validation(
            format!(
                "Invalid priority: {}. Valid values: low, medium, high, urgent",
                raw
            ),
            Some("priority"),
        )
    })
}

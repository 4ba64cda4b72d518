use serde::Serialize;
use uuid::Uuid;

/// Assignee set after a replace
#[derive(Debug, Serialize)]
pub struct AssigneesResponse {
    pub task_id: Uuid,
    pub assignees: Vec<Uuid>,
}

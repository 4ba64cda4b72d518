use serde::Deserialize;

/// Replaces the full assignee set of a task
#[derive(Debug, Deserialize)]
pub struct SetAssigneesRequest {
    pub user_ids: Vec<String>,
}

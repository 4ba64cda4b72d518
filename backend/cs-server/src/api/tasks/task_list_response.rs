use cs_core::Task;

use serde::Serialize;

/// Tasks of a list in position order
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    /// Destination list; stays in the current list when absent
    #[serde(default)]
    pub list_id: Option<String>,

    /// Destination position in the target list
    pub position: i32,
}

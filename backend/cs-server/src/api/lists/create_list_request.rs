use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    /// List title (required)
    pub title: String,

    /// Insert position; appended to the end when absent
    #[serde(default)]
    pub position: Option<i32>,
}

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (required)
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Insert position in the list; appended to the end when absent
    #[serde(default)]
    pub position: Option<i32>,

    /// Priority: "low", "medium", "high", or "urgent" (defaults to medium)
    #[serde(default)]
    pub priority: Option<String>,

    /// Optional due date
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

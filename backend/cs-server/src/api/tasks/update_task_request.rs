use cs_core::{ChecklistItem, Label};

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Partial task update; absent fields are left unchanged.
///
/// `due_date` is a double option: absent leaves the date alone, an
/// explicit null clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub due_date: Option<Option<DateTime<Utc>>>,

    #[serde(default)]
    pub is_completed: Option<bool>,

    #[serde(default)]
    pub labels: Option<Vec<Label>>,

    #[serde(default)]
    pub checklist: Option<Vec<ChecklistItem>>,
}

/// Distinguishes an absent field (None) from an explicit null (Some(None))
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

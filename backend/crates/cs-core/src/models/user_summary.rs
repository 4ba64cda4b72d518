use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal user projection resolved into snapshots (assignees, members,
/// activity authors).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

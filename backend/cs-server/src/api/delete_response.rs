use serde::Serialize;

/// Response body for successful deletes
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl std::fmt::Display) -> Self {
        Self {
            deleted: true,
            id: id.to_string(),
        }
    }
}

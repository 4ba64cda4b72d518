use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    /// New list title
    pub title: String,
}

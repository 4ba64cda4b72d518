use serde::Deserialize;

/// Pagination query for the board activity feed
#[derive(Debug, Deserialize)]
pub struct ListActivityQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

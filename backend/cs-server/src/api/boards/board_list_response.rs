use cs_core::Board;

use serde::Serialize;

/// List of boards response
#[derive(Debug, Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<Board>,
}

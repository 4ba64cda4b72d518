use cs_core::Board;

use serde::Serialize;

/// Single board response
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub board: Board,
}

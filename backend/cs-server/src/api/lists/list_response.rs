use cs_core::List;

use serde::Serialize;

/// Single list response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub list: List,
}

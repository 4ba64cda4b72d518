use cs_core::List;

use serde::Serialize;

/// The board's full position-ordered list set. Returned from reorder
/// operations so clients can reconcile every shifted position at once.
#[derive(Debug, Serialize)]
pub struct ListSetResponse {
    pub lists: Vec<List>,
}

pub mod board_lists_response;
pub mod create_list_request;
pub mod list_response;
pub mod list_set_response;
#[allow(clippy::module_inception)]
pub mod lists;
pub mod move_list_request;
pub mod update_list_request;

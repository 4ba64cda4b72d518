pub mod add_member_request;
pub mod board_list_response;
pub mod board_response;
#[allow(clippy::module_inception)]
pub mod boards;
pub mod create_board_request;
pub mod update_board_request;

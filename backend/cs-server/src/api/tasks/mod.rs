pub mod assignees_response;
pub mod create_task_request;
pub mod move_task_request;
pub mod search_tasks_query;
pub mod set_assignees_request;
pub mod task_list_response;
pub mod task_response;
#[allow(clippy::module_inception)]
pub mod tasks;
pub mod update_task_request;

pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

pub use api::{
    activity::{
        activity::list_activity, activity_dto::ActivityDto,
        activity_list_response::ActivityListResponse, list_activity_query::ListActivityQuery,
    },
    boards::{
        add_member_request::AddMemberRequest,
        board_list_response::BoardListResponse,
        board_response::BoardResponse,
        boards::{
            add_member, create_board, delete_board, get_board, list_boards, remove_member,
            update_board,
        },
        create_board_request::CreateBoardRequest,
        update_board_request::UpdateBoardRequest,
    },
    comments::{
        comment_list_response::CommentListResponse,
        comment_response::CommentResponse,
        comments::{create_comment, delete_comment, list_comments, update_comment},
        create_comment_request::CreateCommentRequest,
        update_comment_request::UpdateCommentRequest,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::user_id::UserId,
    lists::{
        board_lists_response::BoardListsResponse,
        create_list_request::CreateListRequest,
        list_response::ListResponse,
        list_set_response::ListSetResponse,
        lists::{create_list, delete_list, list_lists, move_list, update_list},
        move_list_request::MoveListRequest,
        update_list_request::UpdateListRequest,
    },
    tasks::{
        assignees_response::AssigneesResponse,
        create_task_request::CreateTaskRequest,
        move_task_request::MoveTaskRequest,
        set_assignees_request::SetAssigneesRequest,
        task_list_response::TaskListResponse,
        task_response::TaskResponse,
        search_tasks_query::SearchTasksQuery,
        tasks::{
            create_task, delete_task, get_task, list_tasks, move_task, search_tasks, set_assignees,
            toggle_complete, update_task,
        },
        update_task_request::UpdateTaskRequest,
    },
};

pub use crate::routes::build_router;

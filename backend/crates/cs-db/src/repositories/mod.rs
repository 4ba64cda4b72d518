pub mod activity_repository;
pub mod board_repository;
pub mod comment_repository;
pub mod list_repository;
pub mod task_repository;
pub mod user_repository;

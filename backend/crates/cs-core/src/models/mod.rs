pub mod activity;
pub mod attachment;
pub mod board;
pub mod board_member;
pub mod board_snapshot;
pub mod checklist_item;
pub mod comment;
pub mod label;
pub mod list;
pub mod task;
pub mod task_priority;
pub mod user_summary;

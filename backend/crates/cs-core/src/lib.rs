pub mod error;
pub mod models;
pub mod ordering;

pub use error::{CoreError, Result};
pub use models::activity::Activity;
pub use models::attachment::Attachment;
pub use models::board::Board;
pub use models::board_member::{BoardMember, BoardRole, Permission};
pub use models::board_snapshot::{BoardSnapshot, ListSnapshot, MemberView, TaskView};
pub use models::checklist_item::ChecklistItem;
pub use models::comment::Comment;
pub use models::label::Label;
pub use models::list::List;
pub use models::task::Task;
pub use models::task_priority::TaskPriority;
pub use models::user_summary::UserSummary;
pub use ordering::{PositionShift, insert_shift, is_contiguous, move_shift, remove_shift};

#[cfg(test)]
mod tests;

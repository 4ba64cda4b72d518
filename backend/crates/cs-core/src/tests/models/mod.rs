mod board_member;
mod task_priority;

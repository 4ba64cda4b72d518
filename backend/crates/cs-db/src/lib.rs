pub mod board_loader;
pub mod container_locks;
mod decode;
pub mod error;
pub mod repositories;

pub use board_loader::BoardLoader;
pub use container_locks::ContainerLocks;
pub use error::{DbError, Result};
pub use repositories::activity_repository::ActivityRepository;
pub use repositories::board_repository::BoardRepository;
pub use repositories::comment_repository::CommentRepository;
pub use repositories::list_repository::ListRepository;
pub use repositories::task_repository::TaskRepository;
pub use repositories::user_repository::UserRepository;

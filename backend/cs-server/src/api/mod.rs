pub mod activity;
pub mod authorize;
pub mod boards;
pub mod comments;
pub mod delete_response;
pub mod error;
pub mod extractors;
pub mod lists;
pub mod tasks;
pub mod validate;

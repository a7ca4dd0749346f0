//! File service trait and permission checking

mod permissions;
mod trait_def;

pub use permissions::{check_execute, check_read, check_write, has_permission, is_owner};
pub use trait_def::FileService;

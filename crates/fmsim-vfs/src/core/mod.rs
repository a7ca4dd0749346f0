//! Core store types and utilities

mod error;
mod perms;
mod types;

pub use error::{FsError, Resource};
pub use perms::{PermSet, Permission};
pub use types::{validate_name, FileId, FileRecord, FileStat, FileSummary, UserId, WriteOutcome};

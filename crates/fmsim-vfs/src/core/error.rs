//! Error types for the store layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::UserId;

/// Bounded collections that can run out of room.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Resource {
    /// The user registry
    Users,
    /// The file store
    Files,
    /// A single file's access control list
    AclEntries,
}

/// Errors from store, registry and lifecycle operations.
///
/// Several variants deliberately conflate "absent" with "not allowed" so
/// that callers without ownership cannot probe for file existence.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum FsError {
    /// A bounded collection is full
    #[error("{}", capacity_message(.0))]
    CapacityExceeded(Resource),

    /// A visible file already uses this name
    #[error("File '{0}' already exists.")]
    DuplicateName(String),

    /// User id not present in the registry
    #[error("Invalid user ID {0}.")]
    UnknownUser(UserId),

    /// No visible file with this name
    #[error("File not found.")]
    NotFound,

    /// The actor lacks the required permission
    #[error("Permission denied.")]
    PermissionDenied,

    /// The file is missing or not open
    #[error("File is not open.")]
    NotOpen,

    /// Missing, or not owned by the actor
    #[error("File not found or permission denied.")]
    NotFoundOrForbidden,

    /// No trashed file with this name owned by the actor
    #[error("File not found or not in trash.")]
    NotFoundOrNotTrashed,

    /// Missing, or the actor is not the owner (permission changes)
    #[error("Not owner or file not found.")]
    Forbidden,

    /// Missing, not open, or no write permission
    #[error("Cannot write to file.")]
    Unwritable,

    /// Missing or not open
    #[error("Cannot read file.")]
    Unreadable,

    /// Empty, whitespace-bearing or over-long name
    #[error("Invalid name '{0}'.")]
    InvalidName(String),

    /// Permission string with characters outside `rwx-`
    #[error("Invalid permissions '{0}' (use letters from 'rwx').")]
    InvalidPermissions(String),
}

fn capacity_message(resource: &Resource) -> &'static str {
    match resource {
        Resource::Users => "Max user limit reached.",
        Resource::Files => "File system is full.",
        Resource::AclEntries => "Access list is full.",
    }
}

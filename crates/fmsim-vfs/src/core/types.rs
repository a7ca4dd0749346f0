//! Core types for the store layer.
//!
//! Defines FileRecord, its search and stat projections, and identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::FsError;
use super::perms::PermSet;

/// A user identifier, assigned sequentially from 0.
pub type UserId = u32;

/// A stable file identifier, never reused within one store.
pub type FileId = u64;

/// A file record: content plus ownership, ACL and lifecycle flags.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    /// Stable identifier assigned by the store
    pub id: FileId,

    /// File name (unique among visible files)
    pub name: String,

    /// Text content
    pub content: String,

    /// Creating user; never changes
    pub owner_id: UserId,

    /// Rights the owner has on this file
    pub owner_permissions: PermSet,

    /// Grants for non-owners, one entry per user
    pub acl: BTreeMap<UserId, PermSet>,

    /// Is the file currently opened?
    pub is_open: bool,

    /// Is the file in the trash?
    pub is_deleted: bool,

    /// Content size in bytes
    pub size: u64,

    /// Creation timestamp (seconds since epoch)
    pub created_at: u64,

    /// Last content modification timestamp
    pub modified_at: u64,
}

impl FileRecord {
    /// Create a new closed, active, empty file.
    ///
    /// The id is a placeholder until the store assigns one on insert.
    pub fn new(name: String, owner_id: UserId, owner_permissions: PermSet, now: u64) -> Self {
        Self {
            id: 0,
            name,
            content: String::new(),
            owner_id,
            owner_permissions,
            acl: BTreeMap::new(),
            is_open: false,
            is_deleted: false,
            size: 0,
            created_at: now,
            modified_at: now,
        }
    }

    /// Visible files are those not in the trash.
    pub fn is_visible(&self) -> bool {
        !self.is_deleted
    }

    /// Check whether name or content contains `keyword`.
    pub fn matches(&self, keyword: &str) -> bool {
        self.name.contains(keyword) || self.content.contains(keyword)
    }

    /// Replace the content, updating size and modification time.
    pub fn set_content(&mut self, content: String, now: u64) {
        self.size = content.len() as u64;
        self.content = content;
        self.modified_at = now;
    }
}

/// Search result row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSummary {
    /// File name
    pub name: String,
    /// Owner user ID
    pub owner_id: UserId,
    /// Owner permission set
    pub owner_permissions: PermSet,
}

impl From<&FileRecord> for FileSummary {
    fn from(record: &FileRecord) -> Self {
        Self {
            name: record.name.clone(),
            owner_id: record.owner_id,
            owner_permissions: record.owner_permissions,
        }
    }
}

/// Metadata snapshot returned by stat.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileStat {
    pub id: FileId,
    pub name: String,
    pub owner_id: UserId,
    pub owner_permissions: PermSet,
    /// ACL entries in user id order
    pub acl: Vec<(UserId, PermSet)>,
    pub is_open: bool,
    pub size: u64,
    pub created_at: u64,
    pub modified_at: u64,
}

impl From<&FileRecord> for FileStat {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            owner_id: record.owner_id,
            owner_permissions: record.owner_permissions,
            acl: record.acl.iter().map(|(id, perms)| (*id, *perms)).collect(),
            is_open: record.is_open,
            size: record.size,
            created_at: record.created_at,
            modified_at: record.modified_at,
        }
    }
}

/// Result of a successful write.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Bytes stored after truncation
    pub stored: usize,
    /// Was the submitted content cut at the content limit?
    pub truncated: bool,
}

/// Validate a file or user name.
///
/// Names must be non-empty, free of whitespace and at most `max_len` bytes.
pub fn validate_name(name: &str, max_len: usize) -> Result<(), FsError> {
    if name.is_empty() || name.len() > max_len || name.chars().any(char::is_whitespace) {
        return Err(FsError::InvalidName(name.into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = FileRecord::new(String::from("f1"), 3, PermSet::read_write(), 1000);
        assert!(record.is_visible());
        assert!(!record.is_open);
        assert!(record.acl.is_empty());
        assert_eq!(record.size, 0);
        assert_eq!(record.created_at, record.modified_at);
    }

    #[test]
    fn test_set_content_updates_metadata() {
        let mut record = FileRecord::new(String::from("f1"), 0, PermSet::all(), 1000);
        record.set_content(String::from("hello"), 1005);
        assert_eq!(record.size, 5);
        assert_eq!(record.modified_at, 1005);
        assert_eq!(record.created_at, 1000);
    }

    #[test]
    fn test_matches_name_or_content() {
        let mut record = FileRecord::new(String::from("notes.txt"), 0, PermSet::all(), 1);
        record.set_content(String::from("meeting at noon"), 2);
        assert!(record.matches("notes"));
        assert!(record.matches("noon"));
        assert!(record.matches(""));
        assert!(!record.matches("Notes"));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("report.txt", 49).is_ok());
        assert!(validate_name("", 49).is_err());
        assert!(validate_name("two words", 49).is_err());
        assert!(validate_name(&"a".repeat(50), 49).is_err());
        assert!(validate_name(&"a".repeat(49), 49).is_ok());
    }
}

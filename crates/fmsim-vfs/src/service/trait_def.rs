//! FileService trait definition.

use crate::core::{FileId, FileStat, FileSummary, FsError, PermSet, UserId, WriteOutcome};

/// File lifecycle interface.
///
/// Every operation names its acting user explicitly.
pub trait FileService {
    // ========== Creation ==========

    /// Create an empty, closed file owned by `actor`.
    fn create(&mut self, actor: UserId, name: &str, perms: PermSet) -> Result<FileId, FsError>;

    // ========== Open State ==========

    /// Open a visible file. Requires read permission.
    fn open(&mut self, actor: UserId, name: &str) -> Result<(), FsError>;

    /// Close an open file.
    fn close(&mut self, actor: UserId, name: &str) -> Result<(), FsError>;

    // ========== Content ==========

    /// Replace the content of an open file. Requires write permission.
    ///
    /// Content past the configured limit is cut off, not rejected.
    fn write(&mut self, actor: UserId, name: &str, content: &str)
        -> Result<WriteOutcome, FsError>;

    /// Read the content of an open file.
    fn read(&self, actor: UserId, name: &str) -> Result<String, FsError>;

    // ========== Trash Lifecycle ==========

    /// Move a file to the trash. Owner only.
    fn delete(&mut self, actor: UserId, name: &str) -> Result<(), FsError>;

    /// Bring a trashed file back. Owner only.
    fn restore(&mut self, actor: UserId, name: &str) -> Result<(), FsError>;

    /// Erase a file record, trashed or not. Owner only.
    fn purge(&mut self, actor: UserId, name: &str) -> Result<(), FsError>;

    /// Names of the actor's trashed files.
    fn trash(&self, actor: UserId) -> Vec<String>;

    // ========== Permission Operations ==========

    /// Replace the owner permission set. Owner only.
    fn chmod(&mut self, actor: UserId, name: &str, perms: PermSet) -> Result<(), FsError>;

    /// Set the ACL entry for `target`. Owner only.
    fn grant(
        &mut self,
        actor: UserId,
        name: &str,
        target: UserId,
        perms: PermSet,
    ) -> Result<(), FsError>;

    // ========== Metadata Operations ==========

    /// Visible files whose name or content contains `keyword`.
    fn search(&self, keyword: &str) -> Vec<FileSummary>;

    /// Metadata of a visible file. Requires ownership or read permission.
    fn stat(&self, actor: UserId, name: &str) -> Result<FileStat, FsError>;
}

//! File lifecycle controller.
//!
//! Each file moves through two orthogonal state pairs:
//!
//! ```text
//!   Closed ⇄ Open          (open / close)
//!   Active ⇄ Trashed       (delete / restore)
//!   Active | Trashed → ∅   (purge, terminal)
//! ```
//!
//! [`FileSystem`] resolves records through the [`FileStore`], asks the
//! permission evaluator about the acting user, applies the transition and
//! reports the outcome.


use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::Limits;
use crate::core::{
    validate_name, FileId, FileRecord, FileStat, FileSummary, FsError, PermSet, Resource, UserId,
    WriteOutcome,
};
use crate::service::{check_read, check_write, is_owner, FileService};
use crate::store::FileStore;

/// The lifecycle controller over an in-memory store.
pub struct FileSystem {
    store: FileStore,
    limits: Limits,
    clock: Box<dyn Clock>,
}

impl FileSystem {
    /// Create an empty filesystem using wall-clock timestamps.
    pub fn new(limits: Limits) -> Self {
        Self::with_clock(limits, SystemClock)
    }

    /// Create an empty filesystem with a custom timestamp source.
    pub fn with_clock(limits: Limits, clock: impl Clock + 'static) -> Self {
        Self {
            store: FileStore::new(limits.max_files),
            limits,
            clock: Box::new(clock),
        }
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Owner-gated lookup for permission changes.
    fn owned_visible_mut(
        &mut self,
        actor: UserId,
        name: &str,
    ) -> Result<&mut FileRecord, FsError> {
        match self.store.lookup_visible_mut(name) {
            Ok(file) if is_owner(file, actor) => Ok(file),
            _ => Err(FsError::Forbidden),
        }
    }
}

/// Cut `content` to at most `max` bytes without splitting a character.
fn truncate_content(content: &str, max: usize) -> (&str, bool) {
    if content.len() <= max {
        return (content, false);
    }
    let mut end = max;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    (&content[..end], true)
}

impl FileService for FileSystem {
    fn create(&mut self, actor: UserId, name: &str, perms: PermSet) -> Result<FileId, FsError> {
        validate_name(name, self.limits.max_name_len)?;

        let record = FileRecord::new(name.into(), actor, perms, self.clock.now());
        let id = self.store.insert(record)?;
        debug!(file_id = id, file = name, actor, perms = %perms, "file created");
        Ok(id)
    }

    fn open(&mut self, actor: UserId, name: &str) -> Result<(), FsError> {
        let file = self.store.lookup_visible_mut(name)?;
        if !check_read(file, actor) {
            warn!(file = name, actor, "open denied");
            return Err(FsError::PermissionDenied);
        }
        file.is_open = true;
        debug!(file = name, actor, "file opened");
        Ok(())
    }

    fn close(&mut self, actor: UserId, name: &str) -> Result<(), FsError> {
        match self.store.lookup_visible_mut(name) {
            Ok(file) if file.is_open => {
                file.is_open = false;
                debug!(file = name, actor, "file closed");
                Ok(())
            }
            _ => Err(FsError::NotOpen),
        }
    }

    fn write(
        &mut self,
        actor: UserId,
        name: &str,
        content: &str,
    ) -> Result<WriteOutcome, FsError> {
        let max_content_len = self.limits.max_content_len;
        let now = self.clock.now();

        let file = self
            .store
            .lookup_visible_mut(name)
            .map_err(|_| FsError::Unwritable)?;
        if !file.is_open || !check_write(file, actor) {
            warn!(file = name, actor, open = file.is_open, "write refused");
            return Err(FsError::Unwritable);
        }

        let (stored, truncated) = truncate_content(content, max_content_len);
        if truncated {
            warn!(
                file = name,
                submitted = content.len(),
                stored = stored.len(),
                "content truncated"
            );
        }
        file.set_content(stored.into(), now);
        debug!(file = name, actor, size = file.size, "content written");

        Ok(WriteOutcome {
            stored: stored.len(),
            truncated,
        })
    }

    fn read(&self, actor: UserId, name: &str) -> Result<String, FsError> {
        match self.store.lookup_visible(name) {
            Ok(file) if file.is_open => {
                debug!(file = name, actor, "content read");
                Ok(file.content.clone())
            }
            _ => Err(FsError::Unreadable),
        }
    }

    fn delete(&mut self, actor: UserId, name: &str) -> Result<(), FsError> {
        self.store.soft_delete(name, actor)?;
        debug!(file = name, actor, "file moved to trash");
        Ok(())
    }

    fn restore(&mut self, actor: UserId, name: &str) -> Result<(), FsError> {
        self.store.restore(name, actor)?;
        debug!(file = name, actor, "file restored");
        Ok(())
    }

    fn purge(&mut self, actor: UserId, name: &str) -> Result<(), FsError> {
        let record = self.store.purge(name, actor)?;
        debug!(file_id = record.id, file = name, actor, "file purged");
        Ok(())
    }

    fn trash(&self, actor: UserId) -> Vec<String> {
        self.store
            .trashed_by(actor)
            .map(|f| f.name.clone())
            .collect()
    }

    fn chmod(&mut self, actor: UserId, name: &str, perms: PermSet) -> Result<(), FsError> {
        let file = self.owned_visible_mut(actor, name)?;
        file.owner_permissions = perms;
        debug!(file = name, actor, perms = %perms, "owner permissions changed");
        Ok(())
    }

    fn grant(
        &mut self,
        actor: UserId,
        name: &str,
        target: UserId,
        perms: PermSet,
    ) -> Result<(), FsError> {
        let max_acl_entries = self.limits.max_acl_entries;
        let file = self.owned_visible_mut(actor, name)?;

        if !file.acl.contains_key(&target) && file.acl.len() >= max_acl_entries {
            warn!(file = name, target_user = target, "access list full");
            return Err(FsError::CapacityExceeded(Resource::AclEntries));
        }
        file.acl.insert(target, perms);
        debug!(file = name, actor, target_user = target, perms = %perms, "access granted");
        Ok(())
    }

    fn search(&self, keyword: &str) -> Vec<FileSummary> {
        self.store.search(keyword).map(FileSummary::from).collect()
    }

    fn stat(&self, actor: UserId, name: &str) -> Result<FileStat, FsError> {
        let file = self.store.lookup_visible(name)?;
        if !is_owner(file, actor) && !check_read(file, actor) {
            return Err(FsError::PermissionDenied);
        }
        Ok(FileStat::from(file))
    }
}

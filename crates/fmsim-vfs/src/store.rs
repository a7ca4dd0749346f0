//! Ordered file record storage.
//!
//! Records are kept in insertion order. Lookups by name always return the
//! first match in that order, since a trashed record may share its name
//! with a visible one. Purging removes the record and shifts the rest
//! down, so relative order never changes.

use tracing::debug;

use crate::core::{FileId, FileRecord, FsError, Resource, UserId};
use crate::service::is_owner;

/// In-memory, bounded, ordered collection of file records.
#[derive(Clone, Debug)]
pub struct FileStore {
    /// Records in insertion order
    files: Vec<FileRecord>,
    /// Next id to hand out
    next_id: FileId,
    /// Maximum number of records, trashed ones included
    max_files: usize,
}

impl FileStore {
    /// Create an empty store holding at most `max_files` records.
    pub fn new(max_files: usize) -> Self {
        Self {
            files: Vec::new(),
            next_id: 1,
            max_files,
        }
    }

    /// Number of records, trashed ones included.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All records in store order.
    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter()
    }

    /// Look up a record by id, regardless of its trash state.
    pub fn get(&self, id: FileId) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.id == id)
    }

    fn position_visible(&self, name: &str) -> Option<usize> {
        self.files
            .iter()
            .position(|f| f.is_visible() && f.name == name)
    }

    /// First visible record named `name`.
    pub fn lookup_visible(&self, name: &str) -> Result<&FileRecord, FsError> {
        self.position_visible(name)
            .map(|i| &self.files[i])
            .ok_or(FsError::NotFound)
    }

    /// Mutable variant of [`FileStore::lookup_visible`].
    pub fn lookup_visible_mut(&mut self, name: &str) -> Result<&mut FileRecord, FsError> {
        match self.position_visible(name) {
            Some(i) => Ok(&mut self.files[i]),
            None => Err(FsError::NotFound),
        }
    }

    /// Append a record, assigning its id.
    ///
    /// Capacity is checked before name uniqueness. Uniqueness is only
    /// checked against visible records.
    pub fn insert(&mut self, mut record: FileRecord) -> Result<FileId, FsError> {
        if self.files.len() >= self.max_files {
            return Err(FsError::CapacityExceeded(Resource::Files));
        }
        if self.position_visible(&record.name).is_some() {
            return Err(FsError::DuplicateName(record.name));
        }

        let id = self.next_id;
        self.next_id += 1;
        record.id = id;
        debug!(file_id = id, file = %record.name, owner = record.owner_id, "file inserted");
        self.files.push(record);
        Ok(id)
    }

    /// Move the first visible record named `name` to the trash.
    ///
    /// The record must be owned by `actor`. A trashed record is also
    /// closed.
    pub fn soft_delete(&mut self, name: &str, actor: UserId) -> Result<(), FsError> {
        let file = self
            .lookup_visible_mut(name)
            .map_err(|_| FsError::NotFoundOrForbidden)?;
        if !is_owner(file, actor) {
            return Err(FsError::NotFoundOrForbidden);
        }
        file.is_deleted = true;
        file.is_open = false;
        Ok(())
    }

    /// Remove the first record named `name` owned by `actor`, trashed or
    /// not, and return it.
    pub fn purge(&mut self, name: &str, actor: UserId) -> Result<FileRecord, FsError> {
        let index = self
            .files
            .iter()
            .position(|f| f.name == name && is_owner(f, actor))
            .ok_or(FsError::NotFoundOrForbidden)?;
        Ok(self.files.remove(index))
    }

    /// Clear the trash flag on the first trashed record named `name` owned
    /// by `actor`.
    ///
    /// Fails with `DuplicateName` when a visible record already uses the
    /// name.
    pub fn restore(&mut self, name: &str, actor: UserId) -> Result<(), FsError> {
        let index = self
            .files
            .iter()
            .position(|f| f.name == name && f.is_deleted && is_owner(f, actor))
            .ok_or(FsError::NotFoundOrNotTrashed)?;
        if self.position_visible(name).is_some() {
            return Err(FsError::DuplicateName(name.into()));
        }
        self.files[index].is_deleted = false;
        Ok(())
    }

    /// Visible records whose name or content contains `keyword`, in store
    /// order.
    ///
    /// The iterator is lazy; call again to restart.
    pub fn search<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a FileRecord> + 'a {
        self.files
            .iter()
            .filter(move |f| f.is_visible() && f.matches(keyword))
    }

    /// Trashed records owned by `actor`, in store order.
    pub fn trashed_by(&self, actor: UserId) -> impl Iterator<Item = &FileRecord> + '_ {
        self.files
            .iter()
            .filter(move |f| f.is_deleted && is_owner(f, actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PermSet;

    fn make_file(name: &str, owner: UserId) -> FileRecord {
        FileRecord::new(String::from(name), owner, PermSet::read_write(), 1000)
    }

    fn names<'a>(iter: impl Iterator<Item = &'a FileRecord>) -> Vec<&'a str> {
        iter.map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_insert_assigns_ids() {
        let mut store = FileStore::new(10);
        let a = store.insert(make_file("a", 0)).unwrap();
        let b = store.insert(make_file("b", 0)).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.get(a).unwrap().name, "a");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_capacity_before_duplicate() {
        let mut store = FileStore::new(1);
        store.insert(make_file("a", 0)).unwrap();
        assert_eq!(
            store.insert(make_file("a", 0)),
            Err(FsError::CapacityExceeded(Resource::Files))
        );
    }

    #[test]
    fn test_insert_duplicate_visible_name() {
        let mut store = FileStore::new(10);
        store.insert(make_file("a", 0)).unwrap();
        assert_eq!(
            store.insert(make_file("a", 1)),
            Err(FsError::DuplicateName(String::from("a")))
        );
    }

    #[test]
    fn test_trashed_name_can_be_reused() {
        let mut store = FileStore::new(10);
        store.insert(make_file("a", 0)).unwrap();
        store.soft_delete("a", 0).unwrap();
        store.insert(make_file("a", 0)).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.lookup_visible("a").is_ok());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut store = FileStore::new(10);
        store.insert(make_file("Report", 0)).unwrap();
        assert!(store.lookup_visible("Report").is_ok());
        assert_eq!(store.lookup_visible("report"), Err(FsError::NotFound));
    }

    #[test]
    fn test_soft_delete_requires_owner() {
        let mut store = FileStore::new(10);
        store.insert(make_file("a", 0)).unwrap();
        assert_eq!(store.soft_delete("a", 1), Err(FsError::NotFoundOrForbidden));
        assert_eq!(store.soft_delete("zz", 0), Err(FsError::NotFoundOrForbidden));
        store.soft_delete("a", 0).unwrap();
        assert_eq!(store.lookup_visible("a"), Err(FsError::NotFound));
    }

    #[test]
    fn test_soft_delete_closes_file() {
        let mut store = FileStore::new(10);
        let id = store.insert(make_file("a", 0)).unwrap();
        store.lookup_visible_mut("a").unwrap().is_open = true;
        store.soft_delete("a", 0).unwrap();
        assert!(!store.get(id).unwrap().is_open);
    }

    #[test]
    fn test_purge_preserves_order() {
        let mut store = FileStore::new(10);
        for name in ["a", "b", "c"] {
            store.insert(make_file(name, 0)).unwrap();
        }
        let removed = store.purge("b", 0).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(store.iter()), vec!["a", "c"]);
    }

    #[test]
    fn test_purge_ignores_trash_state() {
        let mut store = FileStore::new(10);
        store.insert(make_file("a", 0)).unwrap();
        store.soft_delete("a", 0).unwrap();
        store.purge("a", 0).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.restore("a", 0), Err(FsError::NotFoundOrNotTrashed));
    }

    #[test]
    fn test_purge_requires_owner() {
        let mut store = FileStore::new(10);
        store.insert(make_file("a", 0)).unwrap();
        assert_eq!(store.purge("a", 2), Err(FsError::NotFoundOrForbidden));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_purge_takes_first_record_in_store_order() {
        let mut store = FileStore::new(10);
        let old = store.insert(make_file("a", 0)).unwrap();
        store.soft_delete("a", 0).unwrap();
        let new = store.insert(make_file("a", 0)).unwrap();

        let removed = store.purge("a", 0).unwrap();
        assert_eq!(removed.id, old);
        assert_eq!(store.lookup_visible("a").unwrap().id, new);
    }

    #[test]
    fn test_restore() {
        let mut store = FileStore::new(10);
        store.insert(make_file("a", 0)).unwrap();
        assert_eq!(store.restore("a", 0), Err(FsError::NotFoundOrNotTrashed));
        store.soft_delete("a", 0).unwrap();
        assert_eq!(store.restore("a", 1), Err(FsError::NotFoundOrNotTrashed));
        store.restore("a", 0).unwrap();
        assert!(store.lookup_visible("a").is_ok());
    }

    #[test]
    fn test_restore_refuses_visible_duplicate() {
        let mut store = FileStore::new(10);
        store.insert(make_file("a", 0)).unwrap();
        store.soft_delete("a", 0).unwrap();
        store.insert(make_file("a", 1)).unwrap();
        assert_eq!(
            store.restore("a", 0),
            Err(FsError::DuplicateName(String::from("a")))
        );
        assert_eq!(store.trashed_by(0).count(), 1);
    }

    #[test]
    fn test_search_skips_trash() {
        let mut store = FileStore::new(10);
        store.insert(make_file("alpha", 0)).unwrap();
        store.insert(make_file("beta", 0)).unwrap();
        store.insert(make_file("alphabet", 1)).unwrap();
        store
            .lookup_visible_mut("beta")
            .unwrap()
            .set_content(String::from("contains alpha"), 1001);
        store.soft_delete("alphabet", 1).unwrap();

        assert_eq!(names(store.search("alpha")), vec!["alpha", "beta"]);
        assert_eq!(names(store.search("")), vec!["alpha", "beta"]);
        assert_eq!(store.search("gamma").count(), 0);
    }

    #[test]
    fn test_search_is_restartable() {
        let mut store = FileStore::new(10);
        store.insert(make_file("x1", 0)).unwrap();
        store.insert(make_file("x2", 0)).unwrap();
        let first: Vec<_> = store.search("x").collect();
        let second: Vec<_> = store.search("x").collect();
        assert_eq!(first, second);
    }
}

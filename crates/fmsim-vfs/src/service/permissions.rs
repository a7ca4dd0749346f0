//! Permission checking utilities for the store layer.
//!
//! Two tiers only: the owner is judged by `owner_permissions`, everyone
//! else by their ACL entry. There is no group or "others" fallback.

use crate::core::{FileRecord, Permission, UserId};

/// Check if `actor` owns the file.
pub fn is_owner(file: &FileRecord, actor: UserId) -> bool {
    file.owner_id == actor
}

/// Check if `actor` holds `perm` on the file.
///
/// The ACL is never consulted for the owner, even when it carries an
/// entry for the owner's own id.
pub fn has_permission(file: &FileRecord, actor: UserId, perm: Permission) -> bool {
    // Owner check
    if is_owner(file, actor) {
        return file.owner_permissions.contains(perm);
    }

    // ACL check
    file.acl
        .get(&actor)
        .map(|perms| perms.contains(perm))
        .unwrap_or(false)
}

/// Check if `actor` has read permission on the file.
pub fn check_read(file: &FileRecord, actor: UserId) -> bool {
    has_permission(file, actor, Permission::Read)
}

/// Check if `actor` has write permission on the file.
pub fn check_write(file: &FileRecord, actor: UserId) -> bool {
    has_permission(file, actor, Permission::Write)
}

/// Check if `actor` has execute permission on the file.
pub fn check_execute(file: &FileRecord, actor: UserId) -> bool {
    has_permission(file, actor, Permission::Execute)
}

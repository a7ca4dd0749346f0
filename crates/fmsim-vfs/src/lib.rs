//! FMSim File Store Layer
//!
//! The store layer models the permission and metadata half of a small
//! multi-user filesystem, kept entirely in memory:
//!
//! - **Types**: FileRecord, PermSet, FileSummary for file metadata
//! - **Identity**: User registry and the logged-in session
//! - **Service**: FileService trait and owner/ACL permission checking
//! - **Store**: Ordered file records with trash and purge
//! - **Filesystem**: The lifecycle controller (open, write, delete, restore...)
//! - **Console**: Session-bound facade used by the command shell
//!
//! # Design Principles
//!
//! 1. **Owner override**: Owner checks never consult the ACL
//! 2. **Owner-only administration**: Delete, purge, restore, chmod and grant
//!    require ownership; ACL grants never confer these rights
//! 3. **Information hiding**: Lifecycle failures do not reveal whether a file
//!    exists to callers who do not own it
//! 4. **Explicit actor**: Every core call names the acting user
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                              Console                                  │
//! │        UserRegistry ── Session (current actor) ── FileSystem          │
//! └───────────────────────────────────┬──────────────────────────────────┘
//!                                     │ actor: UserId
//!                                     ▼
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                     FileSystem (FileService)                          │
//! │  • State transitions        • Precondition checks                     │
//! │  • Write truncation         • Timestamps (Clock)                      │
//! │        │                                   │                          │
//! │        ▼                                   ▼                          │
//! │  ┌────────────────────┐        ┌──────────────────────────┐           │
//! │  │     FileStore      │        │  has_permission          │           │
//! │  │ lookup / trash /   │        │  owner perms > ACL entry │           │
//! │  │ purge / search     │        └──────────────────────────┘           │
//! │  └────────────────────┘                                               │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

pub mod clock;
pub mod config;
pub mod console;
pub mod core;
pub mod filesystem;
pub mod identity;
pub mod service;
pub mod store;

// Convenient re-exports at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, FmsConfig, Limits};
pub use console::Console;
pub use crate::core::{
    FileId, FileRecord, FileStat, FileSummary, FsError, PermSet, Permission, Resource, UserId,
    WriteOutcome,
};
pub use filesystem::FileSystem;
pub use identity::{Session, User, UserRegistry};
pub use service::{check_execute, check_read, check_write, has_permission, is_owner, FileService};
pub use store::FileStore;

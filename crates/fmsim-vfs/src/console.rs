//! Session-bound facade.
//!
//! [`Console`] ties the registry, the logged-in session and the filesystem
//! together. Each file operation acts as the session's current user, which
//! changes only through [`Console::login`].

use crate::clock::{Clock, SystemClock};
use crate::config::FmsConfig;
use crate::core::{FileStat, FileSummary, FsError, PermSet, UserId, WriteOutcome};
use crate::filesystem::FileSystem;
use crate::identity::{Session, User, UserRegistry};
use crate::service::FileService;

/// Registry, session and filesystem driven by one command shell.
pub struct Console {
    registry: UserRegistry,
    session: Session,
    fs: FileSystem,
}

impl Console {
    /// Build a console from config using wall-clock timestamps.
    pub fn new(config: &FmsConfig) -> Result<Self, FsError> {
        Self::with_clock(config, SystemClock)
    }

    /// Build a console with a custom timestamp source.
    ///
    /// Seed users are registered in order and the session starts as user 0.
    pub fn with_clock(config: &FmsConfig, clock: impl Clock + 'static) -> Result<Self, FsError> {
        let limits = config.limits.clone();
        let mut registry = UserRegistry::new(limits.max_users, limits.max_name_len);
        for name in &config.seed_users {
            registry.register(name)?;
        }
        let session = Session::new(&registry)?;

        Ok(Self {
            registry,
            session,
            fs: FileSystem::with_clock(limits, clock),
        })
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    // ========== Identity ==========

    pub fn register_user(&mut self, name: &str) -> Result<UserId, FsError> {
        self.registry.register(name)
    }

    pub fn login(&mut self, user_id: UserId) -> Result<&User, FsError> {
        self.session.login(&self.registry, user_id)
    }

    /// The current actor.
    pub fn whoami(&self) -> &User {
        self.session.user()
    }

    // ========== Files ==========

    pub fn create_file(&mut self, name: &str, owner_perms: PermSet) -> Result<(), FsError> {
        self.fs
            .create(self.session.actor(), name, owner_perms)
            .map(|_| ())
    }

    pub fn open_file(&mut self, name: &str) -> Result<(), FsError> {
        self.fs.open(self.session.actor(), name)
    }

    pub fn close_file(&mut self, name: &str) -> Result<(), FsError> {
        self.fs.close(self.session.actor(), name)
    }

    pub fn write_file(&mut self, name: &str, content: &str) -> Result<WriteOutcome, FsError> {
        self.fs.write(self.session.actor(), name, content)
    }

    pub fn read_file(&self, name: &str) -> Result<String, FsError> {
        self.fs.read(self.session.actor(), name)
    }

    pub fn delete_file(&mut self, name: &str) -> Result<(), FsError> {
        self.fs.delete(self.session.actor(), name)
    }

    pub fn restore_file(&mut self, name: &str) -> Result<(), FsError> {
        self.fs.restore(self.session.actor(), name)
    }

    pub fn purge_file(&mut self, name: &str) -> Result<(), FsError> {
        self.fs.purge(self.session.actor(), name)
    }

    pub fn list_trash(&self) -> Vec<String> {
        self.fs.trash(self.session.actor())
    }

    // ========== Permissions ==========

    pub fn chmod_file(&mut self, name: &str, perms: PermSet) -> Result<(), FsError> {
        self.fs.chmod(self.session.actor(), name, perms)
    }

    pub fn grant_access(
        &mut self,
        name: &str,
        user_id: UserId,
        perms: PermSet,
    ) -> Result<(), FsError> {
        self.fs.grant(self.session.actor(), name, user_id, perms)
    }

    // ========== Metadata ==========

    pub fn search_files(&self, keyword: &str) -> Vec<FileSummary> {
        self.fs.search(keyword)
    }

    pub fn stat_file(&self, name: &str) -> Result<FileStat, FsError> {
        self.fs.stat(self.session.actor(), name)
    }
}

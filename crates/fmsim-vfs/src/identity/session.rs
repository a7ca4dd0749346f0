//! The logged-in session.
//!
//! A session always names a registered user. It changes only through
//! [`Session::login`], between commands.

use tracing::info;

use crate::core::{FsError, UserId};

use super::registry::{User, UserRegistry};

/// Current actor for session-bound operations.
#[derive(Clone, Debug)]
pub struct Session {
    current: User,
}

impl Session {
    /// Start a session logged in as user 0.
    pub fn new(registry: &UserRegistry) -> Result<Self, FsError> {
        let current = registry.resolve(0)?.clone();
        Ok(Self { current })
    }

    /// Switch the current actor. On failure the session is unchanged.
    pub fn login(&mut self, registry: &UserRegistry, id: UserId) -> Result<&User, FsError> {
        let user = registry.resolve(id)?;
        self.current = user.clone();
        info!(user_id = id, username = %user.name, "logged in");
        Ok(&self.current)
    }

    pub fn actor(&self) -> UserId {
        self.current.id
    }

    pub fn user(&self) -> &User {
        &self.current
    }
}

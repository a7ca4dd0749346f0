//! User registry.
//!
//! Users are appended with sequential ids and never removed, so an id is
//! valid exactly when it is below the registry length.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{validate_name, FsError, Resource, UserId};

/// A registered user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Sequential identifier
    pub id: UserId,
    /// Display name (not required to be unique)
    pub name: String,
}

/// Bounded, append-only set of known users.
#[derive(Clone, Debug)]
pub struct UserRegistry {
    users: Vec<User>,
    max_users: usize,
    max_name_len: usize,
}

impl UserRegistry {
    /// Create an empty registry holding at most `max_users` users.
    pub fn new(max_users: usize, max_name_len: usize) -> Self {
        Self {
            users: Vec::new(),
            max_users,
            max_name_len,
        }
    }

    /// Register a user and return its id.
    pub fn register(&mut self, name: &str) -> Result<UserId, FsError> {
        if self.users.len() >= self.max_users {
            return Err(FsError::CapacityExceeded(Resource::Users));
        }
        validate_name(name, self.max_name_len)?;

        let id = self.users.len() as UserId;
        self.users.push(User {
            id,
            name: name.into(),
        });
        info!(user_id = id, username = name, "user registered");
        Ok(id)
    }

    /// Look up a user by id.
    pub fn resolve(&self, id: UserId) -> Result<&User, FsError> {
        self.users
            .get(id as usize)
            .ok_or(FsError::UnknownUser(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

//! Permission bits and sets.
//!
//! A [`PermSet`] is a three-bit set over read, write and execute. The text
//! form is the familiar `rwx` letters, e.g. `"rw"` or `"r-x"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FsError;

/// A single access right.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Read (also required to open)
    Read,
    /// Write
    Write,
    /// Execute
    Execute,
}

impl Permission {
    /// All permissions in display order.
    pub const ALL: [Permission; 3] = [Permission::Read, Permission::Write, Permission::Execute];

    const fn bit(self) -> u8 {
        match self {
            Permission::Read => 0b001,
            Permission::Write => 0b010,
            Permission::Execute => 0b100,
        }
    }

    /// The `rwx` letter for this permission.
    pub const fn letter(self) -> char {
        match self {
            Permission::Read => 'r',
            Permission::Write => 'w',
            Permission::Execute => 'x',
        }
    }

    /// Parse a single `rwx` letter.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'r' => Some(Permission::Read),
            'w' => Some(Permission::Write),
            'x' => Some(Permission::Execute),
            _ => None,
        }
    }
}

/// A set of [`Permission`]s.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PermSet(u8);

impl PermSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Read, write and execute.
    pub const fn all() -> Self {
        Self(0b111)
    }

    /// Read only.
    pub const fn read_only() -> Self {
        Self(0b001)
    }

    /// Read and write.
    pub const fn read_write() -> Self {
        Self(0b011)
    }

    pub fn contains(self, perm: Permission) -> bool {
        self.0 & perm.bit() != 0
    }

    pub fn insert(&mut self, perm: Permission) {
        self.0 |= perm.bit();
    }

    pub fn remove(&mut self, perm: Permission) {
        self.0 &= !perm.bit();
    }

    pub fn union(self, other: PermSet) -> PermSet {
        PermSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained permissions in `rwx` order.
    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl From<Permission> for PermSet {
    fn from(perm: Permission) -> Self {
        PermSet(perm.bit())
    }
}

impl FromIterator<Permission> for PermSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = PermSet::empty();
        for perm in iter {
            set.insert(perm);
        }
        set
    }
}

impl FromStr for PermSet {
    type Err = FsError;

    /// Letters may appear in any order and repeat; `-` is a placeholder.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = PermSet::empty();
        for c in s.chars() {
            if c == '-' {
                continue;
            }
            let perm =
                Permission::from_letter(c).ok_or_else(|| FsError::InvalidPermissions(s.into()))?;
            set.insert(perm);
        }
        Ok(set)
    }
}

impl TryFrom<String> for PermSet {
    type Error = FsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PermSet> for String {
    fn from(set: PermSet) -> Self {
        set.to_string()
    }
}

impl fmt::Display for PermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for perm in self.iter() {
            write!(f, "{}", perm.letter())?;
        }
        Ok(())
    }
}

// Popcodes Ledger
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Key-value storage the ledger state lives in.
//!
//! The host environment provides a [Storage]. The runtime never writes to it directly while a
//! transaction is validated. All writes are staged in an [Overlay] and committed once the whole
//! transaction has been accepted.

use std::collections::BTreeMap;

/// Error raised by a [Storage] implementation.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

/// Key-value substrate provided by the host ledger.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Write all `changes` in order.
    fn commit(&mut self, changes: Changes) -> Result<(), StorageError> {
        for (key, value) in changes {
            self.put(&key, value)?;
        }
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}

/// Staged writes produced by an [Overlay].
pub type Changes = BTreeMap<String, Vec<u8>>;

/// [Storage] held entirely in memory.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<u8>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<u8>)> for MemoryStorage {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        MemoryStorage {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Read-through staging layer on top of a backing [Storage].
///
/// Reads see staged writes first. The backing storage is only borrowed immutably, so nothing
/// reaches it until the caller commits [Overlay::into_changes].
pub struct Overlay<'a, S: Storage + ?Sized> {
    backing: &'a S,
    changes: Changes,
}

impl<'a, S: Storage + ?Sized> Overlay<'a, S> {
    pub fn new(backing: &'a S) -> Self {
        Overlay {
            backing,
            changes: Changes::new(),
        }
    }

    pub fn into_changes(self) -> Changes {
        self.changes
    }
}

impl<'a, S: Storage + ?Sized> Storage for Overlay<'a, S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match self.changes.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.backing.get(key),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.changes.insert(key.to_string(), value);
        Ok(())
    }
}

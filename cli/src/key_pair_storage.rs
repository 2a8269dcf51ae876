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

//! Manages key pairs stored in the filesystem,
//! providing ways to store and retrieve them.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use thiserror::Error as ThisError;

use std::io::Error as IOError;
use std::path::{Path, PathBuf};

use popcodes_client::{ecdsa, CryptoPair as _};

/// The data that is stored in the filesystem relative
/// to a key pair. The name of the key pair is used as
/// the key to this value, therefore not included here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KeyPairData {
    pub seed: Seed,
}

impl KeyPairData {
    pub fn key_pair(&self) -> ecdsa::Pair {
        ecdsa::Pair::from_seed(&self.seed)
    }
}

/// The seed from which a key pair
/// can be deterministically generated.
type Seed = [u8; 32];

#[derive(Debug, ThisError)]
pub enum Error {
    /// A key pair with the given name already exists
    #[error("A key pair with the given name already exists")]
    AlreadyExists(),

    /// Failed to write to the key-pairs file
    #[error("Failed to write the key-pairs file '{1}'")]
    FailedWrite(#[source] WritingError, PathBuf),

    /// Failed to read the key-pairs file
    #[error("Failed to read the key-pairs file '{1}'")]
    FailedRead(#[source] ReadingError, PathBuf),

    /// Cannot create directory
    #[error("Cannot create directory '{1}'")]
    CannotCreateDirectory(#[source] IOError, PathBuf),

    /// The platform has no data directory for the current user
    #[error("Cannot determine the data directory of the current user")]
    NoDataDirectory(),

    /// Could not find a key pair with the given name
    #[error("Could not find a key pair with the given name")]
    NotFound(),
}

/// Possible errors when writing to the key-pairs file.
#[derive(Debug, ThisError)]
pub enum WritingError {
    #[error(transparent)]
    IO(IOError),

    #[error(transparent)]
    Serialization(serde_json::Error),
}

/// Possible errors when reading the key-pairs file.
#[derive(Debug, ThisError)]
pub enum ReadingError {
    #[error(transparent)]
    IO(IOError),

    #[error(transparent)]
    Deserialization(serde_json::Error),
}

/// Add a key pair to the storage.
///
/// Fails if a key pair with the given `name` already exists.
/// It can also fail from IO and Serde Json errors.
pub fn add(name: String, data: KeyPairData) -> Result<(), Error> {
    add_to(&file_path()?, name, data)
}

/// List all the stored key-pairs.
///
/// It can fail from IO errors or Serde Json errors.
pub fn list() -> Result<HashMap<String, KeyPairData>, Error> {
    list_from(&file_path()?)
}

/// Get a key pair by name.
///
/// It can fail from IO and Serde Json errors, or if no such
/// key pair is found.
pub fn get(name: &str) -> Result<KeyPairData, Error> {
    list()?.get(name).cloned().ok_or(Error::NotFound())
}

/// Directory where the CLI keeps its files.
pub fn data_dir() -> Result<PathBuf, Error> {
    let base_dirs = BaseDirs::new().ok_or(Error::NoDataDirectory())?;
    Ok(base_dirs.data_dir().join("popcodes-cli"))
}

fn add_to(path: &Path, name: String, data: KeyPairData) -> Result<(), Error> {
    let mut key_pairs = list_from(path)?;
    if key_pairs.contains_key(&name) {
        return Err(Error::AlreadyExists());
    }

    key_pairs.insert(name, data);
    update(path, key_pairs)
}

fn list_from(path: &Path) -> Result<HashMap<String, KeyPairData>, Error> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(path).map_err(|err| Error::FailedRead(ReadingError::IO(err), path.into()))?;
    match serde_json::from_reader(&file) {
        Ok(VersionedFile::V1 { key_pairs }) => Ok(key_pairs),
        Err(err) => Err(Error::FailedRead(
            ReadingError::Deserialization(err),
            path.into(),
        )),
    }
}

fn update(path: &Path, key_pairs: HashMap<String, KeyPairData>) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|err| Error::CannotCreateDirectory(err, dir.into()))?;
    }
    let data = VersionedFile::V1 { key_pairs };
    let new_content = serde_json::to_string_pretty(&data)
        .map_err(|err| Error::FailedWrite(WritingError::Serialization(err), path.into()))?;
    std::fs::write(path, new_content.as_bytes())
        .map_err(|err| Error::FailedWrite(WritingError::IO(err), path.into()))?;
    Ok(())
}

/// The file where the user key-pairs are stored.
const FILE: &str = "key-pairs.json";

fn file_path() -> Result<PathBuf, Error> {
    Ok(data_dir()?.join(FILE))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "version")]
enum VersionedFile {
    #[serde(rename = "1")]
    V1 {
        key_pairs: HashMap<String, KeyPairData>,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys").join(FILE);
        assert!(list_from(&path).unwrap().is_empty());

        let data = KeyPairData { seed: [7u8; 32] };
        add_to(&path, "alice".to_string(), data.clone()).unwrap();

        let key_pairs = list_from(&path).unwrap();
        assert_eq!(key_pairs.len(), 1);
        assert_eq!(key_pairs["alice"], data);
        assert_eq!(
            key_pairs["alice"].key_pair().public(),
            ecdsa::Pair::from_seed(&[7u8; 32]).public()
        );
    }

    #[test]
    fn add_existing_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE);
        add_to(&path, "alice".to_string(), KeyPairData { seed: [1u8; 32] }).unwrap();

        match add_to(&path, "alice".to_string(), KeyPairData { seed: [2u8; 32] }) {
            Err(Error::AlreadyExists()) => (),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(list_from(&path).unwrap()["alice"].seed, [1u8; 32]);
    }

    #[test]
    fn versioned_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE);
        add_to(&path, "bob".to_string(), KeyPairData { seed: [0u8; 32] }).unwrap();

        let content: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(content["version"], "1");
        assert!(content["key_pairs"]["bob"]["seed"].is_array());
    }
}

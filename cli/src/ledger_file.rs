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

//! Keeps the ledger state in a JSON file so that it survives between CLI invocations.
//!
//! The file maps storage keys to hex encoded values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use popcodes_client::{
    Backend, BackendTransactionApplied as TransactionApplied, Call, Emulator, Error as ClientError,
    MemoryStorage, Response,
};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Failed to read the ledger file '{1}'")]
    FailedRead(#[source] std::io::Error, PathBuf),

    #[error("Failed to write the ledger file '{1}'")]
    FailedWrite(#[source] std::io::Error, PathBuf),

    #[error("The ledger file '{1}' is malformed")]
    Malformed(#[source] serde_json::Error, PathBuf),

    #[error("The ledger file '{1}' contains an invalid value for '{0}'")]
    InvalidValue(String, PathBuf),
}

/// Load the ledger state stored at `path`.
///
/// A missing file is an empty, uninitialized ledger.
pub fn load(path: &Path) -> Result<MemoryStorage, Error> {
    if !path.exists() {
        return Ok(MemoryStorage::new());
    }
    let content =
        std::fs::read(path).map_err(|err| Error::FailedRead(err, path.to_path_buf()))?;
    let entries: BTreeMap<String, String> = serde_json::from_slice(&content)
        .map_err(|err| Error::Malformed(err, path.to_path_buf()))?;
    entries
        .into_iter()
        .map(|(key, value)| match hex::decode(&value) {
            Ok(value) => Ok((key, value)),
            Err(_) => Err(Error::InvalidValue(key, path.to_path_buf())),
        })
        .collect()
}

/// Write `storage` to `path`, creating parent directories as needed.
pub fn save(path: &Path, storage: &MemoryStorage) -> Result<(), Error> {
    let entries: BTreeMap<&String, String> = storage
        .iter()
        .map(|(key, value)| (key, hex::encode(value)))
        .collect();
    let content = serde_json::to_string_pretty(&entries)
        .map_err(|err| Error::Malformed(err, path.to_path_buf()))?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|err| Error::FailedWrite(err, dir.to_path_buf()))?;
    }
    std::fs::write(path, content).map_err(|err| Error::FailedWrite(err, path.to_path_buf()))
}

/// [Backend] that runs an [Emulator] on the ledger file and writes the file back after every
/// accepted transaction.
pub struct LedgerFile {
    path: PathBuf,
    emulator: Emulator,
}

impl LedgerFile {
    pub fn open(path: PathBuf) -> Result<Self, Error> {
        let emulator = Emulator::from_storage(load(&path)?);
        Ok(LedgerFile { path, emulator })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), ClientError> {
        let storage = self.emulator.snapshot()?;
        save(&self.path, &storage).map_err(|err| ClientError::Other(err.to_string()))?;
        log::debug!("Saved {} ledger entries to {}", storage.len(), self.path.display());
        Ok(())
    }
}

#[async_trait::async_trait]
impl Backend for LedgerFile {
    async fn submit(
        &self,
        call: Call,
    ) -> Result<Response<TransactionApplied, ClientError>, ClientError> {
        let tx_applied = self.emulator.submit(call).await?.await?;
        if tx_applied.result.is_ok() {
            self.persist()?;
        }
        Ok(Box::pin(futures::future::ready(Ok(tx_applied))))
    }

    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, ClientError> {
        self.emulator.fetch(key).await
    }
}

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

//! Provides [Emulator] backend to run the ledger in memory.

use std::sync::{Arc, Mutex, MutexGuard};

use popcodes_runtime::{apply, Call, GenesisConfig, MemoryStorage, Storage as _};

use crate::backend;
use crate::interface::*;

/// Seed phrase used by [Emulator::new].
pub const DEV_SEED_PHRASE: &str = "Hello World";

/// [backend::Backend] implementation using the native runtime and in memory state to emulate
/// the ledger.
///
/// # Differences with a real ledger host
///
/// * Every [backend::Backend::submit] call applies the transaction immediately.
///
/// * The state can be exported with [Emulator::snapshot] and restored with
///   [Emulator::from_storage].
#[derive(Clone)]
pub struct Emulator {
    state: Arc<Mutex<MemoryStorage>>,
}

impl Emulator {
    /// Create an emulator initialized with [DEV_SEED_PHRASE] and default parameters.
    pub fn new() -> Result<Self, Error> {
        Self::with_genesis(&GenesisConfig::new(DEV_SEED_PHRASE))
    }

    pub fn with_genesis(genesis_config: &GenesisConfig) -> Result<Self, Error> {
        let mut storage = MemoryStorage::new();
        genesis_config.build(&mut storage)?;
        Ok(Self::from_storage(storage))
    }

    /// Run the emulator on existing state. The state may be uninitialized.
    pub fn from_storage(storage: MemoryStorage) -> Self {
        Emulator {
            state: Arc::new(Mutex::new(storage)),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<MemoryStorage, Error> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryStorage>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::from("Emulator state lock is poisoned"))
    }
}

#[async_trait::async_trait]
impl backend::Backend for Emulator {
    async fn submit(
        &self,
        call: Call,
    ) -> Result<Response<backend::TransactionApplied, Error>, Error> {
        let tx_hash = call.hash();
        let applied = {
            let mut state = self.lock()?;
            match apply(&mut *state, call) {
                Ok(events) => backend::TransactionApplied {
                    tx_hash,
                    events,
                    result: Ok(()),
                },
                Err(popcodes_runtime::Error::Rejected(error)) => backend::TransactionApplied {
                    tx_hash,
                    events: Vec::new(),
                    result: Err(error),
                },
                Err(error) => return Err(error.into()),
            }
        };
        Ok(Box::pin(futures::future::ready(Ok(applied))))
    }

    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let state = self.lock()?;
        let value = state.get(key).map_err(popcodes_runtime::Error::from)?;
        Ok(value)
    }
}

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

//! Initial ledger state.

use sp_core::H256;

use popcodes_core::sha2_256;
use popcodes_core::state::{LedgerParams, TxCache};

use crate::error::Error;
use crate::ledger::PopcodeLedger;
use crate::store::Storage;

/// Configuration used to initialize the ledger state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisConfig {
    /// The initial counter seed is the SHA-256 digest of this phrase.
    pub seed_phrase: String,
    pub params: LedgerParams,
}

impl GenesisConfig {
    pub fn new(seed_phrase: impl Into<String>) -> Self {
        GenesisConfig {
            seed_phrase: seed_phrase.into(),
            params: LedgerParams::default(),
        }
    }

    pub fn with_params(self, params: LedgerParams) -> Self {
        GenesisConfig { params, ..self }
    }

    pub fn initial_seed(&self) -> H256 {
        H256(sha2_256(self.seed_phrase.as_bytes()))
    }

    /// Write the initial state to `storage` and return the counter seed.
    ///
    /// Fails if the storage already holds a counter seed.
    pub fn build<S: Storage>(&self, storage: &mut S) -> Result<H256, Error> {
        if !self.params.is_valid() {
            return Err(Error::InvalidParams);
        }

        let mut ledger = PopcodeLedger::new(storage);
        if ledger.counter_seed()?.is_some() {
            return Err(Error::AlreadyInitialized);
        }

        let seed = self.initial_seed();
        ledger.put_params(&self.params)?;
        ledger.put_tx_cache(&TxCache::new())?;
        ledger.put_counter_seed(&seed)?;
        log::info!("Initialized ledger with counter seed {:?}", seed);
        Ok(seed)
    }
}

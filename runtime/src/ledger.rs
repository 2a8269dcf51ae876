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

//! Typed access to the ledger state held in a [Storage].
//!
//! # Storage layout
//!
//! | Key                 | Value                         |
//! |---------------------|-------------------------------|
//! | `Popcode/<address>` | [PopcodeAccount]              |
//! | `Recipe/<name>`     | [Recipe]                      |
//! | `CounterSeed`       | global counter seed ([H256])  |
//! | `TxCache`           | [TxCache]                     |
//! | `LedgerParams`      | [LedgerParams]                |
//!
//! All values are SCALE encoded.

use parity_scale_codec::{Decode, Encode};
use sp_core::H256;

use popcodes_core::state::{LedgerParams, PopcodeAccount, Recipe, TxCache};
use popcodes_core::Address;

use crate::error::Error;
use crate::store::Storage;

pub const ACCOUNT_PREFIX: &str = "Popcode/";
pub const RECIPE_PREFIX: &str = "Recipe/";
pub const COUNTER_SEED_KEY: &str = "CounterSeed";
pub const TX_CACHE_KEY: &str = "TxCache";
pub const PARAMS_KEY: &str = "LedgerParams";

pub fn account_key(address: &Address) -> String {
    format!("{}{}", ACCOUNT_PREFIX, address)
}

pub fn recipe_key(name: &str) -> String {
    format!("{}{}", RECIPE_PREFIX, name)
}

/// Account and recipe store on top of a [Storage].
///
/// Holds no business logic. Missing accounts are reported as `None` and it is up to the caller
/// to decide what a missing account means.
pub struct PopcodeLedger<S: Storage> {
    storage: S,
}

impl<S: Storage> PopcodeLedger<S> {
    pub fn new(storage: S) -> Self {
        PopcodeLedger { storage }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn get_account(&self, address: &Address) -> Result<Option<PopcodeAccount>, Error> {
        self.get(&account_key(address))
    }

    pub fn put_account(&mut self, account: &PopcodeAccount) -> Result<(), Error> {
        self.put(&account_key(&account.address), account)
    }

    pub fn get_recipe(&self, name: &str) -> Result<Option<Recipe>, Error> {
        self.get(&recipe_key(name))
    }

    pub fn put_recipe(&mut self, recipe: &Recipe) -> Result<(), Error> {
        self.put(&recipe_key(&recipe.name), recipe)
    }

    /// Returns `None` if the ledger has not been initialized.
    pub fn counter_seed(&self) -> Result<Option<H256>, Error> {
        self.get(COUNTER_SEED_KEY)
    }

    pub fn put_counter_seed(&mut self, seed: &H256) -> Result<(), Error> {
        self.put(COUNTER_SEED_KEY, seed)
    }

    pub fn tx_cache(&self) -> Result<TxCache, Error> {
        Ok(self.get(TX_CACHE_KEY)?.unwrap_or_default())
    }

    pub fn put_tx_cache(&mut self, cache: &TxCache) -> Result<(), Error> {
        self.put(TX_CACHE_KEY, cache)
    }

    pub fn params(&self) -> Result<LedgerParams, Error> {
        Ok(self.get(PARAMS_KEY)?.unwrap_or_default())
    }

    pub fn put_params(&mut self, params: &LedgerParams) -> Result<(), Error> {
        self.put(PARAMS_KEY, params)
    }

    fn get<T: Decode>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.storage.get(key)? {
            None => Ok(None),
            Some(data) => T::decode(&mut data.as_slice())
                .map(Some)
                .map_err(|source| Error::Decode {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    fn put<T: Encode>(&mut self, key: &str, value: &T) -> Result<(), Error> {
        self.storage.put(key, value.encode())?;
        Ok(())
    }
}

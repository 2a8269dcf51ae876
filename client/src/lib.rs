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

//! Clients for the Popcodes ledger.
//!
//! The main entry point is [Client] which implements [ClientT].
//!
//! ```no_run
//! # use popcodes_client::*;
//! # async fn example() -> Result<(), Error> {
//! let client = Client::new_emulator()?;
//! let alice = ecdsa::Pair::from_string("//Alice", None).unwrap();
//! let address = Address::from_public_key(&alice.public());
//!
//! let counter = client.counter(&address).await?;
//! let mint = draft::MintDraft {
//!     address,
//!     amount: 10,
//!     asset_type: "Gold".into(),
//!     data: "bars".into(),
//! }
//! .sign(&alice, &counter);
//! let applied = client.submit_message(mint).await?.await?;
//! assert_eq!(applied.result, Ok(0));
//! # Ok(())
//! # }
//! ```
use std::sync::Arc;

use parity_scale_codec::Decode;

use popcodes_runtime::ledger;
use popcodes_runtime::replay::opening_counter;

mod backend;
pub mod draft;
mod error;
mod interface;
pub mod message;
mod transaction;

pub use backend::{
    Backend, Emulator, TransactionApplied as BackendTransactionApplied, DEV_SEED_PHRASE,
};
pub use interface::*;

/// Client to interact with the Popcodes ledger through a [Backend].
///
/// Implements [ClientT] for interacting with the ledger.
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn Backend + Sync + Send>,
}

impl Client {
    /// Create a new client that emulates the ledger in memory. See [Emulator::new].
    pub fn new_emulator() -> Result<Self, Error> {
        Ok(Self::new(Emulator::new()?))
    }

    pub fn new(backend: impl Backend + Sync + Send + 'static) -> Self {
        Client {
            backend: Arc::new(backend),
        }
    }

    async fn fetch_value<T: Decode + Send>(&self, key: &str) -> Result<Option<T>, Error> {
        let maybe_data = self.backend.fetch(key).await?;
        let value = match maybe_data {
            Some(data) => Some(T::decode(&mut data.as_slice())?),
            None => None,
        };
        Ok(value)
    }
}

#[async_trait::async_trait]
impl ClientT for Client {
    async fn submit_transaction<Message_: Message>(
        &self,
        transaction: Transaction<Message_>,
    ) -> Result<Response<TransactionApplied<Message_>, Error>, Error> {
        log::debug!(
            "Submitting {} transaction {:?}",
            transaction.call.function_name(),
            transaction.hash()
        );
        let tx_applied_fut = self.backend.submit(transaction.call).await?;
        Ok(Box::pin(async move {
            let tx_applied = tx_applied_fut.await?;
            let tx_hash = tx_applied.tx_hash;
            let result = match tx_applied.result {
                Ok(()) => Ok(Message_::result_from_events(&tx_applied.events)
                    .map_err(|error| Error::EventExtraction { error, tx_hash })?),
                Err(error) => Err(error),
            };
            Ok::<_, Error>(TransactionApplied {
                tx_hash,
                events: tx_applied.events,
                result,
            })
        }))
    }

    async fn submit_message<Message_: Message>(
        &self,
        message: Message_,
    ) -> Result<Response<TransactionApplied<Message_>, Error>, Error> {
        self.submit_transaction(Transaction::new(message)).await
    }

    async fn get_account(&self, address: &Address) -> Result<Option<PopcodeAccount>, Error> {
        self.fetch_value(&ledger::account_key(address)).await
    }

    async fn balance(&self, address: &Address) -> Result<PopcodeAccount, Error> {
        if let Some(account) = self.get_account(address).await? {
            return Ok(account);
        }
        let seed = self
            .counter_seed()
            .await?
            .ok_or_else(|| Error::Runtime(PopcodesError::Uninitialized.into()))?;
        Ok(PopcodeAccount::new(
            *address,
            opening_counter(&seed, address),
        ))
    }

    async fn counter(&self, address: &Address) -> Result<Counter, Error> {
        Ok(self.balance(address).await?.counter)
    }

    async fn get_recipe(&self, name: &str) -> Result<Option<Recipe>, Error> {
        self.fetch_value(&ledger::recipe_key(name)).await
    }

    async fn counter_seed(&self) -> Result<Option<H256>, Error> {
        self.fetch_value(ledger::COUNTER_SEED_KEY).await
    }

    async fn tx_cache(&self) -> Result<TxCache, Error> {
        Ok(self
            .fetch_value(ledger::TX_CACHE_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn ledger_params(&self) -> Result<LedgerParams, Error> {
        Ok(self
            .fetch_value(ledger::PARAMS_KEY)
            .await?
            .unwrap_or_default())
    }
}

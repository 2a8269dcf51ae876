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

//! Provide an abstract trait for the ledger client and the necessary types.
//!
//! The [ClientT] trait defines methods to submit transactions and to read the ledger state.
use futures::future::BoxFuture;

pub use popcodes_runtime::*;

pub use popcodes_core::state::{
    Ingredient, LedgerParams, Output, PopcodeAccount, Recipe, TxCache, TxCacheEntry,
};
pub use sp_core::crypto::{Pair as CryptoPair, SecretStringError as CryptoError};
pub use sp_core::{ecdsa, H256};

pub use crate::error::Error;
pub use crate::message::Message;
pub use crate::transaction::Transaction;

/// Result of a transaction being applied to the ledger.
///
/// Returned after submitting a transaction.
#[derive(Clone, Debug)]
pub struct TransactionApplied<Message_: Message> {
    pub tx_hash: TxHash,
    /// Events emitted by this transaction
    pub events: Vec<Event>,
    /// The result of the message.
    ///
    /// `Err` if the ledger rejected the transaction. See [Message::result_from_events] for the
    /// success value.
    pub result: Result<Message_::Output, PopcodesError>,
}

/// Return type for all [ClientT] methods.
pub type Response<T, Error> = BoxFuture<'static, Result<T, Error>>;

/// Trait for ledger clients sending transactions and looking up state.
#[async_trait::async_trait]
pub trait ClientT {
    /// Submit a transaction.
    ///
    /// ```no_run
    /// # use popcodes_client::*;
    /// # async fn example<M: Message>(client: Client, tx: Transaction<M>) -> Result<(), Error> {
    ///
    /// // Submit the transaction to the ledger.
    /// //
    /// // This call fails if the backend cannot process the transaction.
    /// let tx_applied_fut = client.submit_transaction(tx).await?;
    ///
    /// // Wait for the transaction to be applied.
    /// //
    /// // This will not error if the ledger rejected the transaction. See
    /// // TransactionApplied::result for that.
    /// let tx_applied = tx_applied_fut.await?;
    ///
    /// Ok(())
    /// # }
    /// ```
    async fn submit_transaction<Message_: Message>(
        &self,
        transaction: Transaction<Message_>,
    ) -> Result<Response<TransactionApplied<Message_>, Error>, Error>;

    /// Submit a signed ledger message as a transaction.
    ///
    /// Same as [ClientT::submit_transaction] but wraps the message.
    async fn submit_message<Message_: Message>(
        &self,
        message: Message_,
    ) -> Result<Response<TransactionApplied<Message_>, Error>, Error>;

    /// Fetch the account stored at `address`. `None` if the address has never been used.
    async fn get_account(&self, address: &Address) -> Result<Option<PopcodeAccount>, Error>;

    /// Fetch the account at `address` or an empty account with its opening counter.
    async fn balance(&self, address: &Address) -> Result<PopcodeAccount, Error>;

    /// The counter that signatures for the next transaction on `address` must use.
    async fn counter(&self, address: &Address) -> Result<Counter, Error>;

    async fn get_recipe(&self, name: &str) -> Result<Option<Recipe>, Error>;

    /// Fetch the global counter seed. `None` if the ledger is not initialized.
    async fn counter_seed(&self) -> Result<Option<H256>, Error>;

    async fn tx_cache(&self) -> Result<TxCache, Error>;

    async fn ledger_params(&self) -> Result<LedgerParams, Error>;
}

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

//! Define trait for client backends and provide the emulator implementation
use popcodes_runtime::{Call, Event, PopcodesError, TxHash};

use crate::interface::*;

mod emulator;

pub use emulator::{Emulator, DEV_SEED_PHRASE};

/// Indicator that a transaction has been processed by the ledger.
///
/// Obtained after a transaction has been submitted and processed.
#[derive(Clone, Debug)]
pub struct TransactionApplied {
    pub tx_hash: TxHash,
    /// Events emitted by this transaction. Empty if the transaction was rejected.
    pub events: Vec<Event>,
    /// `Err` if the ledger rejected the transaction.
    pub result: Result<(), PopcodesError>,
}

/// Backend for talking to the ledger.
///
/// The interface is low-level and agnostic of the ledger state layout.
#[async_trait::async_trait]
pub trait Backend {
    /// Submit a transaction to the ledger and return when it has been applied.
    async fn submit(&self, call: Call) -> Result<Response<TransactionApplied, Error>, Error>;

    /// Fetch a value from the ledger state storage.
    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;
}

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

use popcodes_core::PopcodesError;

use crate::store::StorageError;

/// Error returned by the runtime entry points.
///
/// [Error::Rejected] means the transaction was invalid and nothing was written. All other
/// variants are infrastructure failures that also abort the transaction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transaction rejected: {0}")]
    Rejected(#[from] PopcodesError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A stored value could not be decoded.
    #[error("failed to decode state value at {key}")]
    Decode {
        key: String,
        #[source]
        source: parity_scale_codec::Error,
    },

    #[error("failed to serialize query result")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown function {0}")]
    UnknownFunction(String),

    #[error("the ledger is already initialized")]
    AlreadyInitialized,

    #[error("invalid ledger parameters")]
    InvalidParams,
}

impl Error {
    /// Returns the rejection reason if the transaction itself was invalid.
    pub fn rejection(&self) -> Option<PopcodesError> {
        match self {
            Error::Rejected(error) => Some(*error),
            _ => None,
        }
    }
}

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

//! The closed set of transactions the runtime applies.

use parity_scale_codec::{Decode, Encode};
use sp_core::H256;

use popcodes_core::{message, sha2_256, TxHash};

#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub enum Call {
    Mint(message::Mint),
    Transfer(message::Transfer),
    Unitize(message::Unitize),
    Combine(message::Combine),
    RegisterRecipe(message::RegisterRecipe),
}

impl Call {
    /// `SHA-256` of the SCALE encoded call.
    pub fn hash(&self) -> TxHash {
        H256(sha2_256(&self.encode()))
    }

    /// Name of the dispatch function that accepts this call.
    pub fn function_name(&self) -> &'static str {
        match self {
            Call::Mint(_) => "create",
            Call::Transfer(_) => "transfer",
            Call::Unitize(_) => "unitize",
            Call::Combine(_) => "combine",
            Call::RegisterRecipe(_) => "recipe",
        }
    }
}

impl From<message::Mint> for Call {
    fn from(message: message::Mint) -> Self {
        Call::Mint(message)
    }
}

impl From<message::Transfer> for Call {
    fn from(message: message::Transfer) -> Self {
        Call::Transfer(message)
    }
}

impl From<message::Unitize> for Call {
    fn from(message: message::Unitize) -> Self {
        Call::Unitize(message)
    }
}

impl From<message::Combine> for Call {
    fn from(message: message::Combine) -> Self {
        Call::Combine(message)
    }
}

impl From<message::RegisterRecipe> for Call {
    fn from(message: message::RegisterRecipe) -> Self {
        Call::RegisterRecipe(message)
    }
}

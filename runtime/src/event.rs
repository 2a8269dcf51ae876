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

//! Events emitted by applied transactions.

use parity_scale_codec::{Decode, Encode};
use sp_core::H256;

use popcodes_core::{Address, Counter, OutputIndex};

#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// A new output was minted. `counter` is the new account counter.
    Minted {
        address: Address,
        output: OutputIndex,
        counter: Counter,
    },
    Transferred {
        address: Address,
        output: OutputIndex,
        counter: Counter,
    },
    /// Value moved from one output of `source` to new outputs of `destination`.
    Unitized {
        source: Address,
        source_output: OutputIndex,
        destination: Address,
        outputs: Vec<OutputIndex>,
        counter: Counter,
    },
    Combined {
        address: Address,
        recipe: String,
        output: OutputIndex,
        counter: Counter,
    },
    RecipeRegistered {
        name: String,
    },
    /// The global counter seed was rotated to `seed`.
    CounterSeedRotated {
        seed: H256,
    },
}

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

//! Transaction messages accepted by the Popcodes ledger.
//!
//! Every message carries the signatures that authorize it. The signed payload is the canonical
//! message returned by `canonical_message`, see [crate::canonical].

use parity_scale_codec::{Decode, Encode};

use crate::state::Ingredient;
use crate::{canonical, Address, Amount, Counter, OutputIndex, PublicKey, Signature};

/// Create a new unowned output of `amount` units at `address`.
///
/// `creator` can be any key. It is recorded on the output. The creator signature covers the
/// account counter, so the same signed mint cannot be applied twice.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct Mint {
    pub address: Address,
    pub amount: Amount,
    pub asset_type: String,
    pub data: String,
    pub creator: PublicKey,
    pub creator_sig: Signature,
}

impl Mint {
    pub fn canonical_message(&self, counter: &Counter) -> String {
        canonical::mint(
            counter,
            &self.address,
            self.amount,
            &self.asset_type,
            &self.data,
        )
    }
}

/// Replace the owner set of an output.
///
/// `prev_owner_sigs` is positional: entry `i` is matched against `owners[i]` of the output.
/// A threshold of zero means "all new owners".
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub address: Address,
    pub output: OutputIndex,
    pub new_owners: Vec<PublicKey>,
    pub threshold: u32,
    pub data: String,
    pub popcode_key: PublicKey,
    pub popcode_sig: Signature,
    pub prev_owner_sigs: Vec<Option<Signature>>,
}

impl Transfer {
    pub fn canonical_message(&self, counter: &Counter) -> String {
        canonical::transfer(
            counter,
            self.output,
            self.threshold,
            &self.data,
            &self.new_owners,
        )
    }
}

/// Split an output of the source account into outputs at the destination account.
///
/// The destination amounts must add up to the source amount.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct Unitize {
    pub source_address: Address,
    pub source_output: OutputIndex,
    pub dest_address: Address,
    pub dest_amounts: Vec<Amount>,
    pub data: String,
    pub popcode_key: PublicKey,
    pub popcode_sig: Signature,
    pub owner_sigs: Vec<Signature>,
}

impl Unitize {
    pub fn canonical_message(&self, counter: &Counter) -> String {
        canonical::unitize(
            counter,
            &self.dest_address,
            &self.data,
            self.source_output,
            &self.dest_amounts,
        )
    }
}

/// Amount taken from one output of the combining account.
#[derive(Decode, Encode, Clone, Copy, Debug, Eq, PartialEq)]
pub struct CombineSource {
    pub output: OutputIndex,
    pub amount: Amount,
}

/// Consume ingredient outputs according to a recipe and produce a new output.
///
/// `creator` becomes the creator of the produced output. `owner_sigs` must satisfy the threshold
/// of every owned source output.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct Combine {
    pub address: Address,
    pub sources: Vec<CombineSource>,
    pub amount: Amount,
    pub recipe: String,
    pub data: String,
    pub creator: PublicKey,
    pub creator_sig: Signature,
    pub popcode_key: PublicKey,
    pub popcode_sig: Signature,
    pub owner_sigs: Vec<Signature>,
}

impl Combine {
    pub fn canonical_message(&self, counter: &Counter) -> String {
        canonical::combine(
            counter,
            &self.recipe,
            &self.sources,
            self.amount,
            &self.data,
        )
    }
}

/// Register a new global recipe.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct RegisterRecipe {
    pub name: String,
    pub created_type: String,
    pub ingredients: Vec<Ingredient>,
    pub creator: PublicKey,
    pub creator_sig: Signature,
}

impl RegisterRecipe {
    pub fn canonical_message(&self) -> String {
        canonical::recipe(&self.name, &self.created_type, &self.ingredients)
    }
}

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

//! Type definitions for all entities stored in the ledger state.

use parity_scale_codec::{Decode, Encode};

use crate::{Address, Amount, Counter, OutputIndex, PopcodesError, PublicKey, Signature};

/// A unit of asset value held at an address.
///
/// # Invariants
///
/// * `1 <= threshold <= owners.len()` unless `owners` is empty. An output with no owners is
///   controlled by the account identity key alone.
/// * An output with `amount == 0` is spent. Spent outputs keep their position so that output
///   indices stay stable.
///
/// # Relevant messages
///
/// * [crate::message::Mint]
/// * [crate::message::Transfer]
/// * [crate::message::Unitize]
/// * [crate::message::Combine]
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct Output {
    pub owners: Vec<PublicKey>,
    pub threshold: u32,
    pub amount: Amount,
    pub asset_type: String,
    pub data: String,
    /// Name of the recipe that produced this output, if it was made by [crate::message::Combine].
    pub recipe: Option<String>,
    /// Key that minted the asset type. Carried along through transfers and unitizations.
    pub creator: PublicKey,
    /// Counter of the account at the time the output was produced.
    pub prev_counter: Counter,
}

impl Output {
    /// Returns true if the output has owners whose signatures are needed to spend it.
    pub fn is_owned(&self) -> bool {
        !self.owners.is_empty()
    }

    pub fn is_spent(&self) -> bool {
        self.amount == 0
    }

    /// Number of distinct owner signatures required to spend the output.
    pub fn required_signatures(&self) -> usize {
        if self.is_owned() {
            self.threshold as usize
        } else {
            0
        }
    }
}

/// State held at a single address.
///
/// # Storage
///
/// Accounts are stored as a map keyed by [PopcodeAccount::address]. An account is created the
/// first time a transaction touches its address and is never deleted.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct PopcodeAccount {
    pub address: Address,
    /// Anti-replay nonce. Every accepted mutation replaces it with its SHA-256 digest.
    pub counter: Counter,
    pub outputs: Vec<Output>,
}

impl PopcodeAccount {
    /// Creates an empty account with its opening counter.
    pub fn new(address: Address, counter: Counter) -> Self {
        PopcodeAccount {
            address,
            counter,
            outputs: Vec::new(),
        }
    }

    /// Returns the unspent output at `index`.
    pub fn output(&self, index: OutputIndex) -> Result<&Output, PopcodesError> {
        let output = self
            .outputs
            .get(index as usize)
            .ok_or(PopcodesError::OutputIndexOutOfRange)?;
        if output.is_spent() {
            return Err(PopcodesError::SpentOutput);
        }
        Ok(output)
    }

    /// Mutable variant of [PopcodeAccount::output].
    pub fn output_mut(&mut self, index: OutputIndex) -> Result<&mut Output, PopcodesError> {
        let output = self
            .outputs
            .get_mut(index as usize)
            .ok_or(PopcodesError::OutputIndexOutOfRange)?;
        if output.is_spent() {
            return Err(PopcodesError::SpentOutput);
        }
        Ok(output)
    }

    /// Appends an output and returns its index.
    pub fn push_output(&mut self, output: Output) -> OutputIndex {
        self.outputs.push(output);
        (self.outputs.len() - 1) as OutputIndex
    }

    /// Sum of all unspent amounts of the given asset type.
    pub fn balance_of(&self, asset_type: &str) -> Amount {
        self.outputs
            .iter()
            .filter(|output| output.asset_type == asset_type)
            .map(|output| output.amount)
            .sum()
    }
}

/// Share of an asset type required by a [Recipe].
///
/// `numerator` units of `asset_type` are consumed for every `denominator` units produced.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct Ingredient {
    pub numerator: u32,
    pub denominator: u32,
    pub asset_type: String,
}

impl Ingredient {
    /// Returns true if consuming `consumed` units yields exactly `produced` units.
    pub fn matches(&self, consumed: Amount, produced: Amount) -> bool {
        (consumed as u128) * (self.denominator as u128)
            == (produced as u128) * (self.numerator as u128)
    }
}

/// A named rule to combine ingredient asset types into a new asset type.
///
/// # Storage
///
/// Recipes are stored as a map keyed by [Recipe::name]. They are immutable once registered.
///
/// # Relevant messages
///
/// * [crate::message::RegisterRecipe]
/// * [crate::message::Combine]
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub created_type: String,
    pub ingredients: Vec<Ingredient>,
    pub creator: PublicKey,
    pub creator_sig: Signature,
}

impl Recipe {
    pub fn ingredient(&self, asset_type: &str) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.asset_type == asset_type)
    }
}

/// An entry in the transaction cache.
///
/// Records the counter an address held before a transaction advanced it. Used to tell stale
/// signatures apart from invalid ones.
#[derive(Decode, Encode, Clone, Debug, Eq, PartialEq)]
pub struct TxCacheEntry {
    pub address: Address,
    pub prior_counter: Counter,
}

/// Recently applied transactions, oldest first.
pub type TxCache = Vec<TxCacheEntry>;

/// Tunables of the replay guard.
///
/// # Invariants
///
/// * `rotation_threshold < cache_capacity`
#[derive(Decode, Encode, Clone, Copy, Debug, Eq, PartialEq)]
pub struct LedgerParams {
    /// The counter seed is rotated when the transaction cache grows past this length.
    pub rotation_threshold: u32,
    /// The transaction cache is cleared when it reaches this length.
    pub cache_capacity: u32,
}

impl LedgerParams {
    pub fn is_valid(&self) -> bool {
        self.rotation_threshold > 0 && self.rotation_threshold < self.cache_capacity
    }
}

impl Default for LedgerParams {
    fn default() -> Self {
        LedgerParams {
            rotation_threshold: 101,
            cache_capacity: 150,
        }
    }
}

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

//! Unsigned message drafts.
//!
//! A draft holds the fields of a message. Signing a draft builds the canonical message for the
//! given counter and returns the signed ledger message. Use [crate::ClientT::counter] to obtain
//! the counter of the account a transaction targets.

use popcodes_core::{crypto, Address, Amount, Counter, OutputIndex, PublicKey};

use crate::ecdsa;
use crate::message::{Combine, CombineSource, Mint, RegisterRecipe, Transfer, Unitize};
use crate::{CryptoPair as _, Ingredient};

#[derive(Clone, Debug)]
pub struct MintDraft {
    pub address: Address,
    pub amount: Amount,
    pub asset_type: String,
    pub data: String,
}

impl MintDraft {
    pub fn sign(self, creator: &ecdsa::Pair, counter: &Counter) -> Mint {
        let message = popcodes_core::canonical::mint(
            counter,
            &self.address,
            self.amount,
            &self.asset_type,
            &self.data,
        );
        Mint {
            address: self.address,
            amount: self.amount,
            asset_type: self.asset_type,
            data: self.data,
            creator: creator.public(),
            creator_sig: crypto::sign(creator, &message),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TransferDraft {
    pub address: Address,
    pub output: OutputIndex,
    pub new_owners: Vec<PublicKey>,
    /// Zero requires all new owners.
    pub threshold: u32,
    pub data: String,
}

impl TransferDraft {
    /// `prev_owners` is positional and must follow the owner order of the output.
    pub fn sign(
        self,
        identity: &ecdsa::Pair,
        prev_owners: &[Option<&ecdsa::Pair>],
        counter: &Counter,
    ) -> Transfer {
        let message = popcodes_core::canonical::transfer(
            counter,
            self.output,
            self.threshold,
            &self.data,
            &self.new_owners,
        );
        Transfer {
            address: self.address,
            output: self.output,
            new_owners: self.new_owners,
            threshold: self.threshold,
            data: self.data,
            popcode_key: identity.public(),
            popcode_sig: crypto::sign(identity, &message),
            prev_owner_sigs: prev_owners
                .iter()
                .map(|owner| owner.map(|owner| crypto::sign(owner, &message)))
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UnitizeDraft {
    pub source_address: Address,
    pub source_output: OutputIndex,
    pub dest_address: Address,
    pub dest_amounts: Vec<Amount>,
    pub data: String,
}

impl UnitizeDraft {
    /// `counter` is the counter of the source account.
    pub fn sign(
        self,
        identity: &ecdsa::Pair,
        owners: &[&ecdsa::Pair],
        counter: &Counter,
    ) -> Unitize {
        let message = popcodes_core::canonical::unitize(
            counter,
            &self.dest_address,
            &self.data,
            self.source_output,
            &self.dest_amounts,
        );
        Unitize {
            source_address: self.source_address,
            source_output: self.source_output,
            dest_address: self.dest_address,
            dest_amounts: self.dest_amounts,
            data: self.data,
            popcode_key: identity.public(),
            popcode_sig: crypto::sign(identity, &message),
            owner_sigs: sign_all(owners, &message),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CombineDraft {
    pub address: Address,
    pub sources: Vec<CombineSource>,
    pub amount: Amount,
    pub recipe: String,
    pub data: String,
}

impl CombineDraft {
    pub fn sign(
        self,
        identity: &ecdsa::Pair,
        creator: &ecdsa::Pair,
        owners: &[&ecdsa::Pair],
        counter: &Counter,
    ) -> Combine {
        let message = popcodes_core::canonical::combine(
            counter,
            &self.recipe,
            &self.sources,
            self.amount,
            &self.data,
        );
        Combine {
            address: self.address,
            sources: self.sources,
            amount: self.amount,
            recipe: self.recipe,
            data: self.data,
            creator: creator.public(),
            creator_sig: crypto::sign(creator, &message),
            popcode_key: identity.public(),
            popcode_sig: crypto::sign(identity, &message),
            owner_sigs: sign_all(owners, &message),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RecipeDraft {
    pub name: String,
    pub created_type: String,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDraft {
    pub fn sign(self, creator: &ecdsa::Pair) -> RegisterRecipe {
        let message =
            popcodes_core::canonical::recipe(&self.name, &self.created_type, &self.ingredients);
        RegisterRecipe {
            name: self.name,
            created_type: self.created_type,
            ingredients: self.ingredients,
            creator: creator.public(),
            creator_sig: crypto::sign(creator, &message),
        }
    }
}

fn sign_all(signers: &[&ecdsa::Pair], message: &str) -> Vec<crate::Signature> {
    signers
        .iter()
        .map(|signer| crypto::sign(signer, message))
        .collect()
}

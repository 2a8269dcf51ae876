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

//! Read-only views of the ledger state.
//!
//! The `*View` types are the JSON documents returned by the query front-end. Keys, counters and
//! signatures are rendered as lowercase hex.

use serde::{Deserialize, Serialize};

use popcodes_core::state::{Ingredient, Output, PopcodeAccount, Recipe};
use popcodes_core::{counter_hex, public_key_hex, Address, PopcodesError};

use crate::error::Error;
use crate::ledger::PopcodeLedger;
use crate::replay::opening_counter;
use crate::store::{Overlay, Storage};

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceView {
    pub address: String,
    pub counter: String,
    pub outputs: Vec<OutputView>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OutputView {
    pub owners: Vec<String>,
    pub threshold: u32,
    pub amount: u64,
    #[serde(rename = "Type")]
    pub asset_type: String,
    pub data: String,
    pub recipe: Option<String>,
    pub creator: String,
    pub prev_counter: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RecipeView {
    pub name: String,
    pub created_type: String,
    pub ingredients: Vec<IngredientView>,
    pub creator: String,
    pub creator_sig: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct IngredientView {
    pub numerator: u32,
    pub denominator: u32,
    #[serde(rename = "Type")]
    pub asset_type: String,
}

impl From<&PopcodeAccount> for BalanceView {
    fn from(account: &PopcodeAccount) -> Self {
        BalanceView {
            address: account.address.to_string(),
            counter: counter_hex(&account.counter),
            outputs: account.outputs.iter().map(OutputView::from).collect(),
        }
    }
}

impl From<&Output> for OutputView {
    fn from(output: &Output) -> Self {
        OutputView {
            owners: output.owners.iter().map(public_key_hex).collect(),
            threshold: output.threshold,
            amount: output.amount,
            asset_type: output.asset_type.clone(),
            data: output.data.clone(),
            recipe: output.recipe.clone(),
            creator: public_key_hex(&output.creator),
            prev_counter: counter_hex(&output.prev_counter),
        }
    }
}

impl From<&Ingredient> for IngredientView {
    fn from(ingredient: &Ingredient) -> Self {
        IngredientView {
            numerator: ingredient.numerator,
            denominator: ingredient.denominator,
            asset_type: ingredient.asset_type.clone(),
        }
    }
}

impl From<&Recipe> for RecipeView {
    fn from(recipe: &Recipe) -> Self {
        RecipeView {
            name: recipe.name.clone(),
            created_type: recipe.created_type.clone(),
            ingredients: recipe.ingredients.iter().map(IngredientView::from).collect(),
            creator: public_key_hex(&recipe.creator),
            creator_sig: hex::encode(&recipe.creator_sig),
        }
    }
}

fn reader<S: Storage>(storage: &S) -> PopcodeLedger<Overlay<'_, S>> {
    PopcodeLedger::new(Overlay::new(storage))
}

/// The account at `address`.
///
/// An address that has never been used yields an empty account with its opening counter.
pub fn account<S: Storage>(storage: &S, address: &Address) -> Result<PopcodeAccount, Error> {
    let ledger = reader(storage);
    match ledger.get_account(address)? {
        Some(account) => Ok(account),
        None => {
            let seed = ledger
                .counter_seed()?
                .ok_or(PopcodesError::Uninitialized)?;
            Ok(PopcodeAccount::new(
                *address,
                opening_counter(&seed, address),
            ))
        }
    }
}

pub fn balance<S: Storage>(storage: &S, address: &Address) -> Result<BalanceView, Error> {
    account(storage, address).map(|account| BalanceView::from(&account))
}

pub fn recipe<S: Storage>(storage: &S, name: &str) -> Result<Option<RecipeView>, Error> {
    let recipe = reader(storage).get_recipe(name)?;
    Ok(recipe.as_ref().map(RecipeView::from))
}

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

//! Miscellaneous helpers used throughout Popcodes tests.

use rand::distributions::Alphanumeric;
use rand::Rng;

use popcodes_client::draft::*;
use popcodes_client::*;

/// Private key of the key pair used in the ledger fixtures. Controls
/// `74ded2036e988fc56e3cff77a40c58239591e921`.
pub const FIXTURE_PRIVATE_KEY: &str =
    "94d7fe7308a452fdf019a0424d9c48ba9b66bdbca565c6fa3b1bf9c646ebac20";

/// Submit a message and wait for it to be processed.
///
/// Panics if submission errors. The transaction itself may have been rejected.
pub async fn submit<Message_: Message>(
    client: &Client,
    message: Message_,
) -> TransactionApplied<Message_> {
    client
        .submit_message(message)
        .await
        .unwrap()
        .await
        .unwrap()
}

/// Submit a message and wait for it to be successfully applied.
///
/// Panics if submission errors or the ledger rejects the transaction.
pub async fn submit_ok<Message_: Message>(
    client: &Client,
    message: Message_,
) -> TransactionApplied<Message_>
where
    Message_::Output: std::fmt::Debug,
{
    let tx_applied = submit(client, message).await;
    assert!(
        tx_applied.result.is_ok(),
        "Transaction was rejected: {:?}",
        tx_applied.result
    );
    tx_applied
}

/// Submit a message, wait for it to be processed and return the rejection reason.
///
/// Panics if the transaction was applied.
pub async fn submit_err<Message_: Message>(client: &Client, message: Message_) -> PopcodesError {
    match submit(client, message).await.result {
        Ok(_) => panic!("Transaction was expected to be rejected"),
        Err(error) => error,
    }
}

pub fn key_pair_from_string(value: impl AsRef<str>) -> ecdsa::Pair {
    ecdsa::Pair::from_string(format!("//{}", value.as_ref()).as_str(), None).unwrap()
}

/// Key pair of the ledger fixtures. See [FIXTURE_PRIVATE_KEY].
pub fn fixture_key_pair() -> ecdsa::Pair {
    ecdsa::Pair::from_seed_slice(&hex::decode(FIXTURE_PRIVATE_KEY).unwrap()).unwrap()
}

/// Create a key pair from a random string.
pub fn random_key_pair() -> ecdsa::Pair {
    key_pair_from_string(random_alnum_string(12))
}

pub fn address_of(key_pair: &ecdsa::Pair) -> Address {
    Address::from_public_key(&key_pair.public())
}

pub fn random_alnum_string(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect::<String>()
}

pub fn random_amount() -> Amount {
    rand::thread_rng().gen_range(1..1_000)
}

/// Mint `amount` units of `asset_type` at `address` signed by `creator`.
///
/// Returns the index of the new output.
pub async fn mint(
    client: &Client,
    creator: &ecdsa::Pair,
    address: Address,
    amount: Amount,
    asset_type: &str,
) -> OutputIndex {
    let counter = client.counter(&address).await.unwrap();
    let message = MintDraft {
        address,
        amount,
        asset_type: asset_type.to_string(),
        data: random_alnum_string(8),
    }
    .sign(creator, &counter);
    submit_ok(client, message).await.result.unwrap()
}

/// Create a random identity and mint `amount` units of `asset_type` to its address.
///
/// The identity is also the creator of the output.
pub async fn random_popcode_with(
    client: &Client,
    amount: Amount,
    asset_type: &str,
) -> (ecdsa::Pair, Address, OutputIndex) {
    let identity = random_key_pair();
    let address = address_of(&identity);
    let output = mint(client, &identity, address, amount, asset_type).await;
    (identity, address, output)
}

/// Transfer an output of the popcode controlled by `identity` to `new_owners`.
pub async fn transfer(
    client: &Client,
    identity: &ecdsa::Pair,
    prev_owners: &[Option<&ecdsa::Pair>],
    output: OutputIndex,
    new_owners: &[&ecdsa::Pair],
    threshold: u32,
) -> TransactionApplied<message::Transfer> {
    let address = address_of(identity);
    let counter = client.counter(&address).await.unwrap();
    let message = TransferDraft {
        address,
        output,
        new_owners: new_owners.iter().map(|owner| owner.public()).collect(),
        threshold,
        data: random_alnum_string(8),
    }
    .sign(identity, prev_owners, &counter);
    submit(client, message).await
}

/// Register a recipe signed by `creator`.
pub async fn register_recipe(
    client: &Client,
    creator: &ecdsa::Pair,
    name: &str,
    created_type: &str,
    ingredients: Vec<Ingredient>,
) -> TransactionApplied<message::RegisterRecipe> {
    let message = RecipeDraft {
        name: name.to_string(),
        created_type: created_type.to_string(),
        ingredients,
    }
    .sign(creator);
    submit(client, message).await
}

pub fn ingredient(numerator: u32, denominator: u32, asset_type: &str) -> Ingredient {
    Ingredient {
        numerator,
        denominator,
        asset_type: asset_type.to_string(),
    }
}

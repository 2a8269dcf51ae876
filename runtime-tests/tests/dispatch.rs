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

//! Test the string based front-end with hex encoded payloads and JSON results.

use popcodes_client::draft::{MintDraft, RecipeDraft};
use popcodes_runtime::dispatch::{self, encode_payload, Receipt};
use popcodes_runtime::query::{BalanceView, RecipeView};
use popcodes_client::H256;
use popcodes_runtime::{Counter, Error, MemoryStorage, PopcodesError};
use popcodes_test_utils::*;

const FIXTURE_ADDRESS: &str = "74ded2036e988fc56e3cff77a40c58239591e921";
const FIXTURE_COUNTER: &str = "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43";

fn initialized() -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    dispatch::init(&mut storage, &["Hello World".to_string()]).unwrap();
    storage
}

fn counter(hex_str: &str) -> Counter {
    H256::from_slice(&hex::decode(hex_str).unwrap())
}

fn balance(storage: &MemoryStorage, address: &str) -> BalanceView {
    let json = dispatch::query(storage, "balance", &[address.to_string()]).unwrap();
    serde_json::from_slice(&json).unwrap()
}

#[test]
fn create_and_query_balance() {
    let mut storage = initialized();
    let creator = fixture_key_pair();
    let address = address_of(&creator);
    assert_eq!(address.to_string(), FIXTURE_ADDRESS);

    let opening = balance(&storage, FIXTURE_ADDRESS);
    assert!(opening.outputs.is_empty());

    let message = MintDraft {
        address,
        amount: 10,
        asset_type: "Test Asset".to_string(),
        data: "Test Data".to_string(),
    }
    .sign(&creator, &counter(&opening.counter));
    let receipt = dispatch::invoke(&mut storage, "create", &[encode_payload(&message)]).unwrap();
    let receipt: Receipt = serde_json::from_slice(&receipt).unwrap();
    assert_eq!(receipt.events, 1);

    let json = dispatch::query(&storage, "balance", &[FIXTURE_ADDRESS.to_string()]).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["Address"], FIXTURE_ADDRESS);
    assert_eq!(
        value["Counter"],
        "e91d1eab53d597e8e18bb9ebbbaec66d08187d7e14a4a58c8782610ce7c7a74b"
    );
    let output = &value["Outputs"][0];
    assert_eq!(output["Amount"], 10);
    assert_eq!(output["Type"], "Test Asset");
    assert_eq!(output["Data"], "Test Data");
    assert_eq!(output["Owners"], serde_json::json!([]));
    assert_eq!(output["PrevCounter"], opening.counter);
}

#[test]
fn register_and_query_recipe() {
    let mut storage = initialized();
    let message = RecipeDraft {
        name: "test recipe".to_string(),
        created_type: "water vapor".to_string(),
        ingredients: vec![ingredient(1, 1, "Test Asset")],
    }
    .sign(&fixture_key_pair());
    dispatch::invoke(&mut storage, "recipe", &[encode_payload(&message)]).unwrap();

    let json = dispatch::query(&storage, "recipe", &["test recipe".to_string()]).unwrap();
    let recipe: RecipeView = serde_json::from_slice(&json).unwrap();
    assert_eq!(recipe.created_type, "water vapor");
    assert_eq!(recipe.ingredients[0].asset_type, "Test Asset");
    assert_eq!(recipe.ingredients[0].numerator, 1);

    match dispatch::query(&storage, "recipe", &["missing".to_string()]) {
        Err(Error::Rejected(PopcodesError::UnknownRecipe)) => (),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn rejected_invoke_leaves_storage_unchanged() {
    let mut storage = initialized();
    let before = storage.clone();
    let creator = fixture_key_pair();
    let message = MintDraft {
        address: address_of(&random_key_pair()),
        amount: 10,
        asset_type: "Test Asset".to_string(),
        data: String::new(),
    }
    .sign(&creator, &counter(FIXTURE_COUNTER));

    match dispatch::invoke(&mut storage, "create", &[encode_payload(&message)]) {
        Err(Error::Rejected(PopcodesError::InvalidSignature)) => (),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(storage, before);
}

#[test]
fn malformed_requests() {
    let mut storage = initialized();
    let cases: Vec<(&str, Vec<String>)> = vec![
        ("create", vec![]),
        ("create", vec!["not hex".to_string()]),
        ("transfer", vec!["00".to_string()]),
    ];
    for (function, args) in cases {
        match dispatch::invoke(&mut storage, function, &args) {
            Err(Error::Rejected(PopcodesError::MalformedArgs)) => (),
            other => panic!("unexpected result for {}: {:?}", function, other),
        }
    }

    match dispatch::invoke(&mut storage, "burn", &[]) {
        Err(Error::UnknownFunction(function)) => assert_eq!(function, "burn"),
        other => panic!("unexpected result {:?}", other),
    }
    match dispatch::query(&storage, "balance", &["zz".to_string()]) {
        Err(Error::Rejected(PopcodesError::MalformedArgs)) => (),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn uninitialized_and_reinitialized() {
    let mut storage = MemoryStorage::new();
    match dispatch::query(&storage, "balance", &[FIXTURE_ADDRESS.to_string()]) {
        Err(Error::Rejected(PopcodesError::Uninitialized)) => (),
        other => panic!("unexpected result {:?}", other),
    }

    dispatch::init(&mut storage, &["Hello World".to_string()]).unwrap();
    let view = balance(&storage, FIXTURE_ADDRESS);
    assert_eq!(view.counter, FIXTURE_COUNTER);

    match dispatch::init(&mut storage, &["Hello World".to_string()]) {
        Err(Error::AlreadyInitialized) => (),
        other => panic!("unexpected result {:?}", other),
    }
}

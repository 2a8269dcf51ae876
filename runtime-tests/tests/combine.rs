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

//! Test recipe registration and the Combine transaction through the emulator client.

use popcodes_client::draft::CombineDraft;
use popcodes_client::message::CombineSource;
use popcodes_client::*;
use popcodes_test_utils::*;

async fn combine(
    client: &Client,
    identity: &ecdsa::Pair,
    creator: &ecdsa::Pair,
    owners: &[&ecdsa::Pair],
    sources: Vec<(OutputIndex, Amount)>,
    amount: Amount,
    recipe: &str,
) -> TransactionApplied<message::Combine> {
    let address = address_of(identity);
    let counter = client.counter(&address).await.unwrap();
    let message = CombineDraft {
        address,
        sources: sources
            .into_iter()
            .map(|(output, amount)| CombineSource { output, amount })
            .collect(),
        amount,
        recipe: recipe.to_string(),
        data: "test data".into(),
    }
    .sign(identity, creator, owners, &counter);
    submit(client, message).await
}

/// Register a water recipe: two hydrogen and one oxygen per unit of water.
async fn water_recipe(client: &Client) -> String {
    let name = format!("water {}", random_alnum_string(6));
    let tx_applied = register_recipe(
        client,
        &random_key_pair(),
        &name,
        "Water",
        vec![ingredient(2, 1, "Hydrogen"), ingredient(1, 1, "Oxygen")],
    )
    .await;
    assert_eq!(tx_applied.result, Ok(()));
    name
}

/// Combine with a single ingredient recipe consuming the whole output.
#[async_std::test]
async fn combine_single_ingredient() {
    let client = Client::new_emulator().unwrap();
    let tx_applied = register_recipe(
        &client,
        &fixture_key_pair(),
        "test recipe",
        "water vapor",
        vec![ingredient(1, 1, "Test Asset")],
    )
    .await;
    assert_eq!(tx_applied.result, Ok(()));

    let (identity, address, output) = random_popcode_with(&client, 10, "Test Asset").await;
    let creator = random_key_pair();
    let before = client.balance(&address).await.unwrap();

    let tx_applied = combine(
        &client,
        &identity,
        &creator,
        &[],
        vec![(output, 10)],
        10,
        "test recipe",
    )
    .await;
    assert_eq!(tx_applied.result, Ok(1));

    let after = client.balance(&address).await.unwrap();
    assert!(after.outputs[0].is_spent());
    let combined = &after.outputs[1];
    assert_eq!(combined.amount, 10);
    assert_eq!(combined.asset_type, "water vapor");
    assert_eq!(combined.recipe, Some("test recipe".to_string()));
    assert_eq!(combined.creator, creator.public());
    assert_eq!(combined.prev_counter, before.counter);
    assert_eq!(after.counter, H256(sha2_256(before.counter.as_bytes())));
}

/// Sources are consumed partially and in recipe proportions.
#[async_std::test]
async fn combine_partial_consumption() {
    let client = Client::new_emulator().unwrap();
    let recipe = water_recipe(&client).await;
    let identity = random_key_pair();
    let address = address_of(&identity);
    let hydrogen = mint(&client, &identity, address, 50, "Hydrogen").await;
    let oxygen = mint(&client, &identity, address, 50, "Oxygen").await;

    let tx_applied = combine(
        &client,
        &identity,
        &identity,
        &[],
        vec![(hydrogen, 4), (oxygen, 2)],
        2,
        &recipe,
    )
    .await;
    assert_eq!(tx_applied.result, Ok(2));

    let account = client.balance(&address).await.unwrap();
    assert_eq!(account.balance_of("Hydrogen"), 46);
    assert_eq!(account.balance_of("Oxygen"), 48);
    assert_eq!(account.balance_of("Water"), 2);
}

#[async_std::test]
async fn combine_wrong_ratio() {
    let client = Client::new_emulator().unwrap();
    let recipe = water_recipe(&client).await;
    let identity = random_key_pair();
    let address = address_of(&identity);
    let hydrogen = mint(&client, &identity, address, 50, "Hydrogen").await;
    let oxygen = mint(&client, &identity, address, 50, "Oxygen").await;
    let gold = mint(&client, &identity, address, 50, "Gold").await;
    let before = client.balance(&address).await.unwrap();

    let cases = vec![
        // Too much hydrogen.
        (vec![(hydrogen, 5), (oxygen, 2)], 2),
        // Missing oxygen.
        (vec![(hydrogen, 4)], 2),
        // Gold is not an ingredient.
        (vec![(hydrogen, 4), (oxygen, 2), (gold, 1)], 2),
        // More than the output holds.
        (vec![(hydrogen, 100), (oxygen, 50)], 50),
    ];
    for (sources, amount) in cases {
        let tx_applied =
            combine(&client, &identity, &identity, &[], sources, amount, &recipe).await;
        assert_eq!(tx_applied.result, Err(PopcodesError::ConservationViolation));
    }
    assert_eq!(client.balance(&address).await.unwrap(), before);
}

#[async_std::test]
async fn combine_unknown_recipe() {
    let client = Client::new_emulator().unwrap();
    let (identity, _, output) = random_popcode_with(&client, 10, "Gold").await;

    let tx_applied = combine(
        &client,
        &identity,
        &identity,
        &[],
        vec![(output, 10)],
        10,
        "no such recipe",
    )
    .await;
    assert_eq!(tx_applied.result, Err(PopcodesError::UnknownRecipe));
}

#[async_std::test]
async fn combine_malformed_sources() {
    let client = Client::new_emulator().unwrap();
    let recipe = water_recipe(&client).await;
    let identity = random_key_pair();
    let address = address_of(&identity);
    let hydrogen = mint(&client, &identity, address, 50, "Hydrogen").await;

    let cases = vec![
        (vec![], 1),
        (vec![(hydrogen, 2), (hydrogen, 2)], 2),
        (vec![(hydrogen, 0)], 1),
        (vec![(hydrogen, 2)], 0),
    ];
    for (sources, amount) in cases {
        let tx_applied =
            combine(&client, &identity, &identity, &[], sources, amount, &recipe).await;
        assert_eq!(tx_applied.result, Err(PopcodesError::MalformedArgs));
    }
}

/// Owned sources need their owners to sign.
#[async_std::test]
async fn combine_owned_sources() {
    let client = Client::new_emulator().unwrap();
    let recipe = water_recipe(&client).await;
    let identity = random_key_pair();
    let address = address_of(&identity);
    let owner = random_key_pair();
    let hydrogen = mint(&client, &identity, address, 2, "Hydrogen").await;
    let oxygen = mint(&client, &identity, address, 1, "Oxygen").await;
    transfer(&client, &identity, &[], hydrogen, &[&owner], 1).await;

    let sources = vec![(hydrogen, 2), (oxygen, 1)];
    let tx_applied = combine(
        &client,
        &identity,
        &identity,
        &[],
        sources.clone(),
        1,
        &recipe,
    )
    .await;
    assert_eq!(tx_applied.result, Err(PopcodesError::ThresholdNotMet));

    let tx_applied = combine(&client, &identity, &identity, &[&owner], sources, 1, &recipe).await;
    assert_eq!(tx_applied.result, Ok(2));
}

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

//! Test the Mint transaction through the emulator client.

use popcodes_client::draft::MintDraft;
use popcodes_client::*;
use popcodes_test_utils::*;

/// Mint to the fixture address and check the output and counter.
#[async_std::test]
async fn mint_fixture() {
    let client = Client::new_emulator().unwrap();
    let key_pair = fixture_key_pair();
    let address: Address = "74ded2036e988fc56e3cff77a40c58239591e921".parse().unwrap();
    assert_eq!(address_of(&key_pair), address);

    let counter = client.counter(&address).await.unwrap();
    assert_eq!(
        hex::encode(counter.as_bytes()),
        "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43"
    );

    let message = MintDraft {
        address,
        amount: 10,
        asset_type: "Test Asset".into(),
        data: "Test Data".into(),
    }
    .sign(&key_pair, &counter);
    let tx_applied = submit_ok(&client, message).await;
    assert_eq!(tx_applied.result, Ok(0));

    let account = client.get_account(&address).await.unwrap().unwrap();
    assert_eq!(account.outputs.len(), 1);
    let output = &account.outputs[0];
    assert_eq!(output.amount, 10);
    assert_eq!(output.asset_type, "Test Asset");
    assert_eq!(output.data, "Test Data");
    assert!(output.owners.is_empty());
    assert_eq!(output.threshold, 0);
    assert_eq!(output.recipe, None);
    assert_eq!(output.creator, key_pair.public());
    assert_eq!(output.prev_counter, counter);
    assert_eq!(account.counter, H256(sha2_256(counter.as_bytes())));
    assert_eq!(
        hex::encode(account.counter.as_bytes()),
        "e91d1eab53d597e8e18bb9ebbbaec66d08187d7e14a4a58c8782610ce7c7a74b"
    );

    assert_eq!(
        tx_applied.events,
        vec![Event::Minted {
            address,
            output: 0,
            counter: account.counter,
        }]
    );
}

/// Any key can mint to an address it does not control.
#[async_std::test]
async fn mint_by_foreign_creator() {
    let client = Client::new_emulator().unwrap();
    let creator = random_key_pair();
    let popcode = random_key_pair();
    let address = address_of(&popcode);

    let first = mint(&client, &creator, address, 5, "Gold").await;
    let second = mint(&client, &creator, address, 7, "Gold").await;
    assert_eq!((first, second), (0, 1));

    let account = client.balance(&address).await.unwrap();
    assert_eq!(account.balance_of("Gold"), 12);
    assert!(account
        .outputs
        .iter()
        .all(|output| output.creator == creator.public()));
}

#[async_std::test]
async fn mint_zero_amount() {
    let client = Client::new_emulator().unwrap();
    let creator = random_key_pair();
    let address = address_of(&creator);
    let counter = client.counter(&address).await.unwrap();

    let message = MintDraft {
        address,
        amount: 0,
        asset_type: "Gold".into(),
        data: String::new(),
    }
    .sign(&creator, &counter);
    assert_eq!(
        submit_err(&client, message).await,
        PopcodesError::MalformedArgs
    );
    assert_eq!(client.get_account(&address).await.unwrap(), None);
}

/// A mint signed over a different address is rejected.
#[async_std::test]
async fn mint_signature_must_cover_address() {
    let client = Client::new_emulator().unwrap();
    let creator = random_key_pair();
    let address = address_of(&creator);
    let counter = client.counter(&address).await.unwrap();

    let mut message = MintDraft {
        address,
        amount: 3,
        asset_type: "Gold".into(),
        data: String::new(),
    }
    .sign(&creator, &counter);
    message.address = address_of(&random_key_pair());

    assert_eq!(
        submit_err(&client, message).await,
        PopcodesError::InvalidSignature
    );
}

#[async_std::test]
async fn uninitialized_ledger() {
    let client = Client::new(Emulator::from_storage(MemoryStorage::new()));
    let creator = random_key_pair();
    let message = MintDraft {
        address: address_of(&creator),
        amount: 3,
        asset_type: "Gold".into(),
        data: String::new(),
    }
    .sign(&creator, &H256::zero());

    assert_eq!(
        submit_err(&client, message).await,
        PopcodesError::Uninitialized
    );
    assert_eq!(client.counter_seed().await.unwrap(), None);
}

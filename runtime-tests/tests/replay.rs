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

//! Test that signed transactions cannot be replayed.

use popcodes_client::draft::MintDraft;
use popcodes_client::*;
use popcodes_test_utils::*;

fn signed_mint(identity: &ecdsa::Pair, counter: &Counter) -> message::Mint {
    MintDraft {
        address: address_of(identity),
        amount: 10,
        asset_type: "Test Asset".to_string(),
        data: "replay".to_string(),
    }
    .sign(identity, counter)
}

#[async_std::test]
async fn replay_mint() {
    let client = Client::new_emulator().unwrap();
    let identity = random_key_pair();
    let address = address_of(&identity);
    let counter = client.counter(&address).await.unwrap();
    let message = signed_mint(&identity, &counter);

    submit_ok(&client, message.clone()).await;
    let state = client.balance(&address).await.unwrap();

    let error = submit_err(&client, message).await;
    assert_eq!(error, PopcodesError::CounterStale);
    assert_eq!(client.balance(&address).await.unwrap(), state);
}

#[async_std::test]
async fn replay_transfer() {
    let client = Client::new_emulator().unwrap();
    let (identity, address, output) = random_popcode_with(&client, 10, "Test Asset").await;
    let counter = client.counter(&address).await.unwrap();
    let message = draft::TransferDraft {
        address,
        output,
        new_owners: vec![random_key_pair().public()],
        threshold: 1,
        data: String::new(),
    }
    .sign(&identity, &[], &counter);

    submit_ok(&client, message.clone()).await;

    let error = submit_err(&client, message).await;
    assert_eq!(error, PopcodesError::CounterStale);
}

/// An opening counter from before a seed rotation is no longer accepted.
#[async_std::test]
async fn stale_opening_counter() {
    let genesis = GenesisConfig::new(DEV_SEED_PHRASE).with_params(LedgerParams {
        rotation_threshold: 1,
        cache_capacity: 10,
    });
    let client = Client::new(Emulator::with_genesis(&genesis).unwrap());
    let identity = random_key_pair();
    let address = address_of(&identity);
    let stale = client.counter(&address).await.unwrap();

    for _ in 0..2 {
        random_popcode_with(&client, 1, "Test Asset").await;
    }

    let error = submit_err(&client, signed_mint(&identity, &stale)).await;
    assert_eq!(error, PopcodesError::InvalidSignature);
    assert_eq!(client.get_account(&address).await.unwrap(), None);
}

/// Once the cache is cleared a replay is reported as an invalid signature.
#[async_std::test]
async fn replay_after_cache_cleared() {
    let genesis = GenesisConfig::new(DEV_SEED_PHRASE).with_params(LedgerParams {
        rotation_threshold: 1,
        cache_capacity: 3,
    });
    let client = Client::new(Emulator::with_genesis(&genesis).unwrap());
    let identity = random_key_pair();
    let address = address_of(&identity);
    let counter = client.counter(&address).await.unwrap();
    let message = signed_mint(&identity, &counter);
    submit_ok(&client, message.clone()).await;

    for _ in 0..2 {
        random_popcode_with(&client, 1, "Test Asset").await;
    }
    assert!(client.tx_cache().await.unwrap().is_empty());

    let error = submit_err(&client, message).await;
    assert_eq!(error, PopcodesError::InvalidSignature);
}

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

//! Getting started with the client by minting and transferring a popcode output.
//!
//! Alice mints an output at her popcode and hands it over to Bob. The ledger runs in memory.

use popcodes_client::draft::{MintDraft, TransferDraft};
use popcodes_client::*;

#[async_std::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    // Key pairs are derived from seed strings. Alice controls the popcode at her address.
    let alice = ecdsa::Pair::from_string("//Alice", None).map_err(|e| format!("{:?}", e))?;
    let address = Address::from_public_key(&alice.public());
    println!("Popcode of //Alice: {}", address);

    // Bob only needs to share his public key.
    let bob_public = ecdsa::Pair::from_string("//Bob", None)
        .map_err(|e| format!("{:?}", e))?
        .public();
    println!("New owner: //Bob ({})", public_key_hex(&bob_public));

    let client = Client::new_emulator()?;

    // Every signature covers the current counter of the popcode.
    let counter = client.counter(&address).await?;
    println!("Counter before mint: {}", counter_hex(&counter));
    let mint = MintDraft {
        address,
        amount: 100,
        asset_type: "Coffee".to_string(),
        data: "harvest 2019".to_string(),
    }
    .sign(&alice, &counter);

    // Submitting returns a future that resolves when the transaction was applied.
    let mint_applied = client.submit_message(mint).await?.await?;
    let output = match mint_applied.result {
        Ok(output) => output,
        Err(err) => {
            println!("Failed to mint: {}", err);
            return Ok(());
        }
    };
    println!("Minted output {}", output);

    let counter = client.counter(&address).await?;
    let transfer = TransferDraft {
        address,
        output,
        new_owners: vec![bob_public],
        threshold: 1,
        data: "sold to Bob".to_string(),
    }
    .sign(&alice, &[], &counter);
    let transfer_applied = client.submit_message(transfer).await?.await?;
    match transfer_applied.result {
        Ok(()) => println!("Output successfully transferred!"),
        Err(err) => println!("Failed to transfer output: {}", err),
    }

    let account = client.balance(&address).await?;
    println!("Counter after transfer: {}", counter_hex(&account.counter));
    println!("Coffee at the popcode: {}", account.balance_of("Coffee"));

    Ok(())
}

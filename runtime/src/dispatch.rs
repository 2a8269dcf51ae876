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

//! String based front-end of the ledger.
//!
//! The host delivers a function name and a list of string arguments. Transaction payloads are
//! hex encoded SCALE messages. Query results and transaction receipts are JSON documents.
//!
//! | Entry point | Functions                                            |
//! |-------------|------------------------------------------------------|
//! | [init]      | (seed phrase)                                        |
//! | [invoke]    | `create`, `transfer`, `unitize`, `combine`, `recipe` |
//! | [query]     | `balance`, `recipe`                                  |

use parity_scale_codec::{Decode, DecodeAll};
use serde::{Deserialize, Serialize};

use popcodes_core::{counter_hex, message, Address, PopcodesError};

use crate::call::Call;
use crate::error::Error;
use crate::executor::apply;
use crate::genesis::GenesisConfig;
use crate::query;
use crate::store::Storage;

/// Result document of a successful [invoke].
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Receipt {
    pub tx_hash: String,
    /// Number of events the transaction emitted.
    pub events: usize,
}

/// Initialize the ledger with the seed phrase in `args[0]`.
pub fn init<S: Storage>(storage: &mut S, args: &[String]) -> Result<Vec<u8>, Error> {
    let seed_phrase = args.first().ok_or(PopcodesError::MalformedArgs)?;
    GenesisConfig::new(seed_phrase.as_str()).build(storage)?;
    Ok(Vec::new())
}

pub fn invoke<S: Storage>(
    storage: &mut S,
    function: &str,
    args: &[String],
) -> Result<Vec<u8>, Error> {
    let call: Call = match function {
        "create" => decode_payload::<message::Mint>(args)?.into(),
        "transfer" => decode_payload::<message::Transfer>(args)?.into(),
        "unitize" => decode_payload::<message::Unitize>(args)?.into(),
        "combine" => decode_payload::<message::Combine>(args)?.into(),
        "recipe" => decode_payload::<message::RegisterRecipe>(args)?.into(),
        _ => return Err(Error::UnknownFunction(function.to_string())),
    };
    let tx_hash = call.hash();
    let events = apply(storage, call)?;

    let receipt = Receipt {
        tx_hash: counter_hex(&tx_hash),
        events: events.len(),
    };
    Ok(serde_json::to_vec(&receipt)?)
}

pub fn query<S: Storage>(storage: &S, function: &str, args: &[String]) -> Result<Vec<u8>, Error> {
    let arg = args.first().ok_or(PopcodesError::MalformedArgs)?;
    match function {
        "balance" => {
            let address: Address = arg.parse().map_err(|_| PopcodesError::MalformedArgs)?;
            Ok(serde_json::to_vec(&query::balance(storage, &address)?)?)
        }
        "recipe" => {
            let recipe = query::recipe(storage, arg)?.ok_or(PopcodesError::UnknownRecipe)?;
            Ok(serde_json::to_vec(&recipe)?)
        }
        _ => Err(Error::UnknownFunction(function.to_string())),
    }
}

/// Hex encode the SCALE encoding of a message for [invoke].
pub fn encode_payload<T: parity_scale_codec::Encode>(message: &T) -> String {
    hex::encode(message.encode())
}

fn decode_payload<T: Decode>(args: &[String]) -> Result<T, PopcodesError> {
    let payload = args.first().ok_or(PopcodesError::MalformedArgs)?;
    let bytes = hex::decode(payload).map_err(|_| PopcodesError::MalformedArgs)?;
    T::decode_all(&mut bytes.as_slice()).map_err(|_| PopcodesError::MalformedArgs)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::MemoryStorage;

    fn initialized() -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        init(&mut storage, &["Hello World".to_string()]).unwrap();
        storage
    }

    #[test]
    fn init_requires_seed_phrase() {
        let mut storage = MemoryStorage::new();
        match init(&mut storage, &[]) {
            Err(Error::Rejected(PopcodesError::MalformedArgs)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_functions() {
        let mut storage = initialized();
        match invoke(&mut storage, "burn", &["00".to_string()]) {
            Err(Error::UnknownFunction(name)) => assert_eq!(name, "burn"),
            other => panic!("unexpected {:?}", other),
        }
        match query(&storage, "supply", &["00".to_string()]) {
            Err(Error::UnknownFunction(name)) => assert_eq!(name, "supply"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn garbage_payload_is_malformed() {
        let mut storage = initialized();
        for payload in &["not hex", "00", ""] {
            match invoke(&mut storage, "create", &[payload.to_string()]) {
                Err(Error::Rejected(PopcodesError::MalformedArgs)) => (),
                other => panic!("unexpected {:?} for {:?}", other, payload),
            }
        }
    }

    #[test]
    fn balance_query() {
        let storage = initialized();
        let json = query(
            &storage,
            "balance",
            &["74ded2036e988fc56e3cff77a40c58239591e921".to_string()],
        )
        .unwrap();
        let view: query::BalanceView = serde_json::from_slice(&json).unwrap();
        assert_eq!(
            view.counter,
            "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43"
        );

        match query(&storage, "balance", &["xyz".to_string()]) {
            Err(Error::Rejected(PopcodesError::MalformedArgs)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_recipe_query() {
        let storage = initialized();
        match query(&storage, "recipe", &["water".to_string()]) {
            Err(Error::Rejected(PopcodesError::UnknownRecipe)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}

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

//! Canonical messages signed for each transaction kind.
//!
//! The field order and the `:` separators are part of the authorization contract. Clients and
//! the runtime must build byte-identical strings, otherwise signatures do not verify.
//!
//! Counters are rendered as lowercase hex of the raw digest, public keys as lowercase hex of the
//! compressed point and integers in base 10.

use crate::message::CombineSource;
use crate::state::Ingredient;
use crate::{counter_hex, public_key_hex, Address, Amount, Counter, OutputIndex, PublicKey};

const SEPARATOR: char = ':';

struct Builder(String);

impl Builder {
    fn new(first: impl AsRef<str>) -> Self {
        Builder(first.as_ref().to_string())
    }

    fn field(mut self, value: impl AsRef<str>) -> Self {
        self.0.push(SEPARATOR);
        self.0.push_str(value.as_ref());
        self
    }

    fn build(self) -> String {
        self.0
    }
}

/// `counter:address:amount:type:data`
pub fn mint(
    counter: &Counter,
    address: &Address,
    amount: Amount,
    asset_type: &str,
    data: &str,
) -> String {
    Builder::new(counter_hex(counter))
        .field(address.to_string())
        .field(amount.to_string())
        .field(asset_type)
        .field(data)
        .build()
}

/// `counter:output[:threshold]:data:owner1:owner2:...`
///
/// The threshold is only present when it is greater than zero.
pub fn transfer(
    counter: &Counter,
    output: OutputIndex,
    threshold: u32,
    data: &str,
    new_owners: &[PublicKey],
) -> String {
    let mut builder = Builder::new(counter_hex(counter)).field(output.to_string());
    if threshold > 0 {
        builder = builder.field(threshold.to_string());
    }
    builder = builder.field(data);
    new_owners
        .iter()
        .fold(builder, |builder, owner| builder.field(public_key_hex(owner)))
        .build()
}

/// `counter:destination:data:source_output:amount1:amount2:...`
pub fn unitize(
    counter: &Counter,
    destination: &Address,
    data: &str,
    source_output: OutputIndex,
    dest_amounts: &[Amount],
) -> String {
    let builder = Builder::new(counter_hex(counter))
        .field(destination.to_string())
        .field(data)
        .field(source_output.to_string());
    dest_amounts
        .iter()
        .fold(builder, |builder, amount| builder.field(amount.to_string()))
        .build()
}

/// `counter:recipe(:source_output:source_amount)*:amount:data`
pub fn combine(
    counter: &Counter,
    recipe: &str,
    sources: &[CombineSource],
    amount: Amount,
    data: &str,
) -> String {
    let builder = Builder::new(counter_hex(counter)).field(recipe);
    sources
        .iter()
        .fold(builder, |builder, source| {
            builder
                .field(source.output.to_string())
                .field(source.amount.to_string())
        })
        .field(amount.to_string())
        .field(data)
        .build()
}

/// `name:created_type(:numerator:denominator:type)*`
///
/// Recipes are global and carry no counter.
pub fn recipe(name: &str, created_type: &str, ingredients: &[Ingredient]) -> String {
    let builder = Builder::new(name).field(created_type);
    ingredients
        .iter()
        .fold(builder, |builder, ingredient| {
            builder
                .field(ingredient.numerator.to_string())
                .field(ingredient.denominator.to_string())
                .field(&ingredient.asset_type)
        })
        .build()
}

#[cfg(test)]
mod test {
    use super::*;
    use core::convert::TryFrom;

    fn counter() -> Counter {
        let bytes =
            hex::decode("af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43")
                .unwrap();
        Counter::from_slice(&bytes)
    }

    fn owner() -> PublicKey {
        let bytes =
            hex::decode("0278b76afbefb1e1185bc63ed1a17dd88634e0587491f03e9a8d2d25d9ab289ee7")
                .unwrap();
        PublicKey::try_from(bytes.as_slice()).unwrap()
    }

    fn address() -> Address {
        "74ded2036e988fc56e3cff77a40c58239591e921".parse().unwrap()
    }

    #[test]
    fn mint_message() {
        assert_eq!(
            mint(&counter(), &address(), 10, "Test Asset", "Test Data"),
            "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43:\
             74ded2036e988fc56e3cff77a40c58239591e921:10:Test Asset:Test Data"
        );
    }

    #[test]
    fn transfer_message_omits_zero_threshold() {
        assert_eq!(
            transfer(&counter(), 1, 0, "Test possess", &[owner()]),
            "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43:1:Test possess:\
             0278b76afbefb1e1185bc63ed1a17dd88634e0587491f03e9a8d2d25d9ab289ee7"
        );
    }

    #[test]
    fn transfer_message_with_threshold() {
        let message = transfer(&counter(), 0, 2, "data", &[owner(), owner()]);
        let fields: Vec<&str> = message.split(':').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[1], "0");
        assert_eq!(fields[2], "2");
        assert_eq!(fields[3], "data");
    }

    #[test]
    fn transfer_message_without_owners() {
        let message = transfer(&counter(), 3, 0, "data", &[]);
        assert!(message.ends_with(":3:data"));
    }

    #[test]
    fn unitize_message() {
        let destination: Address = "10734390011641497f489cb475743b8e50d429bb".parse().unwrap();
        assert_eq!(
            unitize(&counter(), &destination, "Test Unitize", 0, &[50, 50]),
            "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43:\
             10734390011641497f489cb475743b8e50d429bb:Test Unitize:0:50:50"
        );
    }

    #[test]
    fn combine_message() {
        let sources = vec![
            CombineSource {
                output: 0,
                amount: 10,
            },
            CombineSource {
                output: 2,
                amount: 4,
            },
        ];
        assert_eq!(
            combine(&counter(), "test recipe", &sources, 7, "test data"),
            "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43:\
             test recipe:0:10:2:4:7:test data"
        );
    }

    #[test]
    fn recipe_message() {
        let ingredients = vec![
            Ingredient {
                numerator: 1,
                denominator: 2,
                asset_type: "Hydrogen".into(),
            },
            Ingredient {
                numerator: 1,
                denominator: 2,
                asset_type: "Oxygen".into(),
            },
        ];
        assert_eq!(
            recipe("water recipe", "Water", &ingredients),
            "water recipe:Water:1:2:Hydrogen:1:2:Oxygen"
        );
    }
}

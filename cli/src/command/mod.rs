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

use crate::{lookup_key_pair, CommandError, CommandT, LedgerOptions};
use popcodes_client::message::CombineSource;
use popcodes_client::*;

use structopt::StructOpt;

pub mod key_pair;
pub mod other;
pub mod recipe;

fn parse_public_key(data: &str) -> Result<PublicKey, String> {
    let bytes = hex::decode(data).map_err(|err| format!("{}", err))?;
    PublicKey::try_from(bytes.as_slice())
        .map_err(|_| format!("expected a 33 byte compressed public key, got {} bytes", bytes.len()))
}

/// Parse `<output>:<amount>`.
fn parse_combine_source(data: &str) -> Result<CombineSource, String> {
    let (output, amount) = data
        .split_once(':')
        .ok_or_else(|| format!("expected <output>:<amount>, got '{}'", data))?;
    Ok(CombineSource {
        output: output.parse().map_err(|err| format!("{}", err))?,
        amount: amount.parse().map_err(|err| format!("{}", err))?,
    })
}

/// Parse `<numerator>/<denominator>:<type>`.
fn parse_ingredient(data: &str) -> Result<Ingredient, String> {
    let invalid = || format!("expected <numerator>/<denominator>:<type>, got '{}'", data);
    let (ratio, asset_type) = data.split_once(':').ok_or_else(invalid)?;
    let (numerator, denominator) = ratio.split_once('/').ok_or_else(invalid)?;
    Ok(Ingredient {
        numerator: numerator.parse().map_err(|err| format!("{}", err))?,
        denominator: denominator.parse().map_err(|err| format!("{}", err))?,
        asset_type: asset_type.to_string(),
    })
}

/// Signature slot of a previous owner. `-` marks an owner that does not sign.
#[derive(Clone)]
pub struct PrevOwner(Option<ecdsa::Pair>);

fn parse_prev_owner(name: &str) -> Result<PrevOwner, String> {
    if name == "-" {
        Ok(PrevOwner(None))
    } else {
        lookup_key_pair(name).map(|key_pair| PrevOwner(Some(key_pair)))
    }
}

async fn submit<Message_: Message>(
    client: &Client,
    message: Message_,
) -> Result<Message_::Output, CommandError> {
    let tx_applied = client.submit_message(message).await?.await?;
    log::debug!("Transaction {:?} applied", tx_applied.tx_hash);
    Ok(tx_applied.result?)
}

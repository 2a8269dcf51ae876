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

//! Define the commands supported by the CLI that act on popcodes and the ledger itself.

use super::*;
use crate::ledger_file;

#[derive(StructOpt, Clone)]
pub enum Command {
    /// Initialize an empty ledger with a counter seed phrase.
    Init(Init),
    /// Show the counter seed, the transaction cache size and the ledger parameters.
    Status(Status),
    /// Show the counter and the outputs of a popcode as JSON.
    Balance(Balance),
    /// Mint a new output at a popcode.
    Mint(Mint),
    /// Assign new owners to an output.
    Transfer(Transfer),
    /// Split an output into new outputs at a destination popcode.
    Unitize(Unitize),
    /// Consume outputs according to a recipe and create a new output.
    Combine(Combine),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Init(cmd) => cmd.run().await,
            Command::Status(cmd) => cmd.run().await,
            Command::Balance(cmd) => cmd.run().await,
            Command::Mint(cmd) => cmd.run().await,
            Command::Transfer(cmd) => cmd.run().await,
            Command::Unitize(cmd) => cmd.run().await,
            Command::Combine(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Clone)]
pub struct Init {
    /// The initial counter seed is the SHA-256 hash of this phrase.
    #[structopt(default_value = DEV_SEED_PHRASE)]
    seed_phrase: String,

    /// Number of cached transactions after which the counter seed is rotated.
    #[structopt(long)]
    rotation_threshold: Option<u32>,

    /// Number of cached transactions at which the cache is cleared.
    #[structopt(long)]
    cache_capacity: Option<u32>,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Init {
    async fn run(self) -> Result<(), CommandError> {
        let defaults = LedgerParams::default();
        let params = LedgerParams {
            rotation_threshold: self
                .rotation_threshold
                .unwrap_or(defaults.rotation_threshold),
            cache_capacity: self.cache_capacity.unwrap_or(defaults.cache_capacity),
        };
        let path = self.ledger_options.path()?;
        let mut storage = ledger_file::load(&path)?;
        let seed = GenesisConfig::new(self.seed_phrase)
            .with_params(params)
            .build(&mut storage)
            .map_err(Error::from)?;
        ledger_file::save(&path, &storage)?;
        println!("✓ Ledger initialized at {}", path.display());
        println!("ⓘ counter seed: {}", counter_hex(&seed));
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Status {
    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Status {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let seed = client
            .counter_seed()
            .await?
            .ok_or(PopcodesError::Uninitialized)?;
        let params = client.ledger_params().await?;
        println!("counter seed:       {}", counter_hex(&seed));
        println!("cached transactions: {}", client.tx_cache().await?.len());
        println!("rotation threshold: {}", params.rotation_threshold);
        println!("cache capacity:     {}", params.cache_capacity);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Balance {
    /// Popcode address as 40 hex digits.
    address: Address,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Balance {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let account = client.balance(&self.address).await?;
        let view = query::BalanceView::from(&account);
        println!("{}", serde_json::to_string_pretty(&view)?);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Mint {
    /// Popcode address that receives the output.
    address: Address,

    amount: Amount,

    /// Asset type of the output.
    asset_type: String,

    #[structopt(long, default_value = "")]
    data: String,

    /// Name of the local key pair that creates the output.
    #[structopt(long, env = "POPCODES_CREATOR", parse(try_from_str = lookup_key_pair))]
    creator: ecdsa::Pair,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Mint {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let counter = client.counter(&self.address).await?;
        let message = draft::MintDraft {
            address: self.address,
            amount: self.amount,
            asset_type: self.asset_type,
            data: self.data,
        }
        .sign(&self.creator, &counter);
        let output = submit(&client, message).await?;
        println!("✓ Minted output {} at {}", output, self.address);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Transfer {
    /// Index of the output to transfer.
    output: OutputIndex,

    /// Public key of a new owner as hex. May be repeated.
    #[structopt(long = "new-owner", parse(try_from_str = parse_public_key))]
    new_owners: Vec<PublicKey>,

    /// Number of new owners required to sign later transactions. Zero requires all of them.
    #[structopt(long, default_value = "0")]
    threshold: u32,

    #[structopt(long, default_value = "")]
    data: String,

    /// Local key pair of a current owner in owner order. Use `-` for an owner that does not sign.
    #[structopt(long = "prev-owner", parse(try_from_str = parse_prev_owner))]
    prev_owners: Vec<PrevOwner>,

    /// Name of the local key pair that controls the popcode.
    #[structopt(long, env = "POPCODES_IDENTITY", parse(try_from_str = lookup_key_pair))]
    identity: ecdsa::Pair,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Transfer {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let address = Address::from_public_key(&self.identity.public());
        let counter = client.counter(&address).await?;
        let prev_owners: Vec<Option<&ecdsa::Pair>> = self
            .prev_owners
            .iter()
            .map(|PrevOwner(key_pair)| key_pair.as_ref())
            .collect();
        let message = draft::TransferDraft {
            address,
            output: self.output,
            new_owners: self.new_owners,
            threshold: self.threshold,
            data: self.data,
        }
        .sign(&self.identity, &prev_owners, &counter);
        submit(&client, message).await?;
        println!("✓ Transferred output {} at {}", self.output, address);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Unitize {
    /// Index of the output to split.
    output: OutputIndex,

    /// Popcode address that receives the new outputs.
    destination: Address,

    /// Amounts of the new outputs. They must add up to the amount of the source output.
    #[structopt(required = true)]
    amounts: Vec<Amount>,

    #[structopt(long, default_value = "")]
    data: String,

    /// Local key pair of an owner of the source output. May be repeated.
    #[structopt(long = "owner", parse(try_from_str = lookup_key_pair))]
    owners: Vec<ecdsa::Pair>,

    /// Name of the local key pair that controls the source popcode.
    #[structopt(long, env = "POPCODES_IDENTITY", parse(try_from_str = lookup_key_pair))]
    identity: ecdsa::Pair,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Unitize {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let source_address = Address::from_public_key(&self.identity.public());
        let counter = client.counter(&source_address).await?;
        let owners: Vec<&ecdsa::Pair> = self.owners.iter().collect();
        let message = draft::UnitizeDraft {
            source_address,
            source_output: self.output,
            dest_address: self.destination,
            dest_amounts: self.amounts,
            data: self.data,
        }
        .sign(&self.identity, &owners, &counter);
        let outputs = submit(&client, message).await?;
        println!("✓ Created outputs {:?} at {}", outputs, self.destination);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Combine {
    /// Name of the recipe to apply.
    recipe: String,

    /// Amount of the created output.
    amount: Amount,

    /// Consumed output as `<output>:<amount>`. May be repeated.
    #[structopt(
        long = "source",
        required = true,
        parse(try_from_str = parse_combine_source)
    )]
    sources: Vec<CombineSource>,

    #[structopt(long, default_value = "")]
    data: String,

    /// Local key pair of an owner of the consumed outputs. May be repeated.
    #[structopt(long = "owner", parse(try_from_str = lookup_key_pair))]
    owners: Vec<ecdsa::Pair>,

    /// Name of the local key pair recorded as the creator of the new output.
    #[structopt(long, env = "POPCODES_CREATOR", parse(try_from_str = lookup_key_pair))]
    creator: ecdsa::Pair,

    /// Name of the local key pair that controls the popcode.
    #[structopt(long, env = "POPCODES_IDENTITY", parse(try_from_str = lookup_key_pair))]
    identity: ecdsa::Pair,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Combine {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let address = Address::from_public_key(&self.identity.public());
        let counter = client.counter(&address).await?;
        let owners: Vec<&ecdsa::Pair> = self.owners.iter().collect();
        let message = draft::CombineDraft {
            address,
            sources: self.sources,
            amount: self.amount,
            recipe: self.recipe,
            data: self.data,
        }
        .sign(&self.identity, &self.creator, &owners, &counter);
        let output = submit(&client, message).await?;
        println!("✓ Combined into output {} at {}", output, address);
        Ok(())
    }
}

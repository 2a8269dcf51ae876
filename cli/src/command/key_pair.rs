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

//! Define the commands supported by the CLI related to key-pairs.

use super::*;
use crate::key_pair_storage;

/// Key-pair related commands
#[derive(StructOpt, Clone)]
pub enum Command {
    /// Generate a random key-pair identified by `name` and
    /// store it on disk. Fail if there is already a key-pair
    /// with the given `name`.
    Generate(Generate),
    /// List all the local key pairs.
    List(List),
    /// Show the public key and popcode address of a local key pair.
    Show(Show),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Generate(cmd) => cmd.run().await,
            Command::List(cmd) => cmd.run().await,
            Command::Show(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Clone)]
pub struct Generate {
    /// The name that uniquely identifies the key-pair locally.
    name: String,
}

#[async_trait::async_trait]
impl CommandT for Generate {
    async fn run(self) -> Result<(), CommandError> {
        let (key_pair, seed) = ecdsa::Pair::generate();
        key_pair_storage::add(self.name, key_pair_storage::KeyPairData { seed })?;
        println!("✓ Key-pair generated successfully");
        print_key_pair(&key_pair);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct List {}

#[async_trait::async_trait]
impl CommandT for List {
    async fn run(self) -> Result<(), CommandError> {
        let key_pairs = key_pair_storage::list()?;
        println!("Key-pairs ({})\n", key_pairs.len());
        for (name, data) in key_pairs {
            println!("  '{}'", name);
            println!("  address: {}\n", Address::from_public_key(&data.key_pair().public()));
        }
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Show {
    /// The name of the local key pair.
    #[structopt(parse(try_from_str = lookup_key_pair))]
    key_pair: ecdsa::Pair,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(self) -> Result<(), CommandError> {
        print_key_pair(&self.key_pair);
        Ok(())
    }
}

fn print_key_pair(key_pair: &ecdsa::Pair) {
    let public = key_pair.public();
    println!("ⓘ public key: {}", public_key_hex(&public));
    println!("ⓘ address: {}", Address::from_public_key(&public));
}

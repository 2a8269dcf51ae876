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

//! Define the command line parser and interface.

use std::path::PathBuf;

use popcodes_client::*;
use structopt::StructOpt;
use thiserror::Error as ThisError;

pub mod key_pair_storage;
pub mod ledger_file;

mod command;
use command::{key_pair, other, recipe};

/// The type that captures the command line.
#[derive(StructOpt, Clone)]
#[structopt(max_term_width = 80)]
pub struct CommandLine {
    #[structopt(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub async fn run(self) -> Result<(), CommandError> {
        self.command.run().await
    }
}

/// Ledger-related command-line options
#[derive(StructOpt, Clone, Debug)]
pub struct LedgerOptions {
    /// File that holds the ledger state. Defaults to `ledger.json` in the CLI data directory.
    #[structopt(long, env = "POPCODES_STATE", value_name = "path")]
    pub state: Option<PathBuf>,
}

impl LedgerOptions {
    pub fn path(&self) -> Result<PathBuf, CommandError> {
        match &self.state {
            Some(path) => Ok(path.clone()),
            None => Ok(key_pair_storage::data_dir()?.join("ledger.json")),
        }
    }

    pub fn client(&self) -> Result<Client, CommandError> {
        let ledger_file = ledger_file::LedgerFile::open(self.path()?)?;
        log::debug!("Using ledger file {}", ledger_file.path().display());
        Ok(Client::new(ledger_file))
    }
}

fn lookup_key_pair(name: &str) -> Result<ecdsa::Pair, String> {
    key_pair_storage::get(name)
        .map(|data| data.key_pair())
        .map_err(|e| format!("{}", e))
}

/// The supported [CommandLine] commands.
/// The commands are grouped by domain.
#[derive(StructOpt, Clone)]
pub enum Command {
    KeyPair(key_pair::Command),
    Recipe(recipe::Command),

    #[structopt(flatten)]
    Other(other::Command),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::KeyPair(cmd) => cmd.run().await,
            Command::Recipe(cmd) => cmd.run().await,
            Command::Other(cmd) => cmd.run().await,
        }
    }
}

/// The trait that every command must implement.
#[async_trait::async_trait]
pub trait CommandT {
    async fn run(self) -> Result<(), CommandError>;
}

/// Error returned by [CommandT::run].
///
/// Implements [From] for client errors, rejected transactions and storage errors.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("client error")]
    ClientError(#[from] Error),

    #[error("transaction rejected: {0}")]
    FailedTransaction(#[from] PopcodesError),

    #[error("cannot find recipe {name}")]
    RecipeNotFound { name: String },

    #[error(transparent)]
    KeyPairStorageError(#[from] key_pair_storage::Error),

    #[error(transparent)]
    LedgerFileError(#[from] ledger_file::Error),

    #[error("failed to render output")]
    Serialization(#[from] serde_json::Error),
}

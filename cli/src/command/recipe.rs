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

//! Define the commands supported by the CLI related to recipes.

use super::*;

/// Recipe related commands
#[derive(StructOpt, Clone)]
pub enum Command {
    /// Register a new recipe. Recipe names are unique and recipes cannot be changed.
    Register(Register),
    /// Show a registered recipe as JSON.
    Show(Show),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Register(cmd) => cmd.run().await,
            Command::Show(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Clone)]
pub struct Register {
    /// Name of the recipe.
    name: String,

    /// Asset type of the outputs the recipe creates.
    created_type: String,

    /// Ingredient as `<numerator>/<denominator>:<type>`, consumed per created unit.
    #[structopt(
        long = "ingredient",
        required = true,
        parse(try_from_str = parse_ingredient)
    )]
    ingredients: Vec<Ingredient>,

    /// Name of the local key pair that signs the recipe.
    #[structopt(long, env = "POPCODES_CREATOR", parse(try_from_str = lookup_key_pair))]
    creator: ecdsa::Pair,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Register {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let message = draft::RecipeDraft {
            name: self.name.clone(),
            created_type: self.created_type,
            ingredients: self.ingredients,
        }
        .sign(&self.creator);
        submit(&client, message).await?;
        println!("✓ Recipe {} is now registered.", self.name);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
pub struct Show {
    /// Name of the recipe.
    name: String,

    #[structopt(flatten)]
    ledger_options: LedgerOptions,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.ledger_options.client()?;
        let recipe = client
            .get_recipe(&self.name)
            .await?
            .ok_or(CommandError::RecipeNotFound { name: self.name })?;
        let view = query::RecipeView::from(&recipe);
        println!("{}", serde_json::to_string_pretty(&view)?);
        Ok(())
    }
}

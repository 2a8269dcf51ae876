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

//! Transaction handlers.
//!
//! Every handler follows the same steps: authenticate the signers, validate the arguments and
//! the state, mutate the affected accounts, advance the counter and store the result. Handlers
//! run against a [LedgerContext] whose storage is an [Overlay], so a rejected transaction never
//! reaches the backing storage.

use std::collections::{BTreeMap, BTreeSet};

use popcodes_core::message::{Combine, Mint, RegisterRecipe, Transfer, Unitize};
use popcodes_core::state::{Output, PopcodeAccount, Recipe};
use popcodes_core::{crypto, Address, Amount, Counter, PopcodesError};

use crate::authorization::{
    ensure_identity, ensure_positional_threshold, ensure_threshold, verify_signer,
};
use crate::call::Call;
use crate::error::Error;
use crate::event::Event;
use crate::ledger::PopcodeLedger;
use crate::replay::{self, ReplayGuard};
use crate::store::{Overlay, Storage};

/// Apply `call` to `storage`.
///
/// All writes are staged and only committed if the transaction is accepted. On error the
/// storage is left untouched.
pub fn apply<S: Storage>(storage: &mut S, call: Call) -> Result<Vec<Event>, Error> {
    let tx_hash = call.hash();
    let function = call.function_name();
    log::debug!("Applying {} transaction {:?}", function, tx_hash);

    let result = LedgerContext::load(Overlay::new(&*storage)).and_then(|ctx| ctx.execute(call));
    match result {
        Ok((overlay, events)) => {
            storage.commit(overlay.into_changes())?;
            log::info!("Applied {} transaction {:?}", function, tx_hash);
            Ok(events)
        }
        Err(error) => {
            log::warn!("Rejected {} transaction {:?}: {}", function, tx_hash, error);
            Err(error)
        }
    }
}

/// State shared by the handlers of a single transaction.
pub struct LedgerContext<S: Storage> {
    ledger: PopcodeLedger<S>,
    guard: ReplayGuard,
    events: Vec<Event>,
    seed_rotated: bool,
}

impl<S: Storage> LedgerContext<S> {
    /// Fails with [PopcodesError::Uninitialized] if the ledger has no counter seed.
    pub fn load(storage: S) -> Result<Self, Error> {
        let ledger = PopcodeLedger::new(storage);
        let guard = ReplayGuard::load(&ledger)?;
        Ok(LedgerContext {
            ledger,
            guard,
            events: Vec::new(),
            seed_rotated: false,
        })
    }

    /// Run the handler for `call` and return the written storage with the emitted events.
    pub fn execute(mut self, call: Call) -> Result<(S, Vec<Event>), Error> {
        match call {
            Call::Mint(message) => self.mint(message)?,
            Call::Transfer(message) => self.transfer(message)?,
            Call::Unitize(message) => self.unitize(message)?,
            Call::Combine(message) => self.combine(message)?,
            Call::RegisterRecipe(message) => self.register_recipe(message)?,
        }

        self.guard.persist(&mut self.ledger)?;
        if self.seed_rotated {
            self.events.push(Event::CounterSeedRotated {
                seed: self.guard.seed(),
            });
        }
        Ok((self.ledger.into_storage(), self.events))
    }

    fn mint(&mut self, mint: Mint) -> Result<(), Error> {
        if mint.amount == 0 {
            return Err(PopcodesError::MalformedArgs.into());
        }

        let mut account = self.load_account(&mint.address)?;
        let counter = account.counter;
        verify_signer(
            &self.guard,
            &mint.address,
            &counter,
            &mint.creator,
            &mint.creator_sig,
            |counter| mint.canonical_message(counter),
        )?;
        log::debug!("Mint signature by creator of {} verified", mint.address);

        let output = account.push_output(Output {
            owners: Vec::new(),
            threshold: 0,
            amount: mint.amount,
            asset_type: mint.asset_type,
            data: mint.data,
            recipe: None,
            creator: mint.creator,
            prev_counter: counter,
        });
        let counter = self.advance_and_store(account)?;

        self.events.push(Event::Minted {
            address: mint.address,
            output,
            counter,
        });
        Ok(())
    }

    fn transfer(&mut self, transfer: Transfer) -> Result<(), Error> {
        ensure_identity(&transfer.address, &transfer.popcode_key)?;

        let distinct_owners: BTreeSet<_> = transfer.new_owners.iter().collect();
        if distinct_owners.len() != transfer.new_owners.len()
            || transfer.threshold as usize > transfer.new_owners.len()
        {
            return Err(PopcodesError::MalformedArgs.into());
        }
        let threshold = if transfer.threshold == 0 {
            transfer.new_owners.len() as u32
        } else {
            transfer.threshold
        };

        let mut account = self.load_account(&transfer.address)?;
        let counter = account.counter;
        account.output(transfer.output)?;

        verify_signer(
            &self.guard,
            &transfer.address,
            &counter,
            &transfer.popcode_key,
            &transfer.popcode_sig,
            |counter| transfer.canonical_message(counter),
        )?;
        let message = transfer.canonical_message(&counter);
        let output = account.output_mut(transfer.output)?;
        ensure_positional_threshold(output, &transfer.prev_owner_sigs, &message)?;
        log::debug!(
            "Transfer of output {} at {} authorized",
            transfer.output,
            transfer.address
        );

        output.owners = transfer.new_owners;
        output.threshold = threshold;
        output.data = transfer.data;
        output.prev_counter = counter;
        let counter = self.advance_and_store(account)?;

        self.events.push(Event::Transferred {
            address: transfer.address,
            output: transfer.output,
            counter,
        });
        Ok(())
    }

    fn unitize(&mut self, unitize: Unitize) -> Result<(), Error> {
        ensure_identity(&unitize.source_address, &unitize.popcode_key)?;
        if unitize.dest_amounts.is_empty() || unitize.dest_amounts.contains(&0) {
            return Err(PopcodesError::MalformedArgs.into());
        }

        let mut source = self.load_account(&unitize.source_address)?;
        let source_counter = source.counter;
        let source_output = source.output(unitize.source_output)?.clone();

        verify_signer(
            &self.guard,
            &unitize.source_address,
            &source_counter,
            &unitize.popcode_key,
            &unitize.popcode_sig,
            |counter| unitize.canonical_message(counter),
        )?;
        let message = unitize.canonical_message(&source_counter);
        ensure_threshold([&source_output], &unitize.owner_sigs, &message)?;

        let total = checked_sum(unitize.dest_amounts.iter().copied())?;
        if total != source_output.amount {
            return Err(PopcodesError::ConservationViolation.into());
        }
        log::debug!(
            "Unitize of output {} at {} authorized",
            unitize.source_output,
            unitize.source_address
        );

        source.output_mut(unitize.source_output)?.amount = 0;

        let mut destination = if unitize.dest_address == unitize.source_address {
            source
        } else {
            self.ledger.put_account(&source)?;
            self.load_account(&unitize.dest_address)?
        };

        let outputs: Vec<_> = unitize
            .dest_amounts
            .iter()
            .map(|amount| {
                destination.push_output(Output {
                    owners: Vec::new(),
                    threshold: 0,
                    amount: *amount,
                    asset_type: source_output.asset_type.clone(),
                    data: unitize.data.clone(),
                    recipe: source_output.recipe.clone(),
                    creator: source_output.creator.clone(),
                    prev_counter: source_counter,
                })
            })
            .collect();
        let counter = self.advance_and_store(destination)?;

        self.events.push(Event::Unitized {
            source: unitize.source_address,
            source_output: unitize.source_output,
            destination: unitize.dest_address,
            outputs,
            counter,
        });
        Ok(())
    }

    fn combine(&mut self, combine: Combine) -> Result<(), Error> {
        ensure_identity(&combine.address, &combine.popcode_key)?;

        let distinct_sources: BTreeSet<_> =
            combine.sources.iter().map(|source| source.output).collect();
        if combine.sources.is_empty()
            || combine.amount == 0
            || distinct_sources.len() != combine.sources.len()
            || combine.sources.iter().any(|source| source.amount == 0)
        {
            return Err(PopcodesError::MalformedArgs.into());
        }

        let recipe = self
            .ledger
            .get_recipe(&combine.recipe)?
            .ok_or(PopcodesError::UnknownRecipe)?;

        let mut account = self.load_account(&combine.address)?;
        let counter = account.counter;
        let sources = combine
            .sources
            .iter()
            .map(|source| account.output(source.output).cloned())
            .collect::<Result<Vec<Output>, PopcodesError>>()?;

        verify_signer(
            &self.guard,
            &combine.address,
            &counter,
            &combine.popcode_key,
            &combine.popcode_sig,
            |counter| combine.canonical_message(counter),
        )?;
        verify_signer(
            &self.guard,
            &combine.address,
            &counter,
            &combine.creator,
            &combine.creator_sig,
            |counter| combine.canonical_message(counter),
        )?;
        let message = combine.canonical_message(&counter);
        ensure_threshold(sources.iter(), &combine.owner_sigs, &message)?;

        let mut consumed: BTreeMap<&str, Amount> = BTreeMap::new();
        for (source, output) in combine.sources.iter().zip(&sources) {
            if source.amount > output.amount {
                return Err(PopcodesError::ConservationViolation.into());
            }
            let total = consumed.entry(output.asset_type.as_str()).or_insert(0);
            *total = checked_sum([*total, source.amount])?;
        }
        ensure_recipe_ratios(&recipe, &consumed, combine.amount)?;
        log::debug!(
            "Combine at {} with recipe {} authorized",
            combine.address,
            combine.recipe
        );

        for source in &combine.sources {
            account.output_mut(source.output)?.amount -= source.amount;
        }
        let output = account.push_output(Output {
            owners: Vec::new(),
            threshold: 0,
            amount: combine.amount,
            asset_type: recipe.created_type,
            data: combine.data,
            recipe: Some(recipe.name),
            creator: combine.creator,
            prev_counter: counter,
        });
        let counter = self.advance_and_store(account)?;

        self.events.push(Event::Combined {
            address: combine.address,
            recipe: combine.recipe,
            output,
            counter,
        });
        Ok(())
    }

    fn register_recipe(&mut self, register: RegisterRecipe) -> Result<(), Error> {
        validate_recipe(&register)?;

        if self.ledger.get_recipe(&register.name)?.is_some() {
            return Err(PopcodesError::DuplicateRecipe.into());
        }
        if !crypto::verify(
            &register.canonical_message(),
            &register.creator_sig,
            &register.creator,
        ) {
            return Err(PopcodesError::InvalidSignature.into());
        }

        let recipe = Recipe {
            name: register.name,
            created_type: register.created_type,
            ingredients: register.ingredients,
            creator: register.creator,
            creator_sig: register.creator_sig,
        };
        self.ledger.put_recipe(&recipe)?;

        self.events.push(Event::RecipeRegistered { name: recipe.name });
        Ok(())
    }

    /// Stored account at `address` or a fresh one with its opening counter.
    fn load_account(&self, address: &Address) -> Result<PopcodeAccount, Error> {
        let account = self.ledger.get_account(address)?;
        Ok(account.unwrap_or_else(|| {
            PopcodeAccount::new(*address, self.guard.opening_counter(address))
        }))
    }

    /// Advance the account counter, record the consumed counter and store the account.
    fn advance_and_store(&mut self, mut account: PopcodeAccount) -> Result<Counter, Error> {
        let prior = account.counter;
        account.counter = replay::advance(&prior);
        self.seed_rotated |= self.guard.record_and_maybe_rotate(account.address, prior);
        self.ledger.put_account(&account)?;
        Ok(account.counter)
    }
}

fn checked_sum(amounts: impl IntoIterator<Item = Amount>) -> Result<Amount, PopcodesError> {
    amounts
        .into_iter()
        .try_fold(0 as Amount, |total, amount| total.checked_add(amount))
        .ok_or(PopcodesError::ConservationViolation)
}

/// Every consumed type must be an ingredient and every ingredient must be consumed in exact
/// proportion to `amount`.
fn ensure_recipe_ratios(
    recipe: &Recipe,
    consumed: &BTreeMap<&str, Amount>,
    amount: Amount,
) -> Result<(), PopcodesError> {
    if consumed
        .keys()
        .any(|asset_type| recipe.ingredient(asset_type).is_none())
    {
        return Err(PopcodesError::ConservationViolation);
    }
    for ingredient in &recipe.ingredients {
        let used = consumed
            .get(ingredient.asset_type.as_str())
            .copied()
            .unwrap_or(0);
        if !ingredient.matches(used, amount) {
            return Err(PopcodesError::ConservationViolation);
        }
    }
    Ok(())
}

fn validate_recipe(register: &RegisterRecipe) -> Result<(), PopcodesError> {
    let blank = |value: &str| value.trim().is_empty();
    let distinct_types: BTreeSet<&str> = register
        .ingredients
        .iter()
        .map(|ingredient| ingredient.asset_type.as_str())
        .collect();

    let malformed = blank(&register.name)
        || blank(&register.created_type)
        || register.ingredients.is_empty()
        || distinct_types.len() != register.ingredients.len()
        || register.ingredients.iter().any(|ingredient| {
            blank(&ingredient.asset_type) || ingredient.numerator == 0 || ingredient.denominator == 0
        });
    if malformed {
        Err(PopcodesError::MalformedArgs)
    } else {
        Ok(())
    }
}

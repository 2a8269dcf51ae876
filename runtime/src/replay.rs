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

//! Counter seed, per-account counters and the transaction cache.
//!
//! Every account counter forms a SHA-256 hash chain. A fresh account starts its chain from the
//! global counter seed bound to its address, so no account has to be registered before it can be
//! used. The seed itself is rotated as the transaction cache fills up, which bounds how long an
//! opening counter derived from a given seed stays valid.

use sp_core::H256;

use popcodes_core::state::{LedgerParams, PopcodeAccount, TxCache, TxCacheEntry};
use popcodes_core::{sha2_256, Address, Counter, PopcodesError};

use crate::error::Error;
use crate::ledger::PopcodeLedger;
use crate::store::Storage;

/// In-memory view of the anti-replay state for the duration of one transaction.
///
/// Loaded from the ledger at the start of a transaction and written back with
/// [ReplayGuard::persist] when the transaction is accepted.
#[derive(Clone, Debug)]
pub struct ReplayGuard {
    seed: H256,
    cache: TxCache,
    params: LedgerParams,
}

impl ReplayGuard {
    /// Fails with [PopcodesError::Uninitialized] if the ledger has no counter seed.
    pub fn load<S: Storage>(ledger: &PopcodeLedger<S>) -> Result<Self, Error> {
        let seed = ledger
            .counter_seed()?
            .ok_or(PopcodesError::Uninitialized)?;
        Ok(ReplayGuard {
            seed,
            cache: ledger.tx_cache()?,
            params: ledger.params()?,
        })
    }

    pub fn seed(&self) -> H256 {
        self.seed
    }

    pub fn cache(&self) -> &TxCache {
        &self.cache
    }

    /// Opening counter of an account that does not exist yet.
    pub fn opening_counter(&self, address: &Address) -> Counter {
        opening_counter(&self.seed, address)
    }

    /// Current counter of `address`. Uses the stored counter if the account exists.
    pub fn counter_for(&self, address: &Address, account: Option<&PopcodeAccount>) -> Counter {
        match account {
            Some(account) => account.counter,
            None => self.opening_counter(address),
        }
    }

    /// Counters `address` held before recent transactions, most recent first.
    pub fn prior_counters<'a>(
        &'a self,
        address: &'a Address,
    ) -> impl Iterator<Item = &'a Counter> + 'a {
        self.cache
            .iter()
            .rev()
            .filter(move |entry| entry.address == *address)
            .map(|entry| &entry.prior_counter)
    }

    /// Record that `address` consumed `prior_counter`.
    ///
    /// Rotates the seed once when the cache grows past the rotation threshold and clears the
    /// cache when it reaches capacity. Returns true if the seed was rotated.
    pub fn record_and_maybe_rotate(&mut self, address: Address, prior_counter: Counter) -> bool {
        self.cache.push(TxCacheEntry {
            address,
            prior_counter,
        });

        let len = self.cache.len();
        let rotate = len == self.params.rotation_threshold as usize + 1;
        if rotate {
            self.seed = advance(&self.seed);
            log::info!("Rotated counter seed after {} transactions", len);
        }
        if len >= self.params.cache_capacity as usize {
            log::debug!("Transaction cache reached capacity {}, clearing", len);
            self.cache.clear();
        }
        rotate
    }

    pub fn persist<S: Storage>(&self, ledger: &mut PopcodeLedger<S>) -> Result<(), Error> {
        ledger.put_counter_seed(&self.seed)?;
        ledger.put_tx_cache(&self.cache)
    }
}

/// `SHA-256(seed ‖ address)`
pub fn opening_counter(seed: &H256, address: &Address) -> Counter {
    let mut preimage = Vec::with_capacity(32 + Address::LENGTH);
    preimage.extend_from_slice(seed.as_bytes());
    preimage.extend_from_slice(address.as_bytes());
    H256(sha2_256(&preimage))
}

/// Next link of a counter hash chain.
pub fn advance(counter: &Counter) -> Counter {
    H256(sha2_256(counter.as_bytes()))
}

#[cfg(test)]
mod test {
    use super::*;

    fn hello_world_seed() -> H256 {
        H256(sha2_256(b"Hello World"))
    }

    fn guard(params: LedgerParams) -> ReplayGuard {
        ReplayGuard {
            seed: hello_world_seed(),
            cache: TxCache::new(),
            params,
        }
    }

    #[test]
    fn known_opening_counter() {
        let address: Address = "74ded2036e988fc56e3cff77a40c58239591e921".parse().unwrap();
        assert_eq!(
            hex::encode(opening_counter(&hello_world_seed(), &address).as_bytes()),
            "af5eef44907ccdcc33051d035f32f42de0d093fac2fd9d15923448f6af46bc43"
        );
    }

    #[test]
    fn advance_is_a_hash_chain() {
        let counter = hello_world_seed();
        let next = advance(&counter);
        assert_ne!(next, counter);
        assert_eq!(next, H256(sha2_256(counter.as_bytes())));
    }

    #[test]
    fn rotation_boundaries() {
        let mut guard = guard(LedgerParams::default());
        let original = guard.seed();

        for i in 0..150u8 {
            guard.record_and_maybe_rotate(Address::from([i; 20]), H256::repeat_byte(i));
            let len = i as usize + 1;
            if len <= 101 {
                assert_eq!(guard.seed(), original, "rotated early at {}", len);
            } else {
                assert_eq!(guard.seed(), advance(&original), "wrong seed at {}", len);
            }
        }
        assert!(guard.cache().is_empty());

        // The next cycle rotates again.
        for i in 0..102u8 {
            guard.record_and_maybe_rotate(Address::from([i; 20]), H256::repeat_byte(i));
        }
        assert_eq!(guard.seed(), advance(&advance(&original)));
    }

    #[test]
    fn prior_counters_most_recent_first() {
        let mut guard = guard(LedgerParams::default());
        let alice = Address::from([1u8; 20]);
        let bob = Address::from([2u8; 20]);

        guard.record_and_maybe_rotate(alice, H256::repeat_byte(1));
        guard.record_and_maybe_rotate(bob, H256::repeat_byte(2));
        guard.record_and_maybe_rotate(alice, H256::repeat_byte(3));

        let priors: Vec<Counter> = guard.prior_counters(&alice).copied().collect();
        assert_eq!(priors, vec![H256::repeat_byte(3), H256::repeat_byte(1)]);
    }

    #[test]
    fn uninitialized_ledger() {
        let ledger = PopcodeLedger::new(crate::store::MemoryStorage::new());
        match ReplayGuard::load(&ledger) {
            Err(Error::Rejected(PopcodesError::Uninitialized)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}

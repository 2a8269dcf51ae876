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

//! Signature checks shared by the transaction handlers.

use std::collections::BTreeSet;

use popcodes_core::state::Output;
use popcodes_core::{crypto, Address, Counter, PopcodesError, PublicKey, Signature};

use crate::replay::ReplayGuard;

/// Fails with [PopcodesError::AddressMismatch] unless `key` controls `address`.
pub fn ensure_identity(address: &Address, key: &PublicKey) -> Result<(), PopcodesError> {
    if address.is_controlled_by(key) {
        Ok(())
    } else {
        Err(PopcodesError::AddressMismatch)
    }
}

/// Verify `signature` by `key` over the message `build` produces for the current counter.
///
/// If the signature does not verify, it is checked against counters `address` consumed
/// recently. A match there means the signer used an outdated counter.
pub fn verify_signer(
    guard: &ReplayGuard,
    address: &Address,
    current: &Counter,
    key: &PublicKey,
    signature: &Signature,
    build: impl Fn(&Counter) -> String,
) -> Result<(), PopcodesError> {
    if crypto::verify(&build(current), signature, key) {
        return Ok(());
    }
    let stale = guard
        .prior_counters(address)
        .any(|prior| crypto::verify(&build(prior), signature, key));
    if stale {
        log::debug!("Signature of {} was made for a stale counter", address);
        Err(PopcodesError::CounterStale)
    } else {
        Err(PopcodesError::InvalidSignature)
    }
}

/// Check owner signatures matched by position against `output.owners`.
///
/// Missing entries are owners that did not sign.
pub fn ensure_positional_threshold(
    output: &Output,
    signatures: &[Option<Signature>],
    message: &str,
) -> Result<(), PopcodesError> {
    if signatures.len() > output.owners.len() {
        return Err(PopcodesError::MalformedArgs);
    }

    let mut valid = 0;
    for (owner, signature) in output.owners.iter().zip(signatures) {
        if let Some(signature) = signature {
            if !crypto::verify(message, signature, owner) {
                return Err(PopcodesError::InvalidSignature);
            }
            valid += 1;
        }
    }

    if valid < output.required_signatures() {
        return Err(PopcodesError::ThresholdNotMet);
    }
    Ok(())
}

/// Check an unordered list of owner signatures against the owners of all `outputs`.
///
/// Every signature must belong to an owner of at least one output and every output needs
/// signatures from at least `threshold` distinct owners.
pub fn ensure_threshold<'a>(
    outputs: impl IntoIterator<Item = &'a Output> + Clone,
    signatures: &[Signature],
    message: &str,
) -> Result<(), PopcodesError> {
    for signature in signatures {
        let known = outputs.clone().into_iter().any(|output| {
            output
                .owners
                .iter()
                .any(|owner| crypto::verify(message, signature, owner))
        });
        if !known {
            return Err(PopcodesError::InvalidSignature);
        }
    }

    for output in outputs {
        let signers: BTreeSet<usize> = output
            .owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| {
                signatures
                    .iter()
                    .any(|signature| crypto::verify(message, signature, owner))
            })
            .map(|(index, _)| index)
            .collect();
        if signers.len() < output.required_signatures() {
            return Err(PopcodesError::ThresholdNotMet);
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use sp_core::{ecdsa, Pair as _, H256};

    fn key(name: &str) -> ecdsa::Pair {
        ecdsa::Pair::from_string(&format!("//{}", name), None).unwrap()
    }

    fn owned_output(owners: &[&ecdsa::Pair], threshold: u32) -> Output {
        Output {
            owners: owners.iter().map(|pair| pair.public()).collect(),
            threshold,
            amount: 1,
            asset_type: "Gold".into(),
            data: String::new(),
            recipe: None,
            creator: key("Creator").public(),
            prev_counter: H256::zero(),
        }
    }

    #[test]
    fn identity() {
        let alice = key("Alice").public();
        let bob = key("Bob").public();
        let address = Address::from_public_key(&alice);
        assert_eq!(ensure_identity(&address, &alice), Ok(()));
        assert_eq!(
            ensure_identity(&address, &bob),
            Err(PopcodesError::AddressMismatch)
        );
    }

    #[test]
    fn positional_threshold() {
        let (alice, bob) = (key("Alice"), key("Bob"));
        let output = owned_output(&[&alice, &bob], 2);
        let message = "message";
        let alice_sig = crypto::sign(&alice, message);
        let bob_sig = crypto::sign(&bob, message);

        assert_eq!(
            ensure_positional_threshold(&output, &[Some(alice_sig.clone()), None], message),
            Err(PopcodesError::ThresholdNotMet)
        );
        assert_eq!(
            ensure_positional_threshold(
                &output,
                &[Some(alice_sig.clone()), Some(bob_sig.clone())],
                message
            ),
            Ok(())
        );
        // Signatures in the wrong position do not verify.
        assert_eq!(
            ensure_positional_threshold(&output, &[Some(bob_sig), Some(alice_sig)], message),
            Err(PopcodesError::InvalidSignature)
        );
    }

    #[test]
    fn unordered_threshold() {
        let (alice, bob, eve) = (key("Alice"), key("Bob"), key("Eve"));
        let output = owned_output(&[&alice, &bob], 2);
        let message = "message";
        let alice_sig = crypto::sign(&alice, message);
        let bob_sig = crypto::sign(&bob, message);
        let eve_sig = crypto::sign(&eve, message);

        assert_eq!(
            ensure_threshold([&output], &[bob_sig.clone(), alice_sig.clone()], message),
            Ok(())
        );
        assert_eq!(
            ensure_threshold([&output], &[alice_sig.clone(), alice_sig.clone()], message),
            Err(PopcodesError::ThresholdNotMet)
        );
        assert_eq!(
            ensure_threshold([&output], &[alice_sig, bob_sig, eve_sig], message),
            Err(PopcodesError::InvalidSignature)
        );
    }

    #[test]
    fn unowned_output_needs_no_owner_signatures() {
        let output = owned_output(&[], 0);
        assert_eq!(ensure_threshold([&output], &[], "message"), Ok(()));
        assert_eq!(ensure_positional_threshold(&output, &[], "message"), Ok(()));
    }
}

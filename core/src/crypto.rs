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

//! Signing and verification of canonical messages.
//!
//! Signatures are secp256k1 ECDSA over the SHA-256 digest of the UTF-8 message.

use sp_core::{ecdsa, Pair as _};

use crate::{sha2_256, PublicKey, Signature};

pub fn message_digest(message: &str) -> [u8; 32] {
    sha2_256(message.as_bytes())
}

/// Signs the digest of `message` with `key_pair`.
pub fn sign(key_pair: &ecdsa::Pair, message: &str) -> Signature {
    key_pair.sign_prehashed(&message_digest(message))
}

/// Returns true if `signature` is a valid signature of `message` by `public_key`.
///
/// Malformed signatures and keys do not verify.
pub fn verify(message: &str, signature: &Signature, public_key: &PublicKey) -> bool {
    ecdsa::Pair::verify_prehashed(signature, &message_digest(message), public_key)
}

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

//! Basic types used in the Popcodes ledger.
//!
//! The crate is shared by the runtime that validates transactions and by clients that build and
//! sign them. Everything here is deterministic: no clock, no randomness and no I/O.

use sp_core::{ecdsa, H256};

pub use sp_core::hashing::sha2_256;

pub mod address;
pub use address::{Address, InvalidAddressError};

pub mod canonical;
pub mod crypto;
pub mod message;
pub mod state;

mod error;
pub use error::PopcodesError;

/// Public key of an identity, owner or creator. A compressed secp256k1 point.
pub type PublicKey = ecdsa::Public;

/// Signature over the SHA-256 digest of a canonical message.
pub type Signature = ecdsa::Signature;

/// Per-account anti-replay nonce. Advanced by hashing on every mutation.
///
/// See [state::PopcodeAccount::counter].
pub type Counter = H256;

/// Quantity of asset value held by an [state::Output].
pub type Amount = u64;

/// Position of an output in [state::PopcodeAccount::outputs].
pub type OutputIndex = u32;

/// Hash identifying an applied transaction.
pub type TxHash = H256;

/// Hex encoding of a public key as it appears in canonical messages and queries.
pub fn public_key_hex(key: &PublicKey) -> String {
    hex::encode(key)
}

/// Hex encoding of a counter or seed digest.
pub fn counter_hex(counter: &Counter) -> String {
    hex::encode(counter.as_bytes())
}

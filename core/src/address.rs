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

//! `Address` identifies a popcode account.
//!
//! An address is the first 20 bytes of the SHA-256 digest of the compressed identity public key.
//! Whoever holds the matching private key controls the account.

use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;
use parity_scale_codec::{Decode, Encode};

use crate::{sha2_256, PublicKey};

#[derive(Decode, Encode, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Address([u8; Address::LENGTH]);

impl Address {
    pub const LENGTH: usize = 20;

    /// Derive the address controlled by the given identity key.
    pub fn from_public_key(key: &PublicKey) -> Self {
        let digest = sha2_256(key.as_ref());
        let mut address = [0u8; Self::LENGTH];
        address.copy_from_slice(&digest[..Self::LENGTH]);
        Address(address)
    }

    /// True if `key` hashes to this address.
    pub fn is_controlled_by(&self, key: &PublicKey) -> bool {
        Self::from_public_key(key) == *self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; Address::LENGTH]> for Address {
    fn from(bytes: [u8; Address::LENGTH]) -> Self {
        Address(bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = InvalidAddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Address::LENGTH]>::try_from(bytes)
            .map(Address)
            .map_err(|_| InvalidAddressError("must be exactly 20 bytes"))
    }
}

impl FromStr for Address {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| InvalidAddressError("must be hex encoded"))?;
        Address::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

/// Error type when parsing an [Address] failed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid address: {0}")]
pub struct InvalidAddressError(&'static str);

#[cfg(test)]
mod test {
    use super::*;
    use sp_core::{ecdsa, Pair as _};

    fn public_key(hex_key: &str) -> PublicKey {
        PublicKey::try_from(hex::decode(hex_key).unwrap().as_slice()).unwrap()
    }

    #[test]
    fn derives_known_address() {
        let key = public_key("02ca4a8c7dc5090f924cde2264af240d76f6d58a5d2d15c8c5f59d95c70bd9e4dc");
        assert_eq!(
            Address::from_public_key(&key).to_string(),
            "74ded2036e988fc56e3cff77a40c58239591e921"
        );

        let key = public_key("02cb6d65b04c4b84502015f918fe549e95cad4f3b899359a170d4d7d438363c0ce");
        assert_eq!(
            Address::from_public_key(&key).to_string(),
            "10734390011641497f489cb475743b8e50d429bb"
        );
    }

    #[test]
    fn derivation_is_stable() {
        let key = ecdsa::Pair::from_string("//Alice", None).unwrap().public();
        assert_eq!(Address::from_public_key(&key), Address::from_public_key(&key));
        assert!(Address::from_public_key(&key).is_controlled_by(&key));

        let other = ecdsa::Pair::from_string("//Bob", None).unwrap().public();
        assert_ne!(Address::from_public_key(&key), Address::from_public_key(&other));
        assert!(!Address::from_public_key(&key).is_controlled_by(&other));
    }

    #[test]
    fn parse_display_identity() {
        let address: Address = "74ded2036e988fc56e3cff77a40c58239591e921".parse().unwrap();
        assert_eq!(address.to_string(), "74ded2036e988fc56e3cff77a40c58239591e921");
    }

    #[test]
    fn parse_invalid() {
        assert!("74ded2036e988fc56e3cff77a40c58239591e9".parse::<Address>().is_err());
        assert!("not hex at all".parse::<Address>().is_err());
        assert!("74ded2036e988fc56e3cff77a40c58239591e92100".parse::<Address>().is_err());
    }
}

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

use parity_scale_codec::{Decode, Encode};

/// Reasons for which the ledger rejects a transaction.
///
/// A rejected transaction leaves the ledger state untouched.
#[derive(Decode, Encode, Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PopcodesError {
    /// The supplied public key does not hash to the target address.
    #[error("The public key does not control the address")]
    AddressMismatch = 0,
    /// A signature does not verify against the expected key and message.
    #[error("A signature does not verify")]
    InvalidSignature,
    /// Fewer valid owner signatures than the output's threshold.
    #[error("Not enough owner signatures for the output threshold")]
    ThresholdNotMet,
    /// The signature was made for a counter value that has since advanced.
    #[error("The signature was made for a stale counter")]
    CounterStale,
    /// Output amounts do not balance with the consumed inputs.
    #[error("Amounts are not conserved")]
    ConservationViolation,
    #[error("The recipe does not exist")]
    UnknownRecipe,
    #[error("A recipe with the same name already exists")]
    DuplicateRecipe,
    #[error("The output index is out of range")]
    OutputIndexOutOfRange,
    /// Arguments are structurally invalid, e.g. a threshold larger than the owner set.
    #[error("Malformed transaction arguments")]
    MalformedArgs,
    /// The referenced output has already been consumed.
    #[error("The output has already been spent")]
    SpentOutput,
    /// The ledger has no counter seed yet.
    #[error("The ledger has not been initialized")]
    Uninitialized,
}

impl From<PopcodesError> for &'static str {
    fn from(error: PopcodesError) -> &'static str {
        match error {
            PopcodesError::AddressMismatch => "AddressMismatch",
            PopcodesError::InvalidSignature => "InvalidSignature",
            PopcodesError::ThresholdNotMet => "ThresholdNotMet",
            PopcodesError::CounterStale => "CounterStale",
            PopcodesError::ConservationViolation => "ConservationViolation",
            PopcodesError::UnknownRecipe => "UnknownRecipe",
            PopcodesError::DuplicateRecipe => "DuplicateRecipe",
            PopcodesError::OutputIndexOutOfRange => "OutputIndexOutOfRange",
            PopcodesError::MalformedArgs => "MalformedArgs",
            PopcodesError::SpentOutput => "SpentOutput",
            PopcodesError::Uninitialized => "Uninitialized",
        }
    }
}

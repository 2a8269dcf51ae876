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

//! Defines [Message] trait and implementations for all messages in `popcodes_core::message`.

pub use popcodes_core::message::*;
use popcodes_core::OutputIndex;
use popcodes_runtime::{Call, Event};

#[derive(thiserror::Error, Debug)]
pub enum EventExtractionError {
    #[error("Required event is missing")]
    EventMissing,
}

/// Trait implemented for every ledger message
///
/// For every [Call] variant we implement [Message] for the parameters struct of the call.
pub trait Message: Send + 'static {
    /// Output of a successfully applied message.
    ///
    /// This value is extracted from the events that are emitted when the message is applied.
    type Output: Send + 'static;

    /// Parse all events emitted by an applied message and return the message output.
    ///
    /// Returns an error if an expected event is missing.
    fn result_from_events(events: &[Event]) -> Result<Self::Output, EventExtractionError>;

    fn into_runtime_call(self) -> Call;
}

impl Message for Mint {
    type Output = OutputIndex;

    fn result_from_events(events: &[Event]) -> Result<Self::Output, EventExtractionError> {
        find_event(events, |event| match event {
            Event::Minted { output, .. } => Some(*output),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> Call {
        Call::Mint(self)
    }
}

impl Message for Transfer {
    type Output = ();

    fn result_from_events(events: &[Event]) -> Result<Self::Output, EventExtractionError> {
        find_event(events, |event| match event {
            Event::Transferred { .. } => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> Call {
        Call::Transfer(self)
    }
}

impl Message for Unitize {
    /// Indices of the new outputs at the destination address.
    type Output = Vec<OutputIndex>;

    fn result_from_events(events: &[Event]) -> Result<Self::Output, EventExtractionError> {
        find_event(events, |event| match event {
            Event::Unitized { outputs, .. } => Some(outputs.clone()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> Call {
        Call::Unitize(self)
    }
}

impl Message for Combine {
    type Output = OutputIndex;

    fn result_from_events(events: &[Event]) -> Result<Self::Output, EventExtractionError> {
        find_event(events, |event| match event {
            Event::Combined { output, .. } => Some(*output),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> Call {
        Call::Combine(self)
    }
}

impl Message for RegisterRecipe {
    type Output = ();

    fn result_from_events(events: &[Event]) -> Result<Self::Output, EventExtractionError> {
        find_event(events, |event| match event {
            Event::RecipeRegistered { .. } => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> Call {
        Call::RegisterRecipe(self)
    }
}

/// Run `f` on all events and return the first output.
/// If `f` returns `None` for all events an [EventExtractionError::EventMissing] error is returned.
fn find_event<T>(
    events: &[Event],
    f: impl Fn(&Event) -> Option<T>,
) -> Result<T, EventExtractionError> {
    events
        .iter()
        .find_map(f)
        .ok_or(EventExtractionError::EventMissing)
}

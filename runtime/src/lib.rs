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

//! The Popcodes ledger runtime.
//!
//! Validates transactions and applies them to a key-value [store::Storage] provided by the host.
//! Execution is deterministic: one transaction is fully applied or rejected before the next one
//! starts, and a rejected transaction leaves no trace in the storage.
//!
//! [apply] is the typed entry point. [dispatch] offers the same operations to hosts that speak
//! in function names and string arguments.

pub use popcodes_core::*;

pub mod authorization;
pub mod call;
pub mod dispatch;
pub mod event;
pub mod executor;
pub mod genesis;
pub mod ledger;
pub mod query;
pub mod replay;
pub mod store;

mod error;

pub use call::Call;
pub use error::Error;
pub use event::Event;
pub use executor::apply;
pub use genesis::GenesisConfig;
pub use store::{MemoryStorage, Storage};

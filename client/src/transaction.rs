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

//! Provides [Transaction].
use core::marker::PhantomData;

use popcodes_runtime::Call;

use crate::{message::Message, TxHash};

/// Transaction that can be submitted to the ledger.
///
/// The transaction type is generic over the message which must implement [Message]. The message
/// itself carries all signatures, see [crate::draft] for how to create signed messages.
#[derive(Clone, Debug)]
pub struct Transaction<Message_: Message> {
    _phantom_data: PhantomData<Message_>,
    pub(crate) call: Call,
}

impl<Message_: Message> Transaction<Message_> {
    pub fn new(message: Message_) -> Self {
        Transaction {
            _phantom_data: PhantomData,
            call: message.into_runtime_call(),
        }
    }

    /// Hash of the transaction. Same as [Call::hash].
    pub fn hash(&self) -> TxHash {
        self.call.hash()
    }

    pub fn call(&self) -> &Call {
        &self.call
    }
}

// Copyright 2021 Datafuse Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::seq_value::SeqValue;

/// A value read from the store together with its version.
///
/// Both fields are observed in the same read transaction,
/// so `seq` is always the version of exactly this `data`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeqV<T = Vec<u8>> {
    pub seq: u64,
    pub data: T,
}

impl<T> SeqV<T> {
    pub fn new(seq: u64, data: T) -> Self {
        Self { seq, data }
    }

    /// Transform the data while keeping the version.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SeqV<U> {
        SeqV {
            seq: self.seq,
            data: f(self.data),
        }
    }
}

impl<T> SeqValue<T> for SeqV<T> {
    fn seq(&self) -> u64 {
        self.seq
    }

    fn value(&self) -> &T {
        &self.data
    }

    fn into_value(self) -> T {
        self.data
    }
}

impl<T: fmt::Debug> fmt::Display for SeqV<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(seq={} {:?})", self.seq, self.data)
    }
}

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

use crate::match_seq::MatchSeq;

/// The current version of a key does not satisfy a [`MatchSeq`] condition.
#[derive(Clone, PartialEq, Eq, thiserror::Error, Debug)]
pub enum ConflictSeq {
    /// `got` is 0 when the key does not exist.
    #[error("NotMatch: seq {want}, got: {got}")]
    NotMatch { want: MatchSeq, got: u64 },
}

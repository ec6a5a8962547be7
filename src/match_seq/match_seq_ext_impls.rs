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

use crate::match_seq::errors::ConflictSeq;
use crate::match_seq::MatchSeq;
use crate::match_seq::MatchSeqExt;

impl MatchSeqExt<u64> for MatchSeq {
    fn match_seq(&self, seq: &u64) -> Result<(), ConflictSeq> {
        match self {
            MatchSeq::Any => Ok(()),
            MatchSeq::Exact(s) if seq == s => Ok(()),
            _ => Err(ConflictSeq::NotMatch {
                want: *self,
                got: *seq,
            }),
        }
    }
}

/// `None` is an absent key, which has version 0.
impl MatchSeqExt<Option<u64>> for MatchSeq {
    fn match_seq(&self, seq: &Option<u64>) -> Result<(), ConflictSeq> {
        self.match_seq(&seq.unwrap_or(0))
    }
}

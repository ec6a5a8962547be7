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

//! Version conditions for compare-and-swap writes.

pub mod errors;
#[allow(clippy::module_inception)]
mod match_seq;
mod match_seq_ext;
mod match_seq_ext_impls;

pub use self::match_seq::MatchSeq;
pub use self::match_seq::NO_VERSION;
pub use self::match_seq_ext::MatchSeqExt;

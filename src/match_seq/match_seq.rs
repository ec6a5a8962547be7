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

/// The version a caller expects to find when it writes a key.
pub const NO_VERSION: u64 = 0;

/// Specifies the version condition a put must satisfy to take effect.
///
/// Every stored record carries a version (`seq`) that starts at 1 and grows by
/// one on each successful write. A put names the version it read last, and the
/// store rejects the write if the record moved on in between:
///
/// - `Exact(0)` creates a key that must not exist yet.
/// - `Exact(n)` replaces the value only if the current version is `n`.
/// - `Any` writes without comparing versions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchSeq {
    /// Any version is acceptable, including an absent key.
    ///
    /// The version is still advanced by the write.
    Any,

    /// To match an exact version.
    ///
    /// E.g., CAS updates the exact version of some value,
    /// and put-if-absent adds a value only when the version is 0.
    Exact(u64),
}

impl From<u64> for MatchSeq {
    fn from(expected: u64) -> Self {
        MatchSeq::Exact(expected)
    }
}

impl fmt::Display for MatchSeq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchSeq::Any => {
                write!(f, "is any value")
            }
            MatchSeq::Exact(s) => {
                write!(f, "== {}", s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::match_seq::MatchSeq;

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Foo {
        f: MatchSeq,
    }

    #[test]
    fn test_match_seq_serde() -> anyhow::Result<()> {
        let t = Foo {
            f: MatchSeq::Exact(3),
        };
        let s = serde_json::to_string(&t)?;
        assert_eq!(r#"{"f":{"Exact":3}}"#, s);

        let back: Foo = serde_json::from_str(r#"{"f":"Any"}"#)?;
        assert_eq!(MatchSeq::Any, back.f);

        Ok(())
    }

    #[test]
    fn test_match_seq_display() -> anyhow::Result<()> {
        assert_eq!("== 3", MatchSeq::Exact(3).to_string());
        assert_eq!("is any value", MatchSeq::Any.to_string());

        Ok(())
    }

    #[test]
    fn test_match_seq_from_expected_version() {
        assert_eq!(MatchSeq::Exact(0), MatchSeq::from(0));
        assert_eq!(MatchSeq::Exact(2), MatchSeq::from(2));
    }
}

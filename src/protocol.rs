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

//! The version check shared by every [`Storer`](crate::Storer) implementation.

use crate::errors::StoreError;
use crate::match_seq::MatchSeq;
use crate::match_seq::MatchSeqExt;

/// Decide the version a put writes, or why it must not write.
///
/// - `current`: the decoded version entry of `key`, `None` if absent.
/// - `has_value`: whether the value entry of `key` exists. Only consulted
///   when the version entry is absent.
///
/// The caller must evaluate this and apply the write in one transaction.
pub fn next_version(
    key: &str,
    current: Option<u64>,
    has_value: bool,
    want: MatchSeq,
) -> Result<u64, StoreError> {
    match current {
        None => {
            // A value without a version is never created by a put.
            if has_value {
                return Err(StoreError::missing_version(key));
            }

            // The caller read a version that is gone now, e.g., deleted concurrently.
            want.match_seq(&current)
                .map_err(|_| StoreError::missing_version(key))?;

            Ok(1)
        }
        Some(seq) => {
            want.match_seq(&seq).map_err(|_| StoreError::StaleData {
                key: key.to_string(),
                want,
                got: seq,
            })?;

            seq.checked_add(1).ok_or_else(|| StoreError::VersionOverflow {
                key: key.to_string(),
                seq,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_next_version_absent() -> anyhow::Result<()> {
        assert_eq!(1, next_version("k", None, false, MatchSeq::Exact(0))?);
        assert_eq!(1, next_version("k", None, false, MatchSeq::Any)?);

        let res = next_version("k", None, false, MatchSeq::Exact(10));
        assert!(matches!(res, Err(StoreError::MissingVersion { .. })));

        Ok(())
    }

    #[test]
    fn test_next_version_present() -> anyhow::Result<()> {
        assert_eq!(3, next_version("k", Some(2), true, MatchSeq::Exact(2))?);
        assert_eq!(3, next_version("k", Some(2), true, MatchSeq::Any)?);

        let res = next_version("k", Some(2), true, MatchSeq::Exact(1));
        assert!(matches!(
            res,
            Err(StoreError::StaleData { want: MatchSeq::Exact(1), got: 2, .. })
        ));

        // Create on an existing key.
        let res = next_version("k", Some(2), true, MatchSeq::Exact(0));
        assert!(matches!(
            res,
            Err(StoreError::StaleData { want: MatchSeq::Exact(0), got: 2, .. })
        ));

        Ok(())
    }

    #[test]
    fn test_next_version_overflow() {
        for want in [MatchSeq::Exact(u64::MAX), MatchSeq::Any] {
            let res = next_version("k", Some(u64::MAX), true, want);
            assert!(
                matches!(res, Err(StoreError::VersionOverflow { seq: u64::MAX, .. })),
                "want: {}",
                want
            );
        }
    }

    #[test]
    fn test_next_version_value_without_version() {
        for want in [MatchSeq::Exact(0), MatchSeq::Exact(1), MatchSeq::Any] {
            let res = next_version("k", None, true, want);
            assert!(
                matches!(res, Err(StoreError::MissingVersion { .. })),
                "want: {}",
                want
            );
        }
    }
}

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

//! On-disk layout of a record.
//!
//! A record `K` is stored as two entries in the same namespace:
//!
//! - `K` maps to the raw value bytes.
//! - `K_lock` maps to the version, as base-10 ASCII text.
//!
//! User keys must not end with [`LOCK_SUFFIX`], otherwise they would
//! collide with the version entry of another key.

use crate::errors::StoreError;

/// Suffix of the key a version entry is stored under.
pub const LOCK_SUFFIX: &str = "_lock";

/// Reject keys that can not be used as user keys.
pub fn check_user_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }

    if is_version_key(key) {
        return Err(StoreError::ReservedKeySuffix {
            key: key.to_string(),
        });
    }

    Ok(())
}

pub fn is_version_key(key: &str) -> bool {
    key.ends_with(LOCK_SUFFIX)
}

/// Build the key of the version entry for a user key.
pub fn version_key(key: &str) -> String {
    format!("{}{}", key, LOCK_SUFFIX)
}

pub fn encode_version(seq: u64) -> String {
    seq.to_string()
}

/// Decode a stored version entry.
///
/// A valid version is a positive decimal integer.
pub fn decode_version(key: &str, raw: &[u8]) -> Result<u64, StoreError> {
    let decode_error = || StoreError::VersionDecode {
        key: key.to_string(),
        raw: String::from_utf8_lossy(raw).to_string(),
    };

    let s = std::str::from_utf8(raw).map_err(|_| decode_error())?;
    match s.parse::<u64>() {
        Ok(seq) if seq > 0 => Ok(seq),
        _ => Err(decode_error()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_check_user_key() {
        assert!(check_user_key("key").is_ok());
        assert!(check_user_key("lock").is_ok());
        assert!(check_user_key("key_lock_").is_ok());

        assert!(matches!(
            check_user_key("key_lock"),
            Err(StoreError::ReservedKeySuffix { key }) if key == "key_lock"
        ));
        assert!(matches!(
            check_user_key("_lock"),
            Err(StoreError::ReservedKeySuffix { .. })
        ));
        assert!(matches!(check_user_key(""), Err(StoreError::EmptyKey)));
    }

    #[test]
    fn test_version_key() {
        assert_eq!("a_lock", version_key("a"));
        assert!(is_version_key(&version_key("a")));
    }

    #[test]
    fn test_decode_version() -> anyhow::Result<()> {
        assert_eq!(1, decode_version("k", b"1")?);
        assert_eq!(42, decode_version("k", encode_version(42).as_bytes())?);

        for bad in [&b"notAnInteger"[..], b"", b"0", b"-1", b" 1", b"\xff"] {
            assert!(
                matches!(
                    decode_version("k", bad),
                    Err(StoreError::VersionDecode { .. })
                ),
                "{:?} should not decode",
                bad
            );
        }

        Ok(())
    }
}

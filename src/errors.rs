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

//! Errors returned by store operations.
//!
//! Every kind is a distinct variant so that callers can decide what to do
//! without parsing messages: [`StoreError::StaleData`] is the only one worth
//! retrying, the corruption kinds are not.

use std::path::PathBuf;

use crate::layout::LOCK_SUFFIX;
use crate::match_seq::MatchSeq;

/// Errors that can occur when opening or operating a store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The key ends with the reserved suffix of version entries.
    #[error("key has \"{}\" suffix and may conflict with real lock values: {key}", LOCK_SUFFIX)]
    ReservedKeySuffix { key: String },

    /// The key is an empty string.
    #[error("key must not be empty")]
    EmptyKey,

    /// The value entry of the key does not exist.
    #[error("key not found: {key}")]
    NotFound { key: String },

    /// A value entry exists without its version entry,
    /// or a versioned put targets a key that has no version.
    #[error("lock value not set for key: {key}")]
    MissingVersion { key: String },

    /// The version entry is not a positive base-10 integer.
    #[error("failed to decode lock value from key: {key}{}: {raw:?}", LOCK_SUFFIX)]
    VersionDecode { key: String, raw: String },

    /// The stored version is the largest one and cannot be advanced.
    #[error("lock value of key: {key} can not be incremented: {seq}")]
    VersionOverflow { key: String, seq: u64 },

    /// The expected version of a put does not match the stored one.
    ///
    /// `got` is the current version; a create (`want` is `== 0`) on an
    /// existing key reports the version of the existing record.
    #[error("data is stale; updated since last get: key: {key}, want seq {want}, got: {got}")]
    StaleData {
        key: String,
        want: MatchSeq,
        got: u64,
    },

    /// The database file or its namespace could not be opened or created.
    #[error("failed to open store at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: redb::Error,
    },

    /// The engine failed while running an operation.
    #[error("storage error: {0}")]
    Storage(#[source] redb::Error),

    /// A [`JsonStore`](crate::JsonStore) value could not be converted to or from JSON.
    #[error("failed to encode or decode json value of key: {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn not_found(key: impl ToString) -> Self {
        StoreError::NotFound {
            key: key.to_string(),
        }
    }

    pub fn missing_version(key: impl ToString) -> Self {
        StoreError::MissingVersion {
            key: key.to_string(),
        }
    }

    /// Returns `true` if the key does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns `true` if the error is a version conflict,
    /// i.e., re-reading and retrying the write may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::StaleData { .. })
    }

    /// Returns `true` if the stored value and version entries disagree.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StoreError::MissingVersion { .. }
                | StoreError::VersionDecode { .. }
                | StoreError::VersionOverflow { .. }
        )
    }
}

macro_rules! impl_from_engine_error {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StoreError {
                fn from(e: $t) -> Self {
                    StoreError::Storage(e.into())
                }
            }
        )*
    };
}

impl_from_engine_error!(
    redb::Error,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError
);

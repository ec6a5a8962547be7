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

//! Defines the versioned key-value interface consumed by callers.
//!
//! The [`Storer`] trait is implemented by the durable [`Store`](crate::Store)
//! and by the in-memory [`MemStore`](crate::impls::memory::MemStore).

use crate::errors::StoreError;
use crate::match_seq::MatchSeq;
use crate::seq_value::SeqV;

/// A key-value store with compare-and-swap writes.
///
/// Each record carries a version that starts at 1 and grows by one on every
/// successful write. A caller reads a record with [`get`](Storer::get), and
/// passes the version it read back to [`put`](Storer::put); the write is
/// rejected with [`StoreError::StaleData`] if someone else wrote the record in
/// between.
///
/// Every method runs in a single atomic transaction: a value and its version
/// are always read and written together.
///
/// # Examples
///
/// ```
/// use occ_store::impls::memory::MemStore;
/// use occ_store::Storer;
/// use occ_store::NO_VERSION;
///
/// # fn main() -> Result<(), occ_store::StoreError> {
/// let store = MemStore::default();
///
/// let seq = store.put("key", b"v1", NO_VERSION)?;
/// assert_eq!(1, seq);
///
/// let got = store.get("key")?;
/// let seq = store.put("key", b"v2", got.seq)?;
/// assert_eq!(2, seq);
///
/// // Written with an outdated version:
/// assert!(store.put("key", b"v3", 1).unwrap_err().is_conflict());
/// # Ok(())
/// # }
/// ```
pub trait Storer: Send + Sync {
    /// Get the value and the current version of a key.
    ///
    /// Returns [`StoreError::NotFound`] if the key does not exist.
    fn get(&self, key: &str) -> Result<SeqV, StoreError>;

    /// Write a value if the current version of the key is `expected`, and
    /// return the new version.
    ///
    /// `expected` is [`NO_VERSION`](crate::NO_VERSION) to create a key that
    /// does not exist yet.
    fn put(&self, key: &str, value: &[u8], expected: u64) -> Result<u64, StoreError> {
        self.put_with(key, value, MatchSeq::Exact(expected))
    }

    /// Write a value if the current version satisfies `want`,
    /// and return the new version.
    fn put_with(&self, key: &str, value: &[u8], want: MatchSeq) -> Result<u64, StoreError>;

    /// Remove a key and its version.
    ///
    /// Returns [`StoreError::NotFound`] if the key does not exist.
    fn del(&self, key: &str) -> Result<(), StoreError>;

    /// Return all user keys ending with `suffix`, in key order.
    fn keys(&self, suffix: &str) -> Result<Vec<String>, StoreError>;

    /// Release the underlying resources.
    fn close(self) -> Result<(), StoreError>
    where Self: Sized;
}

impl<T> Storer for &T
where T: Storer
{
    fn get(&self, key: &str) -> Result<SeqV, StoreError> {
        (**self).get(key)
    }

    fn put_with(&self, key: &str, value: &[u8], want: MatchSeq) -> Result<u64, StoreError> {
        (**self).put_with(key, value, want)
    }

    fn del(&self, key: &str) -> Result<(), StoreError> {
        (**self).del(key)
    }

    fn keys(&self, suffix: &str) -> Result<Vec<String>, StoreError> {
        (**self).keys(suffix)
    }

    /// A borrowed store is not closed by its borrower.
    fn close(self) -> Result<(), StoreError> {
        Ok(())
    }
}

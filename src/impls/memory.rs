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

//! Provides a simple in-memory implementation of the [`Storer`] API.
//!
//! [`MemStore`] keeps records in a [`BTreeMap`] behind a mutex. It follows the
//! same version protocol as the durable [`Store`](crate::Store), and is
//! intended for testing code that consumes a [`Storer`].

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use log::warn;

use crate::errors::StoreError;
use crate::layout::check_user_key;
use crate::match_seq::MatchSeq;
use crate::protocol::next_version;
use crate::seq_value::SeqV;
use crate::storer::Storer;

/// An in-memory [`Storer`].
///
/// The mutex plays the role of the engine transaction: every operation holds
/// it from the version check to the write.
#[derive(Debug, Default)]
pub struct MemStore {
    records: Mutex<BTreeMap<String, SeqV>>,
}

impl MemStore {
    fn records(&self) -> MutexGuard<'_, BTreeMap<String, SeqV>> {
        // A record is replaced by a single insert, so a poisoned map is still consistent.
        self.records.lock().unwrap_or_else(|poisoned| {
            warn!("MemStore lock is poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

impl Storer for MemStore {
    fn get(&self, key: &str) -> Result<SeqV, StoreError> {
        check_user_key(key)?;

        self.records()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    fn put_with(&self, key: &str, value: &[u8], want: MatchSeq) -> Result<u64, StoreError> {
        check_user_key(key)?;

        let mut records = self.records();

        let current = records.get(key).map(|sv| sv.seq);
        let seq = next_version(key, current, false, want)?;

        records.insert(key.to_string(), SeqV::new(seq, value.to_vec()));
        Ok(seq)
    }

    fn del(&self, key: &str) -> Result<(), StoreError> {
        check_user_key(key)?;

        self.records()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(key))
    }

    fn keys(&self, suffix: &str) -> Result<Vec<String>, StoreError> {
        let keys = self
            .records()
            .keys()
            .filter(|k| k.ends_with(suffix))
            .cloned()
            .collect();
        Ok(keys)
    }

    fn close(self) -> Result<(), StoreError> {
        Ok(())
    }
}

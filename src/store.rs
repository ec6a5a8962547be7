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

//! The durable [`Storer`] built on a redb database.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::warn;
use redb::Database;
use redb::ReadableTable;

use crate::config::Config;
use crate::errors::StoreError;
use crate::layout::check_user_key;
use crate::layout::decode_version;
use crate::layout::encode_version;
use crate::layout::is_version_key;
use crate::layout::version_key;
use crate::match_seq::MatchSeq;
use crate::namespace::namespace_def;
use crate::namespace::open_namespace;
use crate::namespace::NamespaceDef;
use crate::protocol::next_version;
use crate::seq_value::SeqV;
use crate::storer::Storer;

/// A versioned key-value store in one namespace of a redb database.
///
/// Every operation runs in exactly one redb transaction. redb allows one
/// writer at a time and any number of readers on consistent snapshots, so a
/// put always observes the version written by the put committed before it.
///
/// A `Store` owns the database for its whole lifetime. It is `Send + Sync`
/// and can be shared between threads by reference or `Arc`.
pub struct Store {
    db: Database,
    path: PathBuf,
    namespace: String,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl Store {
    /// Open the store at `path`, creating the file, its parent directories
    /// and the namespace if absent.
    pub fn open(path: impl AsRef<Path>, namespace: impl ToString) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let namespace = namespace.to_string();

        let db = open_namespace(&path, &namespace)?;

        Ok(Self {
            db,
            path,
            namespace,
        })
    }

    pub fn open_with_config(config: &Config) -> Result<Self, StoreError> {
        Self::open(&config.path, &config.namespace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn table(&self) -> NamespaceDef<'_> {
        namespace_def(&self.namespace)
    }
}

/// Log a corrupted record before handing the error to the caller.
fn corrupted(e: StoreError) -> StoreError {
    warn!("corrupted record: {}", e);
    e
}

impl Storer for Store {
    fn get(&self, key: &str) -> Result<SeqV, StoreError> {
        check_user_key(key)?;

        let txn = self.db.begin_read()?;
        let table = txn.open_table(self.table())?;

        let Some(value) = table.get(key)? else {
            return Err(StoreError::not_found(key));
        };

        let lock_key = version_key(key);
        let Some(raw_seq) = table.get(lock_key.as_str())? else {
            return Err(corrupted(StoreError::missing_version(key)));
        };

        let seq = decode_version(key, raw_seq.value()).map_err(corrupted)?;

        Ok(SeqV::new(seq, value.value().to_vec()))
    }

    fn put_with(&self, key: &str, value: &[u8], want: MatchSeq) -> Result<u64, StoreError> {
        check_user_key(key)?;

        let lock_key = version_key(key);

        let txn = self.db.begin_write()?;
        let seq = {
            let mut table = txn.open_table(self.table())?;

            let current = match table.get(lock_key.as_str())? {
                None => None,
                Some(raw) => Some(decode_version(key, raw.value()).map_err(corrupted)?),
            };

            let has_value = current.is_none() && table.get(key)?.is_some();

            // Returning early drops `txn` without commit, which aborts it.
            let seq = next_version(key, current, has_value, want).map_err(|e| {
                if e.is_corruption() {
                    corrupted(e)
                } else {
                    e
                }
            })?;

            table.insert(lock_key.as_str(), encode_version(seq).as_bytes())?;
            table.insert(key, value)?;
            seq
        };
        txn.commit()?;

        Ok(seq)
    }

    fn del(&self, key: &str) -> Result<(), StoreError> {
        check_user_key(key)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(self.table())?;

            if table.remove(key)?.is_none() {
                return Err(StoreError::not_found(key));
            }
            table.remove(version_key(key).as_str())?;
        }
        txn.commit()?;

        Ok(())
    }

    fn keys(&self, suffix: &str) -> Result<Vec<String>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(self.table())?;

        let mut keys = vec![];
        for res in table.iter()? {
            let (k, _v) = res?;
            let k = k.value();

            if !is_version_key(k) && k.ends_with(suffix) {
                keys.push(k.to_string());
            }
        }

        Ok(keys)
    }

    fn close(self) -> Result<(), StoreError> {
        debug!(
            "close namespace {:?} at {}",
            self.namespace,
            self.path.display()
        );
        drop(self.db);
        Ok(())
    }
}

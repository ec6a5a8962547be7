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

//! Opens the engine and makes sure the working namespace exists.
//!
//! A namespace is a redb table mapping `&str` keys to raw bytes.

use std::fs;
use std::path::Path;

use log::debug;
use redb::Database;
use redb::TableDefinition;

use crate::errors::StoreError;

/// The table type of a namespace: user keys and version keys to raw bytes.
pub type NamespaceDef<'a> = TableDefinition<'a, &'static str, &'static [u8]>;

pub fn namespace_def(name: &str) -> NamespaceDef<'_> {
    TableDefinition::new(name)
}

/// Open or create the database file at `path` and create the namespace in it if absent.
///
/// Parent directories of `path` are created as needed.
/// Any failure is returned as [`StoreError::Open`]; nothing is retried.
pub fn open_namespace(path: &Path, namespace: &str) -> Result<Database, StoreError> {
    let open_err = |source: redb::Error| StoreError::Open {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| open_err(redb::Error::Io(e)))?;
        }
    }

    let db = Database::create(path).map_err(|e| open_err(e.into()))?;

    let txn = db.begin_write().map_err(|e| open_err(e.into()))?;
    {
        // Opening a table in a write transaction creates it.
        txn.open_table(namespace_def(namespace))
            .map_err(|e| open_err(e.into()))?;
    }
    txn.commit().map_err(|e| open_err(e.into()))?;

    debug!("opened namespace {:?} at {}", namespace, path.display());

    Ok(db)
}

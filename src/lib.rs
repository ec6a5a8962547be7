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

//! # OCC Store
//!
//! A versioned key-value store with optimistic concurrency control, built on
//! the [redb](https://docs.rs/redb) embedded database.
//!
//! Every record carries a version that starts at 1 and increases by one on
//! each successful write. A writer passes the version it read last; the write
//! is rejected with [`StoreError::StaleData`] if another writer committed in
//! between. Readers are never blocked.
//!
//! ## Core Components
//!
//! - [`Storer`]: The versioned get/put/del/keys interface
//! - [`Store`]: The durable implementation on a redb namespace
//! - [`MatchSeq`]: The version condition of a put
//! - [`StoreError`]: Distinguishable failure kinds
//! - [`retry::update`]: Read-modify-write with bounded retry on conflict
//! - [`JsonStore`]: Typed records stored as JSON
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use occ_store::Store;
//! use occ_store::StoreError;
//! use occ_store::Storer;
//! use occ_store::NO_VERSION;
//!
//! fn main() -> Result<(), StoreError> {
//!     let store = Store::open("/tmp/occ/store.redb", "brokers")?;
//!
//!     // Create a key, it must not exist yet.
//!     let seq = store.put("instance-1", b"v1", NO_VERSION)?;
//!
//!     // Update it with the version read last.
//!     let got = store.get("instance-1")?;
//!     store.put("instance-1", b"v2", got.seq)?;
//!
//!     // An outdated version is rejected.
//!     let res = store.put("instance-1", b"v3", seq);
//!     assert!(res.unwrap_err().is_conflict());
//!
//!     store.close()
//! }
//! ```

pub mod config;
pub mod errors;
pub mod impls;
pub mod json;
pub mod layout;
pub mod match_seq;
pub mod namespace;
pub mod protocol;
pub mod retry;
pub mod seq_value;
pub mod store;
pub mod storer;

pub use crate::config::Config;
pub use crate::errors::StoreError;
pub use crate::json::JsonStore;
pub use crate::layout::LOCK_SUFFIX;
pub use crate::match_seq::MatchSeq;
pub use crate::match_seq::NO_VERSION;
pub use crate::retry::Backoff;
pub use crate::retry::RetryConfig;
pub use crate::seq_value::SeqV;
pub use crate::seq_value::SeqValue;
pub use crate::store::Store;
pub use crate::storer::Storer;

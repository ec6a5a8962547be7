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

//! Typed records stored as JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StoreError;
use crate::match_seq::MatchSeq;
use crate::retry::update;
use crate::retry::Backoff;
use crate::seq_value::SeqV;
use crate::seq_value::SeqValue;
use crate::storer::Storer;

/// Wraps a [`Storer`] to read and write serde values as JSON,
/// with the same version semantics as the underlying store.
#[derive(Debug)]
pub struct JsonStore<S> {
    inner: S,
}

impl<S> JsonStore<S>
where S: Storer
{
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Decode the value of `key` and return it with its version.
    pub fn get<T>(&self, key: &str) -> Result<SeqV<T>, StoreError>
    where T: DeserializeOwned {
        let (seq, buf) = self.inner.get(key)?.unpack();
        let data = decode(key, &buf)?;
        Ok(SeqV::new(seq, data))
    }

    /// Encode `value` and write it if the current version is `expected`.
    pub fn put<T>(&self, key: &str, value: &T, expected: u64) -> Result<u64, StoreError>
    where T: Serialize + ?Sized {
        self.put_with(key, value, MatchSeq::Exact(expected))
    }

    pub fn put_with<T>(&self, key: &str, value: &T, want: MatchSeq) -> Result<u64, StoreError>
    where T: Serialize + ?Sized {
        let buf = encode(key, value)?;
        self.inner.put_with(key, &buf, want)
    }

    /// Read-modify-write a typed value, retrying on version conflict.
    ///
    /// See [`update`](crate::retry::update).
    pub fn update<T, B, F>(&self, key: &str, backoff: &mut B, mut f: F) -> Result<u64, StoreError>
    where
        T: Serialize + DeserializeOwned,
        B: Backoff,
        F: FnMut(Option<T>) -> Result<T, StoreError>,
    {
        update(&self.inner, key, backoff, |current| {
            let current = current.map(|buf| decode(key, buf)).transpose()?;
            let next = f(current)?;
            encode(key, &next)
        })
    }

    pub fn del(&self, key: &str) -> Result<(), StoreError> {
        self.inner.del(key)
    }

    pub fn keys(&self, suffix: &str) -> Result<Vec<String>, StoreError> {
        self.inner.keys(suffix)
    }

    pub fn close(self) -> Result<(), StoreError> {
        self.inner.close()
    }
}

fn encode<T>(key: &str, value: &T) -> Result<Vec<u8>, StoreError>
where T: Serialize + ?Sized {
    serde_json::to_vec(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })
}

fn decode<T>(key: &str, buf: &[u8]) -> Result<T, StoreError>
where T: DeserializeOwned {
    serde_json::from_slice(buf).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;
    use crate::impls::memory::MemStore;
    use crate::match_seq::NO_VERSION;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
    struct Instance {
        id: String,
        bindings: Vec<String>,
    }

    fn instance(id: &str, bindings: &[&str]) -> Instance {
        Instance {
            id: id.to_string(),
            bindings: bindings.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_json_put_get() -> anyhow::Result<()> {
        let store = JsonStore::new(MemStore::default());

        let inst = instance("i1", &["b1"]);
        assert_eq!(1, store.put("i1", &inst, NO_VERSION)?);

        let got: SeqV<Instance> = store.get("i1")?;
        assert_eq!(SeqV::new(1, inst.clone()), got);

        // Stored as plain JSON.
        assert_eq!(
            br#"{"id":"i1","bindings":["b1"]}"#.to_vec(),
            store.inner().get("i1")?.data
        );

        let err = store.put("i1", &inst, NO_VERSION).unwrap_err();
        assert!(err.is_conflict());

        Ok(())
    }

    #[test]
    fn test_json_decode_error() -> anyhow::Result<()> {
        let store = JsonStore::new(MemStore::default());
        store.inner().put("bad", b"not json", NO_VERSION)?;

        let err = store.get::<Instance>("bad").unwrap_err();
        assert!(matches!(err, StoreError::Json { ref key, .. } if key == "bad"), "{}", err);

        Ok(())
    }

    #[test]
    fn test_json_update() -> anyhow::Result<()> {
        let store = JsonStore::new(MemStore::default());
        let mut backoff = |_attempt: u32| Some(Duration::ZERO);

        let add_binding = |binding: &'static str| {
            move |cur: Option<Instance>| {
                let mut inst = cur.unwrap_or_else(|| instance("i1", &[]));
                inst.bindings.push(binding.to_string());
                Ok::<_, StoreError>(inst)
            }
        };

        assert_eq!(1, store.update("i1", &mut backoff, add_binding("b1"))?);
        assert_eq!(2, store.update("i1", &mut backoff, add_binding("b2"))?);

        let got: SeqV<Instance> = store.get("i1")?;
        assert_eq!(SeqV::new(2, instance("i1", &["b1", "b2"])), got);

        store.del("i1")?;
        assert!(store.keys("")?.is_empty());

        Ok(())
    }
}

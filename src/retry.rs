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

//! Read-modify-write with bounded retry on version conflict.
//!
//! Store operations never retry by themselves. A caller that wants to apply a
//! change regardless of concurrent writers reads the record, computes the new
//! value and writes it back with the version it read; if another writer got
//! there first the write fails with [`StoreError::StaleData`] and the whole
//! read-modify-write is run again after a backoff delay.
//!
//! The number of attempts is bounded by the [`Backoff`]: once it returns
//! `None`, the last conflict is returned to the caller.

use std::thread;
use std::time::Duration;

use log::debug;
use log::warn;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::StoreError;
use crate::match_seq::NO_VERSION;
use crate::seq_value::SeqValue;
use crate::storer::Storer;

/// Decides how long to wait before the next retry.
pub trait Backoff {
    /// Return the delay before retry number `attempt`, counting from 0,
    /// or `None` to stop retrying.
    fn next_delay(&mut self, attempt: u32) -> Option<Duration>;
}

impl<F> Backoff for F
where F: FnMut(u32) -> Option<Duration>
{
    fn next_delay(&mut self, attempt: u32) -> Option<Duration> {
        self(attempt)
    }
}

/// Configuration of the default exponential backoff with jitter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt. 0 disables retrying.
    pub max_retries: u32,

    /// Base of the exponential delay in milliseconds.
    pub base_delay_ms: u64,

    /// Upper bound of a single delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            base_delay_ms: 10,
            max_delay_ms: 3000,
        }
    }
}

impl RetryConfig {
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay_ms(mut self, base_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }

    pub fn with_max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// The upper bound of the delay before retry number `attempt`:
    /// `base * 2^(attempt+1)`, capped at `max_delay_ms`.
    pub fn delay_cap(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_add(1).min(63);
        let ms = self.base_delay_ms.saturating_mul(1u64 << shift);
        Duration::from_millis(ms.min(self.max_delay_ms))
    }

    /// Build a [`Backoff`] that sleeps a random duration in `[0, delay_cap]`.
    pub fn backoff(&self) -> ExponentialJitter {
        ExponentialJitter {
            config: self.clone(),
        }
    }
}

/// Exponential backoff with full jitter.
#[derive(Debug, Clone)]
pub struct ExponentialJitter {
    config: RetryConfig,
}

impl Backoff for ExponentialJitter {
    fn next_delay(&mut self, attempt: u32) -> Option<Duration> {
        if attempt >= self.config.max_retries {
            return None;
        }

        let cap = self.config.delay_cap(attempt).as_millis() as u64;
        let ms = rand::thread_rng().gen_range(0..=cap);
        Some(Duration::from_millis(ms))
    }
}

/// Run `op` until it returns anything but a version conflict,
/// or until `backoff` gives up.
pub fn retry_on_conflict<T, B, F>(backoff: &mut B, mut op: F) -> Result<T, StoreError>
where
    B: Backoff,
    F: FnMut() -> Result<T, StoreError>,
{
    let mut attempt = 0;

    loop {
        match op() {
            Err(e) if e.is_conflict() => {
                let Some(delay) = backoff.next_delay(attempt) else {
                    warn!("give up after {} retries: {}", attempt, e);
                    return Err(e);
                };

                debug!("retry #{} in {:?}: {}", attempt, delay, e);

                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                attempt += 1;
            }
            res => return res,
        }
    }
}

/// Read-modify-write the value of `key`, retrying on version conflict.
///
/// `f` receives the current value, or `None` if the key does not exist, and
/// returns the value to write. An error from `f` aborts the update. Returns the
/// version written.
///
/// `f` may be called more than once, with a newer value each time.
pub fn update<S, B, F>(storer: &S, key: &str, backoff: &mut B, mut f: F) -> Result<u64, StoreError>
where
    S: Storer + ?Sized,
    B: Backoff,
    F: FnMut(Option<&[u8]>) -> Result<Vec<u8>, StoreError>,
{
    retry_on_conflict(backoff, || {
        let (current, expected) = match storer.get(key) {
            Ok(sv) => {
                let (seq, data) = sv.unpack();
                (Some(data), seq)
            }
            Err(e) if e.is_not_found() => (None, NO_VERSION),
            Err(e) => return Err(e),
        };

        let value = f(current.as_deref())?;
        storer.put(key, &value, expected)
    })
}

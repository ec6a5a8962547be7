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

//! Configuration for opening a [`Store`](crate::Store).

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::retry::RetryConfig;

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the database file. Parent directories are created on open.
    pub path: PathBuf,

    /// Name of the namespace records are stored in.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Retry policy for read-modify-write updates.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            namespace: default_namespace(),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl ToString) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_config_defaults_from_json() -> anyhow::Result<()> {
        let c: Config = serde_json::from_str(r#"{"path": "/var/lib/broker/store.redb"}"#)?;

        assert_eq!(Config::new("/var/lib/broker/store.redb"), c);
        assert_eq!("default", c.namespace);
        assert_eq!(RetryConfig::default(), c.retry);

        Ok(())
    }

    #[test]
    fn test_config_partial_retry_from_json() -> anyhow::Result<()> {
        let c: Config = serde_json::from_str(
            r#"{
                "path": "store.redb",
                "namespace": "brokers",
                "retry": {"max_retries": 3}
            }"#,
        )?;

        let want = Config::new("store.redb")
            .with_namespace("brokers")
            .with_retry(RetryConfig::default().with_max_retries(3));
        assert_eq!(want, c);

        Ok(())
    }

    #[test]
    fn test_config_requires_path() {
        let res = serde_json::from_str::<Config>(r#"{"namespace": "x"}"#);
        assert!(res.is_err());
    }
}

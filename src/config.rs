// Copyright 2025 RustFS Team
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

use crate::types::cluster::ClusterDescriptor;
use crate::types::error::{
    ConfigParseSnafu, ConfigReadSnafu, ConfigSyntaxSnafu, Error, InvalidConfigSnafu,
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_PORT: u16 = 8002;
pub const DEFAULT_API_PREFIX: &str = "api";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Backend settings, usually read from a YAML file.
///
/// Every field has a default, so an empty document is a valid config. The
/// poll interval, the request timeout and a non-null poll timeout must be
/// greater than zero:
///
/// ```yaml
/// apiPort: 8002
/// apiPrefix: api
/// pollIntervalMs: 2000
/// pollTimeoutSecs: 600   # null disables the deadline
/// requestTimeoutSecs: 30
/// clusters:
///   - name: c1
///     clusterId: 00000000-0000-0000-0000-0000000000aa
/// ```
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub api_port: u16,
    pub api_prefix: String,
    pub poll_interval_ms: u64,
    pub poll_timeout_secs: Option<u64>,
    pub request_timeout_secs: u64,
    pub clusters: Vec<ClusterDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: DEFAULT_API_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            poll_timeout_secs: Some(DEFAULT_POLL_TIMEOUT_SECS),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            clusters: Vec::new(),
        }
    }
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .context(ConfigReadSnafu { path })?;
        let config = Self::parse(&raw).context(ConfigParseSnafu { path })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, Error> {
        let config = Self::parse(raw).context(ConfigSyntaxSnafu)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self, serde_yaml_ng::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(raw)
    }

    /// Reject settings that would make the poller spin or every call time out at once.
    pub fn validate(&self) -> Result<(), Error> {
        if self.poll_interval_ms == 0 {
            return InvalidConfigSnafu {
                message: "pollIntervalMs must be greater than zero",
            }
            .fail();
        }
        if self.request_timeout_secs == 0 {
            return InvalidConfigSnafu {
                message: "requestTimeoutSecs must be greater than zero",
            }
            .fail();
        }
        if self.poll_timeout_secs == Some(0) {
            return InvalidConfigSnafu {
                message: "pollTimeoutSecs must be greater than zero or null",
            }
            .fail();
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn poll_timeout(&self) -> Option<Duration> {
        self.poll_timeout_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

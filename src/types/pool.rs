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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pool as reported by `GET cluster/{cluster-fsid}/pool`.
///
/// Fields the backend does not interpret are kept in `extra` so a pool can be
/// round-tripped without loss.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Pool {
    #[serde(default)]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub size: u32,

    #[serde(default)]
    pub min_size: u32,

    #[serde(default)]
    pub crush_ruleset: i64,

    #[serde(default)]
    pub pg_num: u32,

    #[serde(default)]
    pub pgp_num: u32,

    #[serde(default)]
    pub quota_max_objects: u64,

    #[serde(default)]
    pub quota_max_bytes: u64,

    #[serde(default)]
    pub full: bool,

    #[serde(default)]
    pub hashpspool: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters for creating a pool. `pgp_num` always follows `pg_num`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPool {
    pub name: String,
    pub pg_num: u32,
    pub replicas: u32,
    pub quota_max_objects: u64,
    pub quota_max_bytes: u64,
}

impl NewPool {
    pub fn new(name: impl Into<String>, pg_num: u32, replicas: u32) -> Self {
        Self {
            name: name.into(),
            pg_num,
            replicas,
            quota_max_objects: 0,
            quota_max_bytes: 0,
        }
    }

    pub fn with_quota(mut self, max_objects: u64, max_bytes: u64) -> Self {
        self.quota_max_objects = max_objects;
        self.quota_max_bytes = max_bytes;
        self
    }

    pub(crate) fn body(&self) -> CreatePoolBody<'_> {
        CreatePoolBody {
            name: &self.name,
            size: self.replicas,
            pg_num: self.pg_num,
            pgp_num: self.pg_num,
            quota_max_objects: self.quota_max_objects,
            quota_max_bytes: self.quota_max_bytes,
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct CreatePoolBody<'a> {
    pub name: &'a str,
    pub size: u32,
    pub pg_num: u32,
    pub pgp_num: u32,
    pub quota_max_objects: u64,
    pub quota_max_bytes: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body_mirrors_pg_num() {
        let pool = NewPool::new("rbd", 128, 3).with_quota(10, 1024);
        let body = serde_json::to_value(pool.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "rbd",
                "size": 3,
                "pg_num": 128,
                "pgp_num": 128,
                "quota_max_objects": 10,
                "quota_max_bytes": 1024
            })
        );
    }

    #[test]
    fn test_pool_keeps_unknown_fields() {
        let pool: Pool = serde_json::from_value(json!({
            "id": 1,
            "name": "rbd",
            "size": 3,
            "min_size": 2,
            "pg_num": 64,
            "pgp_num": 64,
            "crash_replay_interval": 0
        }))
        .unwrap();

        assert_eq!(pool.id, 1);
        assert_eq!(pool.min_size, 2);
        assert_eq!(pool.extra.get("crash_replay_interval"), Some(&json!(0)));
    }
}

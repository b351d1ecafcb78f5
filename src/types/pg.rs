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
use std::collections::BTreeMap;
use strum::{Display, EnumIter};

#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum PgSeverity {
    #[strum(serialize = "critical")]
    Critical,

    #[strum(serialize = "warn")]
    Warn,

    #[serde(rename = "ok")]
    #[strum(serialize = "ok")]
    Clean,
}

/// Count of placement groups in one severity bucket. The wire form is a JSON float.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SeverityCount {
    pub count: f64,

    #[serde(default)]
    pub states: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PgCounters {
    pub critical: SeverityCount,
    pub warn: SeverityCount,
    pub ok: SeverityCount,
}

impl PgCounters {
    pub fn get(&self, severity: PgSeverity) -> &SeverityCount {
        match severity {
            PgSeverity::Critical => &self.critical,
            PgSeverity::Warn => &self.warn,
            PgSeverity::Clean => &self.ok,
        }
    }
}

/// The health counter document; only the `pg` section is required.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct HealthCounters {
    pub pg: PgCounters,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Placement group state counts, returned as-is from `sync_object/pg_summary`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct PgSummary {
    #[serde(default)]
    pub all: BTreeMap<String, u64>,

    #[serde(default)]
    pub by_pool: BTreeMap<String, BTreeMap<String, u64>>,

    #[serde(default)]
    pub by_osd: BTreeMap<String, BTreeMap<String, u64>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Convert a wire count to an integer, rejecting negatives and non-finite values.
pub fn count_to_u64(count: f64) -> Option<u64> {
    if count.is_finite() && count >= 0.0 {
        Some(count as u64)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_counters_decode() {
        let counters: HealthCounters = serde_json::from_value(json!({
            "pg": {
                "critical": {"count": 2.0, "states": {"down": 2}},
                "warn": {"count": 1},
                "ok": {"count": 125.0}
            },
            "osd": {"ok": {"count": 3}}
        }))
        .unwrap();

        assert_eq!(counters.pg.get(PgSeverity::Critical).count, 2.0);
        assert_eq!(counters.pg.get(PgSeverity::Warn).count, 1.0);
        assert_eq!(counters.pg.get(PgSeverity::Clean).count, 125.0);
        assert!(counters.other.contains_key("osd"));
    }

    #[test]
    fn test_health_counters_missing_severity() {
        let err = serde_json::from_value::<HealthCounters>(json!({
            "pg": {"critical": {"count": 2}, "warn": {"count": 1}}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("ok"));
    }

    #[test]
    fn test_count_coercion() {
        assert_eq!(count_to_u64(7.0), Some(7));
        assert_eq!(count_to_u64(0.0), Some(0));
        assert_eq!(count_to_u64(-1.0), None);
        assert_eq!(count_to_u64(f64::NAN), None);
    }

    #[test]
    fn test_severity_names() {
        assert_eq!(PgSeverity::Clean.to_string(), "ok");
        assert_eq!(
            serde_json::to_value(PgSeverity::Critical).unwrap(),
            json!("critical")
        );
    }
}

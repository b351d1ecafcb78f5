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

use crate::backend::CephApi;
use crate::context::RequestContext;
use crate::types::error::{Error, OperationSnafu, SchemaSnafu};
use crate::types::pg::{HealthCounters, PgSeverity, PgSummary, count_to_u64};
use crate::types::route::{Placeholder, RouteName};
use serde_json::Value;
use snafu::OptionExt;
use snafu::futures::TryFutureExt;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::debug;
use uuid::Uuid;

/// Placement group counts per severity bucket (`critical`, `warn`, `ok`).
///
/// Either all three buckets are returned or the call fails with a schema error.
pub(crate) async fn get_pg_count(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    rctx: &RequestContext,
) -> Result<BTreeMap<PgSeverity, u64>, Error> {
    let fsid = cluster_id.to_string();

    async {
        let resp = api
            .context()
            .send(
                RouteName::GetPgCount,
                mon,
                &[(Placeholder::ClusterFsid, fsid.as_str())],
                rctx,
            )
            .await?;
        let doc: Value = resp.json()?;
        let counters: HealthCounters =
            serde_json::from_value(doc).map_err(|e| {
                SchemaSnafu {
                    url: &resp.url,
                    message: e.to_string(),
                }
                .build()
            })?;

        let mut counts = BTreeMap::new();
        for severity in PgSeverity::iter() {
            let raw = counters.pg.get(severity).count;
            let count = count_to_u64(raw).context(SchemaSnafu {
                url: &resp.url,
                message: format!("pg.{severity}.count is not a valid count: {raw}"),
            })?;
            counts.insert(severity, count);
        }

        debug!(ctxt = rctx.id(), "pg counts for cluster {}: {:?}", cluster_id, counts);
        Ok::<_, Error>(counts)
    }
    .context(OperationSnafu {
        op: "get pg count",
        target: format!("of cluster {cluster_id}"),
    })
    .await
}

pub(crate) async fn get_pg_summary(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    rctx: &RequestContext,
) -> Result<PgSummary, Error> {
    let fsid = cluster_id.to_string();
    api.context()
        .get_json(
            RouteName::PgStatistics,
            mon,
            &[(Placeholder::ClusterFsid, fsid.as_str())],
            rctx,
        )
        .context(OperationSnafu {
            op: "get pg summary",
            target: format!("of cluster {cluster_id}"),
        })
        .await
}

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
use crate::poller::wait_for_completion;
use crate::types::error::{Error, NotFoundSnafu, OperationSnafu};
use crate::types::osd::Osd;
use crate::types::route::{Placeholder, RouteName};
use serde_json::{Map, Value};
use snafu::futures::TryFutureExt;
use tracing::info;
use uuid::Uuid;

pub(crate) async fn get_osds(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    rctx: &RequestContext,
) -> Result<Vec<Osd>, Error> {
    let fsid = cluster_id.to_string();
    api.context()
        .get_json(
            RouteName::GetOsds,
            mon,
            &[(Placeholder::ClusterFsid, fsid.as_str())],
            rctx,
        )
        .context(OperationSnafu {
            op: "list osds",
            target: format!("of cluster {cluster_id}"),
        })
        .await
}

/// The monitor answers with a list; the first entry is the requested OSD.
pub(crate) async fn get_osd(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    osd_id: u32,
    rctx: &RequestContext,
) -> Result<Osd, Error> {
    let fsid = cluster_id.to_string();
    let osd_id_str = osd_id.to_string();

    async {
        let osds: Vec<Osd> = api
            .context()
            .get_json(
                RouteName::GetOsd,
                mon,
                &[
                    (Placeholder::ClusterFsid, fsid.as_str()),
                    (Placeholder::OsdId, osd_id_str.as_str()),
                ],
                rctx,
            )
            .await?;
        let Some(osd) = osds.into_iter().next() else {
            return NotFoundSnafu {
                resource: format!("osd.{osd_id}"),
            }
            .fail();
        };
        Ok::<_, Error>(osd)
    }
    .context(OperationSnafu {
        op: "get osd",
        target: format!("{osd_id} of cluster {cluster_id}"),
    })
    .await
}

pub(crate) async fn update_osd(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    osd_id: u32,
    params: &Map<String, Value>,
    rctx: &RequestContext,
) -> Result<(), Error> {
    info!(
        ctxt = rctx.id(),
        "updating osd.{} on cluster {}: {:?}",
        osd_id,
        cluster_id,
        params.keys().collect::<Vec<_>>()
    );

    let fsid = cluster_id.to_string();
    let osd_id_str = osd_id.to_string();
    let bindings = [
        (Placeholder::ClusterFsid, fsid.as_str()),
        (Placeholder::OsdId, osd_id_str.as_str()),
    ];

    async {
        let accepted = api
            .context()
            .send_json(RouteName::UpdateOsd, mon, &bindings, params, rctx)
            .await?;
        wait_for_completion(api.context(), mon, &accepted, rctx).await?;
        Ok::<_, Error>(())
    }
    .context(OperationSnafu {
        op: "update osd",
        target: format!("{osd_id} on cluster {cluster_id}"),
    })
    .await
}

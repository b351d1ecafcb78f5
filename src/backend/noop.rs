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

//! Operations the backend interface requires but this adapter does not
//! forward. Cluster deployment happens out of band, so each call logs and
//! reports success with an empty result.

use crate::context::RequestContext;
use crate::types::error::Error;
use crate::types::interface::{ClusterUtilization, Mon, OsdDetails, OsdSpec};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub(crate) fn create_cluster(
    cluster_name: &str,
    fsid: Uuid,
    mons: &[Mon],
    rctx: &RequestContext,
) -> Result<(), Error> {
    debug!(
        ctxt = rctx.id(),
        "create cluster {} ({}) with {} mons: not forwarded",
        cluster_name,
        fsid,
        mons.len()
    );
    Ok(())
}

pub(crate) fn add_mon(
    cluster_name: &str,
    mons: &[Mon],
    rctx: &RequestContext,
) -> Result<(), Error> {
    debug!(ctxt = rctx.id(), "add {} mons to {}: not forwarded", mons.len(), cluster_name);
    Ok(())
}

pub(crate) fn start_mon(nodes: &[String], rctx: &RequestContext) -> Result<(), Error> {
    debug!(ctxt = rctx.id(), "start mon on {:?}: not forwarded", nodes);
    Ok(())
}

pub(crate) fn add_osd(
    cluster_name: &str,
    osd: &OsdSpec,
    rctx: &RequestContext,
) -> Result<HashMap<String, Vec<String>>, Error> {
    debug!(
        ctxt = rctx.id(),
        "add osd {}:{} to {}: not forwarded", osd.node, osd.device, cluster_name
    );
    Ok(HashMap::new())
}

pub(crate) fn list_pool_names(
    cluster_name: &str,
    rctx: &RequestContext,
) -> Result<Vec<String>, Error> {
    debug!(ctxt = rctx.id(), "list pool names of {}: not forwarded", cluster_name);
    Ok(Vec::new())
}

pub(crate) fn get_cluster_status(
    cluster_name: &str,
    rctx: &RequestContext,
) -> Result<String, Error> {
    debug!(ctxt = rctx.id(), "status of {}: not forwarded", cluster_name);
    Ok(String::new())
}

pub(crate) fn get_cluster_stats(
    cluster_name: &str,
    rctx: &RequestContext,
) -> Result<ClusterUtilization, Error> {
    debug!(ctxt = rctx.id(), "stats of {}: not forwarded", cluster_name);
    Ok(ClusterUtilization::default())
}

pub(crate) fn get_osd_details(
    cluster_name: &str,
    rctx: &RequestContext,
) -> Result<Vec<OsdDetails>, Error> {
    debug!(ctxt = rctx.id(), "osd details of {}: not forwarded", cluster_name);
    Ok(Vec::new())
}

pub(crate) fn get_object_count(
    cluster_name: &str,
    rctx: &RequestContext,
) -> Result<HashMap<String, i64>, Error> {
    debug!(ctxt = rctx.id(), "object count of {}: not forwarded", cluster_name);
    Ok(HashMap::new())
}

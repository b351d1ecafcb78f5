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

//! The storage backend surface: pool, OSD, placement group and command
//! operations against a monitor's management API.

use crate::catalog::{ClusterCatalog, StaticCatalog, resolve_cluster_id};
use crate::config::Config;
use crate::context::{Context, RequestContext};
use crate::types::error::Error;
use crate::types::interface::{ClusterUtilization, Mon, OsdDetails, OsdSpec};
use crate::types::osd::Osd;
use crate::types::pg::{PgSeverity, PgSummary};
use crate::types::pool::{NewPool, Pool};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

mod command;
mod noop;
mod osd;
mod pg;
mod pool;

/// Operations a storage backend offers to the orchestrator.
///
/// Mutating operations return only once the monitor reports the async
/// request as complete. Cluster bootstrap operations are accepted but not
/// forwarded; they always succeed.
pub trait Backend: Send + Sync {
    fn create_cluster(
        &self,
        cluster_name: &str,
        fsid: Uuid,
        mons: &[Mon],
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn add_mon(
        &self,
        cluster_name: &str,
        mons: &[Mon],
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn start_mon(
        &self,
        nodes: &[String],
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn add_osd(
        &self,
        cluster_name: &str,
        osd: &OsdSpec,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<HashMap<String, Vec<String>>, Error>> + Send;

    fn create_pool(
        &self,
        mon: &str,
        cluster_name: &str,
        pool: &NewPool,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn list_pool_names(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<Vec<String>, Error>> + Send;

    fn get_cluster_status(
        &self,
        mon: &str,
        cluster_id: Uuid,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<String, Error>> + Send;

    fn get_cluster_stats(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<ClusterUtilization, Error>> + Send;

    fn get_pools(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<Vec<Pool>, Error>> + Send;

    fn update_pool(
        &self,
        mon: &str,
        cluster_id: Uuid,
        pool_id: u32,
        params: &Map<String, Value>,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn remove_pool(
        &self,
        mon: &str,
        cluster_id: Uuid,
        cluster_name: &str,
        pool_name: &str,
        pool_id: u32,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn get_osd_details(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<Vec<OsdDetails>, Error>> + Send;

    fn get_object_count(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<HashMap<String, i64>, Error>> + Send;

    fn get_pg_count(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<BTreeMap<PgSeverity, u64>, Error>> + Send;

    fn get_pg_summary(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<PgSummary, Error>> + Send;

    fn exec_cmd(
        &self,
        mon: &str,
        cluster_id: Uuid,
        cmd: &str,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<String, Error>> + Send;

    fn get_osds(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<Vec<Osd>, Error>> + Send;

    fn update_osd(
        &self,
        mon: &str,
        cluster_id: Uuid,
        osd_id: u32,
        params: &Map<String, Value>,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn get_osd(
        &self,
        mon: &str,
        cluster_id: Uuid,
        osd_id: u32,
        rctx: &RequestContext,
    ) -> impl Future<Output = Result<Osd, Error>> + Send;
}

/// [`Backend`] implementation backed by the monitor REST API.
#[derive(Clone)]
pub struct CephApi {
    ctx: Context,
    catalog: Arc<dyn ClusterCatalog>,
}

impl CephApi {
    pub fn new(config: Config, catalog: Arc<dyn ClusterCatalog>) -> Result<Self, Error> {
        Ok(Self {
            ctx: Context::new(config)?,
            catalog,
        })
    }

    /// Build a backend whose cluster catalog is the `clusters` list of `config`.
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let catalog = StaticCatalog::new(config.clusters.clone());
        Self::new(config, Arc::new(catalog))
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub(crate) fn catalog(&self) -> &dyn ClusterCatalog {
        self.catalog.as_ref()
    }

    /// Look up the fsid registered for `cluster_name`.
    pub async fn resolve_cluster(&self, cluster_name: &str) -> Result<Uuid, Error> {
        resolve_cluster_id(self.catalog(), cluster_name).await
    }
}

impl Backend for CephApi {
    async fn create_cluster(
        &self,
        cluster_name: &str,
        fsid: Uuid,
        mons: &[Mon],
        rctx: &RequestContext,
    ) -> Result<(), Error> {
        noop::create_cluster(cluster_name, fsid, mons, rctx)
    }

    async fn add_mon(
        &self,
        cluster_name: &str,
        mons: &[Mon],
        rctx: &RequestContext,
    ) -> Result<(), Error> {
        noop::add_mon(cluster_name, mons, rctx)
    }

    async fn start_mon(&self, nodes: &[String], rctx: &RequestContext) -> Result<(), Error> {
        noop::start_mon(nodes, rctx)
    }

    async fn add_osd(
        &self,
        cluster_name: &str,
        osd: &OsdSpec,
        rctx: &RequestContext,
    ) -> Result<HashMap<String, Vec<String>>, Error> {
        noop::add_osd(cluster_name, osd, rctx)
    }

    async fn create_pool(
        &self,
        mon: &str,
        cluster_name: &str,
        pool: &NewPool,
        rctx: &RequestContext,
    ) -> Result<(), Error> {
        pool::create_pool(self, mon, cluster_name, pool, rctx).await
    }

    async fn list_pool_names(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> Result<Vec<String>, Error> {
        noop::list_pool_names(cluster_name, rctx)
    }

    async fn get_cluster_status(
        &self,
        mon: &str,
        cluster_id: Uuid,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> Result<String, Error> {
        noop::get_cluster_status(cluster_name, rctx)
    }

    async fn get_cluster_stats(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> Result<ClusterUtilization, Error> {
        noop::get_cluster_stats(cluster_name, rctx)
    }

    async fn get_pools(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> Result<Vec<Pool>, Error> {
        pool::get_pools(self, mon, cluster_id, rctx).await
    }

    async fn update_pool(
        &self,
        mon: &str,
        cluster_id: Uuid,
        pool_id: u32,
        params: &Map<String, Value>,
        rctx: &RequestContext,
    ) -> Result<(), Error> {
        pool::update_pool(self, mon, cluster_id, pool_id, params, rctx).await
    }

    async fn remove_pool(
        &self,
        mon: &str,
        cluster_id: Uuid,
        cluster_name: &str,
        pool_name: &str,
        pool_id: u32,
        rctx: &RequestContext,
    ) -> Result<(), Error> {
        pool::remove_pool(self, mon, cluster_id, cluster_name, pool_name, pool_id, rctx).await
    }

    async fn get_osd_details(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> Result<Vec<OsdDetails>, Error> {
        noop::get_osd_details(cluster_name, rctx)
    }

    async fn get_object_count(
        &self,
        mon: &str,
        cluster_name: &str,
        rctx: &RequestContext,
    ) -> Result<HashMap<String, i64>, Error> {
        noop::get_object_count(cluster_name, rctx)
    }

    async fn get_pg_count(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> Result<BTreeMap<PgSeverity, u64>, Error> {
        pg::get_pg_count(self, mon, cluster_id, rctx).await
    }

    async fn get_pg_summary(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> Result<PgSummary, Error> {
        pg::get_pg_summary(self, mon, cluster_id, rctx).await
    }

    async fn exec_cmd(
        &self,
        mon: &str,
        cluster_id: Uuid,
        cmd: &str,
        rctx: &RequestContext,
    ) -> Result<String, Error> {
        command::exec_cmd(self, mon, cluster_id, cmd, rctx).await
    }

    async fn get_osds(
        &self,
        mon: &str,
        cluster_id: Uuid,
        rctx: &RequestContext,
    ) -> Result<Vec<Osd>, Error> {
        osd::get_osds(self, mon, cluster_id, rctx).await
    }

    async fn update_osd(
        &self,
        mon: &str,
        cluster_id: Uuid,
        osd_id: u32,
        params: &Map<String, Value>,
        rctx: &RequestContext,
    ) -> Result<(), Error> {
        osd::update_osd(self, mon, cluster_id, osd_id, params, rctx).await
    }

    async fn get_osd(
        &self,
        mon: &str,
        cluster_id: Uuid,
        osd_id: u32,
        rctx: &RequestContext,
    ) -> Result<Osd, Error> {
        osd::get_osd(self, mon, cluster_id, osd_id, rctx).await
    }
}

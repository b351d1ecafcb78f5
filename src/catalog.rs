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
use crate::types::error::{Error, NotFoundSnafu};
use futures::future::BoxFuture;
use snafu::OptionExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;
use uuid::Uuid;

/// Source of cluster name to fsid mappings.
///
/// Each lookup runs in its own session; dropping the session releases it.
pub trait ClusterCatalog: Send + Sync {
    fn open_session(&self) -> BoxFuture<'_, Result<Box<dyn CatalogSession>, Error>>;
}

pub trait CatalogSession: Send + Sync {
    fn find_by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ClusterDescriptor>, Error>>;
}

/// Resolve a cluster name to its fsid, holding a catalog session only for the lookup.
pub async fn resolve_cluster_id(catalog: &dyn ClusterCatalog, name: &str) -> Result<Uuid, Error> {
    let session = catalog.open_session().await?;
    let found = session.find_by_name(name).await;
    drop(session);

    let cluster = found?.context(NotFoundSnafu {
        resource: format!("cluster '{name}'"),
    })?;
    debug!("cluster {} resolved to {}", name, cluster.cluster_id);
    Ok(cluster.cluster_id)
}

/// In-memory catalog, usually fed from the `clusters` section of the config.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    clusters: Arc<Vec<ClusterDescriptor>>,
    open_sessions: Arc<AtomicUsize>,
}

impl StaticCatalog {
    pub fn new(clusters: Vec<ClusterDescriptor>) -> Self {
        Self {
            clusters: Arc::new(clusters),
            open_sessions: Arc::default(),
        }
    }

    /// Sessions handed out and not yet dropped.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }
}

impl ClusterCatalog for StaticCatalog {
    fn open_session(&self) -> BoxFuture<'_, Result<Box<dyn CatalogSession>, Error>> {
        Box::pin(async move {
            self.open_sessions.fetch_add(1, Ordering::SeqCst);
            let session = StaticSession {
                clusters: self.clusters.clone(),
                open_sessions: self.open_sessions.clone(),
            };
            Ok(Box::new(session) as Box<dyn CatalogSession>)
        })
    }
}

struct StaticSession {
    clusters: Arc<Vec<ClusterDescriptor>>,
    open_sessions: Arc<AtomicUsize>,
}

impl CatalogSession for StaticSession {
    fn find_by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Option<ClusterDescriptor>, Error>> {
        Box::pin(async move { Ok(self.clusters.iter().find(|c| c.name == name).cloned()) })
    }
}

impl Drop for StaticSession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

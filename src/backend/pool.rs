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
use crate::catalog::resolve_cluster_id;
use crate::context::RequestContext;
use crate::poller::wait_for_completion;
use crate::types::error::{Error, OperationSnafu};
use crate::types::pool::{NewPool, Pool};
use crate::types::route::{Placeholder, RouteName};
use serde_json::{Map, Value};
use snafu::futures::TryFutureExt;
use tracing::info;
use uuid::Uuid;

pub(crate) async fn create_pool(
    api: &CephApi,
    mon: &str,
    cluster_name: &str,
    pool: &NewPool,
    rctx: &RequestContext,
) -> Result<(), Error> {
    info!(
        ctxt = rctx.id(),
        "creating pool {} on cluster {} (pg_num {}, size {})",
        pool.name,
        cluster_name,
        pool.pg_num,
        pool.replicas
    );

    async {
        let cluster_id = resolve_cluster_id(api.catalog(), cluster_name).await?;
        let fsid = cluster_id.to_string();
        let accepted = api
            .context()
            .send_json(
                RouteName::CreatePool,
                mon,
                &[(Placeholder::ClusterFsid, fsid.as_str())],
                &pool.body(),
                rctx,
            )
            .await?;
        wait_for_completion(api.context(), mon, &accepted, rctx).await?;
        Ok::<_, Error>(())
    }
    .context(OperationSnafu {
        op: "create pool",
        target: format!("'{}' on cluster {}", pool.name, cluster_name),
    })
    .await?;

    info!(ctxt = rctx.id(), "pool {} created on cluster {}", pool.name, cluster_name);
    Ok(())
}

pub(crate) async fn get_pools(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    rctx: &RequestContext,
) -> Result<Vec<Pool>, Error> {
    let fsid = cluster_id.to_string();
    api.context()
        .get_json(
            RouteName::GetPools,
            mon,
            &[(Placeholder::ClusterFsid, fsid.as_str())],
            rctx,
        )
        .context(OperationSnafu {
            op: "list pools",
            target: format!("of cluster {cluster_id}"),
        })
        .await
}

/// Patch a pool. `params` is sent as-is, so any pool attribute the monitor
/// accepts can be changed.
pub(crate) async fn update_pool(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    pool_id: u32,
    params: &Map<String, Value>,
    rctx: &RequestContext,
) -> Result<(), Error> {
    info!(
        ctxt = rctx.id(),
        "updating pool {} on cluster {}: {:?}",
        pool_id,
        cluster_id,
        params.keys().collect::<Vec<_>>()
    );

    let fsid = cluster_id.to_string();
    let pool_id_str = pool_id.to_string();
    let bindings = [
        (Placeholder::ClusterFsid, fsid.as_str()),
        (Placeholder::PoolId, pool_id_str.as_str()),
    ];

    async {
        let accepted = api
            .context()
            .send_json(RouteName::UpdatePool, mon, &bindings, params, rctx)
            .await?;
        wait_for_completion(api.context(), mon, &accepted, rctx).await?;
        Ok::<_, Error>(())
    }
    .context(OperationSnafu {
        op: "update pool",
        target: format!("{pool_id} on cluster {cluster_id}"),
    })
    .await
}

pub(crate) async fn remove_pool(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    cluster_name: &str,
    pool_name: &str,
    pool_id: u32,
    rctx: &RequestContext,
) -> Result<(), Error> {
    info!(
        ctxt = rctx.id(),
        "removing pool {} ({}) from cluster {}", pool_name, pool_id, cluster_name
    );

    let fsid = cluster_id.to_string();
    let pool_id_str = pool_id.to_string();
    let bindings = [
        (Placeholder::ClusterFsid, fsid.as_str()),
        (Placeholder::PoolId, pool_id_str.as_str()),
    ];

    async {
        let accepted = api
            .context()
            .send(RouteName::RemovePool, mon, &bindings, rctx)
            .await?;
        wait_for_completion(api.context(), mon, &accepted, rctx).await?;
        Ok::<_, Error>(())
    }
    .context(OperationSnafu {
        op: "remove pool",
        target: format!("'{pool_name}' ({pool_id}) from cluster {cluster_name}"),
    })
    .await?;

    info!(ctxt = rctx.id(), "pool {} removed from cluster {}", pool_name, cluster_name);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use crate::backend::Backend;
    use crate::context::RequestContext;
    use crate::tests::{FSID, MockMonitor, closed_port_config, fixture_api, fixture_catalog};
    use crate::types::error::{Error, ErrorKind};
    use crate::types::pool::NewPool;
    use http::{Method, StatusCode};
    use serde_json::json;
    use uuid::Uuid;

    fn fsid() -> Uuid {
        FSID.parse().unwrap()
    }

    #[tokio::test]
    async fn test_create_pool_waits_for_completion() {
        let mon = MockMonitor::start().await;
        let pool_path = format!("/api/v2/cluster/{FSID}/pool");
        mon.respond(
            Method::POST,
            &pool_path,
            StatusCode::ACCEPTED,
            r#"{"request_id":"r-1"}"#,
        );
        mon.respond(
            Method::GET,
            "/api/v2/request/r-1",
            StatusCode::OK,
            r#"{"state":"submitted","error":false}"#,
        );
        mon.respond(
            Method::GET,
            "/api/v2/request/r-1",
            StatusCode::OK,
            r#"{"state":"complete","error":false}"#,
        );

        let api = fixture_api(&mon);
        api.create_pool(
            &mon.host(),
            "c1",
            &NewPool::new("rbd", 128, 3),
            &RequestContext::new("create"),
        )
        .await
        .unwrap();

        let posts = mon.requests_to(Method::POST, &pool_path);
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].json(),
            json!({
                "name": "rbd",
                "size": 3,
                "pg_num": 128,
                "pgp_num": 128,
                "quota_max_objects": 0,
                "quota_max_bytes": 0
            })
        );

        let requests = mon.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].method, Method::POST);
        assert!(requests[1..].iter().all(|r| r.path == "/api/v2/request/r-1"));
    }

    #[tokio::test]
    async fn test_create_pool_unknown_cluster() {
        let mon = MockMonitor::start().await;
        let catalog = fixture_catalog();
        let api = crate::backend::CephApi::new(mon.config(), std::sync::Arc::new(catalog.clone()))
            .unwrap();

        let err = api
            .create_pool(
                &mon.host(),
                "missing",
                &NewPool::new("rbd", 8, 2),
                &RequestContext::new("create"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(mon.requests().is_empty());
        assert_eq!(catalog.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_create_pool_rejected_by_monitor() {
        let mon = MockMonitor::start().await;
        mon.respond(
            Method::POST,
            &format!("/api/v2/cluster/{FSID}/pool"),
            StatusCode::BAD_REQUEST,
            r#"{"name":["pool exists"]}"#,
        );

        let api = fixture_api(&mon);
        let err = api
            .create_pool(
                &mon.host(),
                "c1",
                &NewPool::new("rbd", 8, 2),
                &RequestContext::new("create"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Remote);
        assert!(err.to_string().starts_with("create pool 'rbd' on cluster c1"));
        assert_eq!(mon.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_pool_job_failure() {
        let mon = MockMonitor::start().await;
        let pool_path = format!("/api/v2/cluster/{FSID}/pool/4");
        mon.respond(
            Method::DELETE,
            &pool_path,
            StatusCode::ACCEPTED,
            r#"{"request_id":"r-2"}"#,
        );
        mon.respond(
            Method::GET,
            "/api/v2/request/r-2",
            StatusCode::OK,
            r#"{"state":"complete","error":true,"error_message":"pool in use"}"#,
        );

        let api = fixture_api(&mon);
        let err = api
            .remove_pool(
                &mon.host(),
                fsid(),
                "c1",
                "rbd",
                4,
                &RequestContext::new("remove"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::JobFailed);
        assert!(matches!(err.root(), Error::JobFailed { message, .. } if message == "pool in use"));
        assert!(mon.requests_to(Method::DELETE, &pool_path)[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_update_pool_sends_params_verbatim() {
        let mon = MockMonitor::start().await;
        let pool_path = format!("/api/v2/cluster/{FSID}/pool/1");
        mon.respond(
            Method::PATCH,
            &pool_path,
            StatusCode::ACCEPTED,
            r#"{"request_id":"r-3"}"#,
        );
        mon.respond(
            Method::GET,
            "/api/v2/request/r-3",
            StatusCode::OK,
            r#"{"state":"complete","error":false}"#,
        );

        let params = json!({"size": 2, "quota_max_bytes": 1024, "x-custom": "kept"});
        let api = fixture_api(&mon);
        api.update_pool(
            &mon.host(),
            fsid(),
            1,
            params.as_object().unwrap(),
            &RequestContext::new("update"),
        )
        .await
        .unwrap();

        assert_eq!(mon.requests_to(Method::PATCH, &pool_path)[0].json(), params);
    }

    #[tokio::test]
    async fn test_update_pool_transport_error_skips_poller() {
        let api = crate::backend::CephApi::from_config(closed_port_config().await).unwrap();
        let params = json!({"size": 2});

        let err = api
            .update_pool(
                "127.0.0.1",
                fsid(),
                1,
                params.as_object().unwrap(),
                &RequestContext::new("update"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_get_pools() {
        let mon = MockMonitor::start().await;
        mon.respond(
            Method::GET,
            &format!("/api/v2/cluster/{FSID}/pool"),
            StatusCode::OK,
            r#"[{"id":0,"name":"rbd","size":3,"pg_num":64,"pgp_num":64},{"id":1,"name":"data"}]"#,
        );

        let api = fixture_api(&mon);
        let pools = api
            .get_pools(&mon.host(), fsid(), &RequestContext::new("list"))
            .await
            .unwrap();

        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].name, "rbd");
        assert_eq!(pools[0].pg_num, 64);
        assert_eq!(pools[1].id, 1);
    }
}

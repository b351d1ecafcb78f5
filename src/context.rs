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

use crate::config::Config;
use crate::transport::Transport;
use crate::types::error::{
    CancelledSnafu, DecodeSnafu, EncodeSnafu, Error, ReadBodySnafu, RemoteSnafu,
};
use crate::types::route::{Placeholder, RouteName, RouteTable};
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Per-call context: a log id, a cancellation token and an optional poll deadline.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    id: String,
    cancel: CancellationToken,
    poll_timeout: Option<Duration>,
}

impl RequestContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Overrides the configured poll deadline for this call only.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = Some(timeout);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn poll_timeout(&self) -> Option<Duration> {
        self.poll_timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// A fully read monitor response that passed status classification.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub route: RouteName,
    pub url: String,
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).context(DecodeSnafu { url: &self.url })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Shared state behind every backend call: the route catalog, the HTTP
/// transport and the settings. Holds nothing mutable, so one instance serves
/// any number of concurrent calls.
#[derive(Clone, Debug)]
pub struct Context {
    routes: Arc<RouteTable>,
    transport: Transport,
    config: Arc<Config>,
}

impl Context {
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_routes(config, RouteTable::new())
    }

    pub fn with_routes(config: Config, routes: RouteTable) -> Result<Self, Error> {
        config.validate()?;
        let transport = Transport::new(&config)?;
        Ok(Self {
            routes: Arc::new(routes),
            transport,
            config: Arc::new(config),
        })
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue a bodiless request for `name`.
    pub async fn send(
        &self,
        name: RouteName,
        mon: &str,
        bindings: &[(Placeholder, &str)],
        rctx: &RequestContext,
    ) -> Result<ApiResponse, Error> {
        self.execute(name, mon, bindings, Vec::new(), rctx).await
    }

    /// Issue a request for `name` with `body` encoded as JSON.
    pub async fn send_json<B>(
        &self,
        name: RouteName,
        mon: &str,
        bindings: &[(Placeholder, &str)],
        body: &B,
        rctx: &RequestContext,
    ) -> Result<ApiResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).context(EncodeSnafu { route: name })?;
        self.execute(name, mon, bindings, body, rctx).await
    }

    /// GET `name` and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        name: RouteName,
        mon: &str,
        bindings: &[(Placeholder, &str)],
        rctx: &RequestContext,
    ) -> Result<T, Error> {
        self.send(name, mon, bindings, rctx).await?.json()
    }

    async fn execute(
        &self,
        name: RouteName,
        mon: &str,
        bindings: &[(Placeholder, &str)],
        body: Vec<u8>,
        rctx: &RequestContext,
    ) -> Result<ApiResponse, Error> {
        let route = self.routes.get(name)?.bind(bindings)?;
        let url = self.transport.url(mon, &route);

        // Dropping the in-flight future on cancellation closes the connection.
        let exchange = async {
            let resp = self.transport.send(&route, &url, body).await?;
            let status = resp.status();
            let bytes = resp.bytes().await.context(ReadBodySnafu { url: &url })?;
            Ok::<_, Error>((status, bytes.to_vec()))
        };
        let (status, body) = tokio::select! {
            biased;
            _ = rctx.cancel_token().cancelled() => {
                return CancelledSnafu { what: format!("{} {}", route.method, url) }.fail();
            }
            res = exchange => res?,
        };

        debug!(ctxt = rctx.id(), route = %name, %status, "monitor replied");

        if !is_success(&route.method, status) {
            return RemoteSnafu {
                url,
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
            .fail();
        }

        Ok(ApiResponse {
            route: name,
            url,
            status,
            body,
        })
    }
}

/// Reads succeed only with 200; mutations may also be accepted for async processing.
fn is_success(method: &Method, status: StatusCode) -> bool {
    if *method == Method::GET {
        status == StatusCode::OK
    } else {
        status == StatusCode::OK || status == StatusCode::ACCEPTED
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tests::{FSID, MockMonitor, SilentMonitor, closed_port_config};
    use std::time::Instant;
    use crate::types::error::ErrorKind;
    use std::collections::HashMap;

    #[test]
    fn test_status_classification() {
        assert!(is_success(&Method::GET, StatusCode::OK));
        assert!(!is_success(&Method::GET, StatusCode::ACCEPTED));
        assert!(is_success(&Method::POST, StatusCode::ACCEPTED));
        assert!(is_success(&Method::PATCH, StatusCode::OK));
        assert!(!is_success(&Method::DELETE, StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        let mon = MockMonitor::start().await;
        mon.respond(
            Method::GET,
            &format!("/api/v2/cluster/{FSID}/pool"),
            StatusCode::OK,
            r#"[{"id":0,"name":"rbd"}]"#,
        );

        let ctx = Context::new(mon.config()).unwrap();
        let pools: serde_json::Value = ctx
            .get_json(
                RouteName::GetPools,
                &mon.host(),
                &[(Placeholder::ClusterFsid, FSID)],
                &RequestContext::new("t"),
            )
            .await
            .unwrap();

        assert_eq!(pools[0]["name"], "rbd");
    }

    #[tokio::test]
    async fn test_get_accepted_is_remote_error() {
        let mon = MockMonitor::start().await;
        mon.respond(
            Method::GET,
            &format!("/api/v2/cluster/{FSID}/osd"),
            StatusCode::ACCEPTED,
            r#"{"request_id":"r-9"}"#,
        );

        let ctx = Context::new(mon.config()).unwrap();
        let err = ctx
            .send(
                RouteName::GetOsds,
                &mon.host(),
                &[(Placeholder::ClusterFsid, FSID)],
                &RequestContext::new("t"),
            )
            .await
            .unwrap_err();

        match err {
            Error::Remote { status, body, .. } => {
                assert_eq!(status, StatusCode::ACCEPTED);
                assert!(body.contains("r-9"));
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[tokio::test]
    async fn test_unscripted_path_is_remote_error() {
        let mon = MockMonitor::start().await;
        let ctx = Context::new(mon.config()).unwrap();

        let err = ctx
            .send_json(
                RouteName::ExecCmd,
                &mon.host(),
                &[(Placeholder::ClusterFsid, FSID)],
                &serde_json::json!({"command": ["status"]}),
                &RequestContext::new("t"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[tokio::test]
    async fn test_encode_failure_sends_nothing() {
        let mon = MockMonitor::start().await;
        let ctx = Context::new(mon.config()).unwrap();

        // JSON object keys must be strings.
        let body: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        let err = ctx
            .send_json(
                RouteName::UpdatePool,
                &mon.host(),
                &[(Placeholder::ClusterFsid, FSID), (Placeholder::PoolId, "1")],
                &body,
                &RequestContext::new("t"),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Encode);
        assert!(mon.requests().is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let ctx = Context::new(closed_port_config().await).unwrap();
        let err = ctx
            .send(
                RouteName::GetPools,
                "127.0.0.1",
                &[(Placeholder::ClusterFsid, FSID)],
                &RequestContext::new("t"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let mon = MockMonitor::start().await;
        mon.respond(
            Method::GET,
            &format!("/api/v2/cluster/{FSID}/pool"),
            StatusCode::OK,
            "<html>oops</html>",
        );

        let ctx = Context::new(mon.config()).unwrap();
        let err = ctx
            .get_json::<Vec<serde_json::Value>>(
                RouteName::GetPools,
                &mon.host(),
                &[(Placeholder::ClusterFsid, FSID)],
                &RequestContext::new("t"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let mon = MockMonitor::start().await;
        let ctx = Context::new(mon.config()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = ctx
            .send(
                RouteName::GetPools,
                &mon.host(),
                &[(Placeholder::ClusterFsid, FSID)],
                &RequestContext::new("t").with_cancellation(cancel),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_while_request_in_flight() {
        let mon = SilentMonitor::start().await;
        let ctx = Context::new(mon.config()).unwrap();
        let cancel = CancellationToken::new();
        let rctx = RequestContext::new("t").with_cancellation(cancel.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            cancel.cancel();
        });

        let started = Instant::now();
        let err = ctx
            .send(
                RouteName::GetPools,
                "127.0.0.1",
                &[(Placeholder::ClusterFsid, FSID)],
                &rctx,
            )
            .await
            .unwrap_err();
        canceller.await.unwrap();

        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

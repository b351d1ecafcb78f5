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
use crate::types::error::{Error, HttpClientSnafu, TransportSnafu, UnsupportedMethodSnafu};
use crate::types::route::BoundRoute;
use http::Method;
use http::header::CONTENT_TYPE;
use snafu::ResultExt;
use tracing::debug;

pub const JSON_CONTENT_TYPE: &str = "application/json";

const USER_AGENT: &str = concat!("cephapi/", env!("CARGO_PKG_VERSION"));

/// Plain-HTTP client for the monitor API.
///
/// Every URL has the form `http://<mon>:<port>/<prefix>/v<version>/<path>`.
/// Timeouts and connection pooling are left to the underlying client, which
/// is cheap to clone and shared by all calls.
#[derive(Clone, Debug)]
pub struct Transport {
    client: reqwest::Client,
    port: u16,
    prefix: String,
}

impl Transport {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .no_proxy()
            .build()
            .context(HttpClientSnafu)?;

        Ok(Self {
            client,
            port: config.api_port,
            prefix: config.api_prefix.trim_matches('/').to_string(),
        })
    }

    pub fn url(&self, mon: &str, route: &BoundRoute) -> String {
        format!(
            "http://{}:{}/{}/v{}/{}",
            mon, self.port, self.prefix, route.version, route.path
        )
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response, Error> {
        debug!("GET {url}");
        self.client
            .get(url)
            .send()
            .await
            .context(TransportSnafu {
                method: Method::GET,
                url,
            })
    }

    pub async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, Error> {
        self.with_body(Method::POST, url, content_type, body).await
    }

    pub async fn patch(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, Error> {
        self.with_body(Method::PATCH, url, content_type, body).await
    }

    pub async fn delete(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, Error> {
        self.with_body(Method::DELETE, url, content_type, body).await
    }

    /// Dispatch on the route's method. Only GET, POST, PATCH and DELETE are supported.
    pub async fn send(
        &self,
        route: &BoundRoute,
        url: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, Error> {
        match route.method {
            Method::GET => self.get(url).await,
            Method::POST => self.post(url, JSON_CONTENT_TYPE, body).await,
            Method::PATCH => self.patch(url, JSON_CONTENT_TYPE, body).await,
            Method::DELETE => self.delete(url, JSON_CONTENT_TYPE, body).await,
            _ => UnsupportedMethodSnafu {
                route: route.name,
                method: route.method.clone(),
            }
            .fail(),
        }
    }

    async fn with_body(
        &self,
        method: Method,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, Error> {
        debug!("{method} {url} ({} bytes)", body.len());
        self.client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .context(TransportSnafu { method, url })
    }
}

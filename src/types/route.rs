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

use crate::types::error::{
    Error, UnboundPlaceholderSnafu, UnknownRouteSnafu, UnusedBindingSnafu,
};
use http::Method;
use snafu::OptionExt;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Names of the monitor API endpoints the backend knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum RouteName {
    CreatePool,
    GetPools,
    UpdatePool,
    RemovePool,
    #[strum(serialize = "GetOSDs")]
    GetOsds,
    #[strum(serialize = "GetOSD")]
    GetOsd,
    #[strum(serialize = "UpdateOSD")]
    UpdateOsd,
    ExecCmd,
    #[strum(serialize = "GetPGCount")]
    GetPgCount,
    #[strum(serialize = "PGStatistics")]
    PgStatistics,
    GetRequestStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    ClusterFsid,
    PoolId,
    OsdId,
    RequestFsid,
}

impl Placeholder {
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::ClusterFsid => "{cluster-fsid}",
            Placeholder::PoolId => "{pool-id}",
            Placeholder::OsdId => "{osd-id}",
            Placeholder::RequestFsid => "{request-fsid}",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub method: Method,
    pub version: u32,
    pub pattern: &'static str,
}

/// A route with every placeholder substituted. Never shares storage with the catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundRoute {
    pub name: RouteName,
    pub method: Method,
    pub version: u32,
    pub path: String,
}

impl Route {
    pub fn new(name: RouteName, method: Method, version: u32, pattern: &'static str) -> Self {
        Self {
            name,
            method,
            version,
            pattern,
        }
    }

    /// Substitute each binding once. Values are inserted verbatim and must already be URL-safe.
    pub fn bind(&self, bindings: &[(Placeholder, &str)]) -> Result<BoundRoute, Error> {
        let mut path = self.pattern.to_string();

        for (placeholder, value) in bindings {
            let token = placeholder.token();
            if !path.contains(token) {
                return UnusedBindingSnafu {
                    route: self.name,
                    placeholder: *placeholder,
                }
                .fail();
            }
            path = path.replacen(token, value, 1);
        }

        if has_placeholder(&path) {
            return UnboundPlaceholderSnafu {
                route: self.name,
                path,
            }
            .fail();
        }

        Ok(BoundRoute {
            name: self.name,
            method: self.method.clone(),
            version: self.version,
            path,
        })
    }
}

fn has_placeholder(path: &str) -> bool {
    path.find('{')
        .is_some_and(|open| path[open..].contains('}'))
}

/// Read-only catalog of monitor endpoints, built once per backend.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<RouteName, Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    pub fn new() -> Self {
        Self::from_routes(RouteName::iter().map(default_route))
    }

    pub fn from_routes<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        Self {
            routes: routes.into_iter().map(|r| (r.name, r)).collect(),
        }
    }

    pub fn get(&self, name: RouteName) -> Result<&Route, Error> {
        self.routes.get(&name).context(UnknownRouteSnafu {
            name: name.to_string(),
        })
    }

    /// Look a route up by its catalog name, e.g. `"GetOSDs"`.
    pub fn lookup(&self, name: &str) -> Result<&Route, Error> {
        let parsed = RouteName::from_str(name)
            .ok()
            .context(UnknownRouteSnafu { name })?;
        self.get(parsed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        RouteName::iter().filter_map(|name| self.routes.get(&name))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn default_route(name: RouteName) -> Route {
    match name {
        RouteName::CreatePool => Route::new(name, Method::POST, 2, "cluster/{cluster-fsid}/pool"),
        RouteName::GetPools => Route::new(name, Method::GET, 2, "cluster/{cluster-fsid}/pool"),
        RouteName::UpdatePool => Route::new(
            name,
            Method::PATCH,
            2,
            "cluster/{cluster-fsid}/pool/{pool-id}",
        ),
        RouteName::RemovePool => Route::new(
            name,
            Method::DELETE,
            2,
            "cluster/{cluster-fsid}/pool/{pool-id}",
        ),
        RouteName::GetOsds => Route::new(name, Method::GET, 2, "cluster/{cluster-fsid}/osd"),
        RouteName::GetOsd => Route::new(
            name,
            Method::GET,
            2,
            "cluster/{cluster-fsid}/osd/{osd-id}",
        ),
        RouteName::UpdateOsd => Route::new(
            name,
            Method::PATCH,
            2,
            "cluster/{cluster-fsid}/osd/{osd-id}",
        ),
        RouteName::ExecCmd => Route::new(name, Method::POST, 2, "cluster/{cluster-fsid}/cli"),
        RouteName::GetPgCount => Route::new(
            name,
            Method::GET,
            1,
            "cluster/{cluster-fsid}/health_counters",
        ),
        RouteName::PgStatistics => Route::new(
            name,
            Method::GET,
            2,
            "cluster/{cluster-fsid}/sync_object/pg_summary",
        ),
        RouteName::GetRequestStatus => {
            Route::new(name, Method::GET, 2, "request/{request-fsid}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::error::ErrorKind;

    const FSID: &str = "00000000-0000-0000-0000-0000000000aa";

    #[test]
    fn test_catalog_has_every_route() {
        let table = RouteTable::new();
        assert_eq!(table.len(), RouteName::iter().count());
        for name in RouteName::iter() {
            assert_eq!(table.get(name).unwrap().name, name);
        }
    }

    #[test]
    fn test_lookup_by_catalog_name() {
        let table = RouteTable::new();
        let route = table.lookup("GetOSDs").unwrap();
        assert_eq!(route.name, RouteName::GetOsds);
        assert_eq!(route.method, Method::GET);

        let err = table.lookup("GetClusters").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Programmer);
    }

    #[test]
    fn test_get_missing_route_is_programmer_error() {
        let table = RouteTable::from_routes([default_route(RouteName::GetPools)]);
        let err = table.get(RouteName::CreatePool).unwrap_err();
        assert!(matches!(err, Error::UnknownRoute { ref name } if name == "CreatePool"));
    }

    #[test]
    fn test_bind_replaces_all_placeholders() {
        let table = RouteTable::new();
        let route = table.get(RouteName::UpdatePool).unwrap();

        let bound = route
            .bind(&[(Placeholder::ClusterFsid, FSID), (Placeholder::PoolId, "3")])
            .unwrap();

        assert_eq!(bound.path, format!("cluster/{FSID}/pool/3"));
        assert_eq!(bound.method, Method::PATCH);
        assert_eq!(bound.version, 2);
        assert!(!bound.path.contains('{'));
    }

    #[test]
    fn test_bind_leaves_catalog_untouched() {
        let table = RouteTable::new();
        let route = table.get(RouteName::GetOsd).unwrap();

        let first = route
            .bind(&[(Placeholder::ClusterFsid, FSID), (Placeholder::OsdId, "1")])
            .unwrap();
        let second = route
            .bind(&[(Placeholder::ClusterFsid, FSID), (Placeholder::OsdId, "2")])
            .unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(
            table.get(RouteName::GetOsd).unwrap().pattern,
            "cluster/{cluster-fsid}/osd/{osd-id}"
        );
    }

    #[test]
    fn test_bind_in_parallel_yields_independent_routes() {
        let table = std::sync::Arc::new(RouteTable::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let table = table.clone();
                std::thread::spawn(move || {
                    let id = i.to_string();
                    table
                        .get(RouteName::RemovePool)
                        .unwrap()
                        .bind(&[(Placeholder::ClusterFsid, FSID), (Placeholder::PoolId, id.as_str())])
                        .unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let bound = handle.join().unwrap();
            assert_eq!(bound.path, format!("cluster/{FSID}/pool/{i}"));
        }
        assert_eq!(
            table.get(RouteName::RemovePool).unwrap().pattern,
            "cluster/{cluster-fsid}/pool/{pool-id}"
        );
    }

    #[test]
    fn test_bind_detects_unbound_placeholder() {
        let table = RouteTable::new();
        let err = table
            .get(RouteName::UpdateOsd)
            .unwrap()
            .bind(&[(Placeholder::ClusterFsid, FSID)])
            .unwrap_err();

        assert!(matches!(err, Error::UnboundPlaceholder { route: RouteName::UpdateOsd, .. }));
        assert_eq!(err.kind(), ErrorKind::Programmer);
    }

    #[test]
    fn test_bind_rejects_binding_not_in_pattern() {
        let table = RouteTable::new();
        let err = table
            .get(RouteName::GetPools)
            .unwrap()
            .bind(&[(Placeholder::ClusterFsid, FSID), (Placeholder::OsdId, "1")])
            .unwrap_err();

        assert!(matches!(
            err,
            Error::UnusedBinding {
                placeholder: Placeholder::OsdId,
                ..
            }
        ));
    }

    #[test]
    fn test_placeholder_tokens() {
        assert_eq!(Placeholder::ClusterFsid.to_string(), "{cluster-fsid}");
        assert_eq!(Placeholder::RequestFsid.to_string(), "{request-fsid}");
    }
}

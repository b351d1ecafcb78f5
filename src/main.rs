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

use cephapi::types::pool::NewPool;
use cephapi::types::route::RouteTable;
use cephapi::{Backend, CephApi, Config, RequestContext};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use uuid::Uuid;

shadow_rs::shadow!(build);

#[derive(Parser)]
#[command(name = "cephapi")]
#[command(about = "Ceph monitor management API client", long_about = None)]
#[command(version = build::PKG_VERSION, long_version = build::CLAP_LONG_VERSION)]
struct Cli {
    /// YAML settings file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Monitor host to talk to
    #[arg(short, long, global = true, default_value = "127.0.0.1")]
    mon: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the endpoint catalog, or one entry of it
    Routes {
        /// Catalog name, e.g. `GetOSDs`
        name: Option<String>,
    },

    /// List pools
    Pools {
        /// Cluster name or fsid
        cluster: String,
    },

    /// Create a pool and wait until the monitor has applied it
    CreatePool {
        /// Cluster name, as registered in the config
        cluster: String,
        name: String,
        #[arg(long, default_value_t = 128)]
        pg_num: u32,
        #[arg(long, default_value_t = 3)]
        replicas: u32,
        #[arg(long, default_value_t = 0)]
        quota_max_objects: u64,
        #[arg(long, default_value_t = 0)]
        quota_max_bytes: u64,
    },

    /// Patch pool attributes, e.g. `--set size=2`
    UpdatePool {
        cluster: String,
        pool_id: u32,
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        params: Vec<String>,
    },

    /// Delete a pool
    RemovePool {
        cluster: String,
        pool_name: String,
        pool_id: u32,
    },

    /// List OSDs
    Osds { cluster: String },

    /// Show one OSD
    Osd { cluster: String, osd_id: u32 },

    /// Patch OSD attributes, e.g. `--set in=false`
    UpdateOsd {
        cluster: String,
        osd_id: u32,
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        params: Vec<String>,
    },

    /// Placement group counts per severity
    PgCount { cluster: String },

    /// Placement group state summary
    PgSummary { cluster: String },

    /// Run a monitor command, e.g. `exec c1 osd pool ls`
    Exec {
        cluster: String,
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cephapi::init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).await?,
        None => Config::default(),
    };

    if let Commands::Routes { name } = &cli.command {
        let table = RouteTable::new();
        let routes = match name {
            Some(name) => vec![table.lookup(name)?],
            None => table.iter().collect(),
        };
        for route in routes {
            println!(
                "{:<18} {:<7} v{} {}",
                route.name.as_ref(),
                route.method.as_str(),
                route.version,
                route.pattern
            );
        }
        return Ok(());
    }

    let api = CephApi::from_config(config)?;
    let cancel = CancellationToken::new();
    let rctx =
        RequestContext::new(format!("cli-{}", Uuid::new_v4())).with_cancellation(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            cancel.cancel();
        }
    });

    let mon = cli.mon.as_str();
    match cli.command {
        Commands::Routes { .. } => {}
        Commands::Pools { cluster } => {
            let id = cluster_id(&api, &cluster).await?;
            print_json(&api.get_pools(mon, id, &rctx).await?)?;
        }
        Commands::CreatePool {
            cluster,
            name,
            pg_num,
            replicas,
            quota_max_objects,
            quota_max_bytes,
        } => {
            let pool = NewPool::new(name, pg_num, replicas)
                .with_quota(quota_max_objects, quota_max_bytes);
            api.create_pool(mon, &cluster, &pool, &rctx).await?;
        }
        Commands::UpdatePool {
            cluster,
            pool_id,
            params,
        } => {
            let id = cluster_id(&api, &cluster).await?;
            api.update_pool(mon, id, pool_id, &parse_params(&params)?, &rctx)
                .await?;
        }
        Commands::RemovePool {
            cluster,
            pool_name,
            pool_id,
        } => {
            let id = cluster_id(&api, &cluster).await?;
            api.remove_pool(mon, id, &cluster, &pool_name, pool_id, &rctx)
                .await?;
        }
        Commands::Osds { cluster } => {
            let id = cluster_id(&api, &cluster).await?;
            print_json(&api.get_osds(mon, id, &rctx).await?)?;
        }
        Commands::Osd { cluster, osd_id } => {
            let id = cluster_id(&api, &cluster).await?;
            print_json(&api.get_osd(mon, id, osd_id, &rctx).await?)?;
        }
        Commands::UpdateOsd {
            cluster,
            osd_id,
            params,
        } => {
            let id = cluster_id(&api, &cluster).await?;
            api.update_osd(mon, id, osd_id, &parse_params(&params)?, &rctx)
                .await?;
        }
        Commands::PgCount { cluster } => {
            let id = cluster_id(&api, &cluster).await?;
            print_json(&api.get_pg_count(mon, id, &rctx).await?)?;
        }
        Commands::PgSummary { cluster } => {
            let id = cluster_id(&api, &cluster).await?;
            print_json(&api.get_pg_summary(mon, id, &rctx).await?)?;
        }
        Commands::Exec { cluster, command } => {
            let id = cluster_id(&api, &cluster).await?;
            print!("{}", api.exec_cmd(mon, id, &command.join(" "), &rctx).await?);
        }
    }

    Ok(())
}

/// Accept either a literal fsid or a cluster name known to the catalog.
async fn cluster_id(api: &CephApi, cluster: &str) -> Result<Uuid, cephapi::Error> {
    match Uuid::parse_str(cluster) {
        Ok(id) => Ok(id),
        Err(_) => api.resolve_cluster(cluster).await,
    }
}

/// `key=value` pairs; values that parse as JSON keep their type, anything else is a string.
fn parse_params(pairs: &[String]) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    let mut params = Map::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            return Err(format!("expected KEY=VALUE, got '{pair}'").into());
        };
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        params.insert(key.to_string(), value);
    }
    Ok(params)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

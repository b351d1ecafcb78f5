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

//! Backend adapter for the Ceph monitor management API.
//!
//! [`CephApi`] implements [`Backend`] by translating each operation into
//! HTTP/JSON calls against a monitor host, waiting on asynchronous requests
//! until the monitor reports them complete.

use tracing_subscriber::EnvFilter;

pub mod backend;
pub mod catalog;
pub mod config;
pub mod context;
pub mod poller;
pub mod transport;
pub mod types;


pub use backend::{Backend, CephApi};
pub use config::Config;
pub use context::{Context, RequestContext};
pub use types::error::{Error, ErrorKind};

/// Install the global fmt subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();
}

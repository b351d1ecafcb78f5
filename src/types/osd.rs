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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OSD record from the `osd` endpoints. Only the commonly used fields are typed.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Osd {
    pub id: i64,

    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(default)]
    pub up: bool,

    #[serde(default, rename = "in")]
    pub is_in: bool,

    #[serde(default)]
    pub reweight: f64,

    #[serde(default)]
    pub server: Option<String>,

    #[serde(default)]
    pub pools: Vec<i64>,

    #[serde(default)]
    pub public_addr: Option<String>,

    #[serde(default)]
    pub cluster_addr: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

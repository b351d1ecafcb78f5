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

//! Argument and result types of the backend operations that this adapter
//! accepts but does not forward to the monitor.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mon {
    pub node: String,
    pub public_ip4: String,
    pub cluster_ip4: String,
}

/// A disk to be turned into an OSD on a node.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OsdSpec {
    pub node: String,
    pub public_ip4: String,
    pub cluster_ip4: String,
    pub device: String,
    pub fs_type: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUtilization {
    pub total: i64,
    pub used: i64,
    pub available: i64,
    pub percent_used: f64,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OsdDetails {
    pub name: String,
    pub id: u32,
    pub available: u64,
    pub used: u64,
    pub used_percent: u64,
}

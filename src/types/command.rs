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

/// Body posted to the `cli` endpoint.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CommandRequest {
    pub command: Vec<String>,
}

impl CommandRequest {
    /// Tokenise on ASCII whitespace. Quoting is not understood, so an argument
    /// cannot itself contain a space.
    pub fn parse(cmd: &str) -> Self {
        Self {
            command: cmd.split_ascii_whitespace().map(str::to_owned).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CommandResponse {
    pub status: i64,

    #[serde(default)]
    pub out: String,

    #[serde(default)]
    pub error: String,
}

impl CommandResponse {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

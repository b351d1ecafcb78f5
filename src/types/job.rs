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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Body of a `202 Accepted` reply to a mutating request.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AsyncJobHandle {
    pub request_id: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Display)]
#[serde(rename_all = "kebab-case")]
pub enum JobState {
    #[strum(serialize = "submitted")]
    Submitted,

    #[strum(serialize = "in-progress")]
    InProgress,

    #[strum(serialize = "complete")]
    Complete,

    #[serde(other)]
    #[strum(serialize = "unknown")]
    Unknown,
}

/// Server-side view of an async request, as returned by `GET request/{request-fsid}`.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct JobStatus {
    #[serde(default)]
    pub id: Option<String>,

    pub state: JobState,

    #[serde(default)]
    pub error: bool,

    #[serde(default)]
    pub error_message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobStatus {
    /// Only `complete` ends polling; every other state keeps the job alive.
    pub fn is_complete(&self) -> bool {
        self.state == JobState::Complete
    }

    pub fn is_failed(&self) -> bool {
        self.is_complete() && self.error
    }
}

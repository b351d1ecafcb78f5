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
use crate::context::RequestContext;
use crate::types::command::{CommandRequest, CommandResponse};
use crate::types::error::{
    CommandFailedSnafu, EmptyCommandSnafu, Error, OperationSnafu, RemoteSnafu,
};
use crate::types::route::{Placeholder, RouteName};
use http::StatusCode;
use snafu::futures::TryFutureExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Run a monitor command through the `cli` endpoint and return its stdout.
///
/// The command is split on whitespace, so arguments containing spaces cannot
/// be expressed. Unlike other mutations, only `200 OK` is accepted here.
pub(crate) async fn exec_cmd(
    api: &CephApi,
    mon: &str,
    cluster_id: Uuid,
    cmd: &str,
    rctx: &RequestContext,
) -> Result<String, Error> {
    let request = CommandRequest::parse(cmd);
    let fsid = cluster_id.to_string();
    let command = request.command.join(" ");

    async {
        if request.is_empty() {
            return EmptyCommandSnafu.fail();
        }

        let resp = api
            .context()
            .send_json(
                RouteName::ExecCmd,
                mon,
                &[(Placeholder::ClusterFsid, fsid.as_str())],
                &request,
                rctx,
            )
            .await?;

        if resp.status != StatusCode::OK {
            return RemoteSnafu {
                url: resp.url.clone(),
                status: resp.status,
                body: resp.text(),
            }
            .fail();
        }

        let reply: CommandResponse = resp.json()?;
        if !reply.is_success() {
            warn!(ctxt = rctx.id(), "command '{}' exited with {}", command, reply.status);
            return CommandFailedSnafu {
                command: command.clone(),
                status: reply.status,
                stderr: reply.error,
            }
            .fail();
        }

        debug!(ctxt = rctx.id(), "command '{}' succeeded", command);
        Ok::<_, Error>(reply.out)
    }
    .context(OperationSnafu {
        op: "exec",
        target: format!("'{command}' on cluster {cluster_id}"),
    })
    .await
}

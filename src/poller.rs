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

use crate::context::{ApiResponse, Context, RequestContext};
use crate::types::error::{CancelledSnafu, DeadlineExceededSnafu, Error, JobFailedSnafu};
use crate::types::job::{AsyncJobHandle, JobStatus};
use crate::types::route::{Placeholder, RouteName};
use std::time::Duration;
use tracing::{debug, warn};

/// Wait for the async job behind an accepted mutation to finish.
///
/// The response body must carry an [`AsyncJobHandle`]. The job status is polled
/// every `pollIntervalMs` until it reaches `complete`; a completed job with
/// `error == true` becomes [`Error::JobFailed`]. Polling stops early when the
/// request context is cancelled, when the poll deadline passes, or on the
/// first failed status query.
pub async fn wait_for_completion(
    ctx: &Context,
    mon: &str,
    accepted: &ApiResponse,
    rctx: &RequestContext,
) -> Result<JobStatus, Error> {
    let handle: AsyncJobHandle = accepted.json()?;
    let interval = ctx.config().poll_interval();
    let deadline = rctx.poll_timeout().or_else(|| ctx.config().poll_timeout());

    debug!(
        ctxt = rctx.id(),
        request_id = %handle.request_id,
        ?interval,
        ?deadline,
        "waiting for async request"
    );

    let poll = poll_request(ctx, mon, &handle.request_id, interval, rctx);
    match deadline {
        Some(timeout) => tokio::time::timeout(timeout, poll).await.map_err(|_| {
            DeadlineExceededSnafu {
                request_id: &handle.request_id,
                timeout,
            }
            .build()
        })?,
        None => poll.await,
    }
}

async fn poll_request(
    ctx: &Context,
    mon: &str,
    request_id: &str,
    interval: Duration,
    rctx: &RequestContext,
) -> Result<JobStatus, Error> {
    loop {
        tokio::select! {
            biased;
            _ = rctx.cancel_token().cancelled() => {
                return CancelledSnafu { what: format!("request {request_id}") }.fail();
            }
            _ = tokio::time::sleep(interval) => {}
        }

        let status: JobStatus = ctx
            .get_json(
                RouteName::GetRequestStatus,
                mon,
                &[(Placeholder::RequestFsid, request_id)],
                rctx,
            )
            .await?;

        debug!(ctxt = rctx.id(), request_id, state = %status.state, "request status");

        if status.is_failed() {
            warn!(
                ctxt = rctx.id(),
                request_id,
                "request failed: {}",
                status.error_message
            );
            return JobFailedSnafu {
                request_id,
                message: status.error_message,
            }
            .fail();
        }
        if status.is_complete() {
            return Ok(status);
        }
    }
}

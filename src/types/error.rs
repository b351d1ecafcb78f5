// Copyright 2025 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::route::{Placeholder, RouteName};
use http::{Method, StatusCode};
use snafu::Snafu;
use std::path::PathBuf;
use std::time::Duration;
use strum::Display;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to encode request body for {route}: {source}"))]
    Encode {
        route: RouteName,
        source: serde_json::Error,
    },

    #[snafu(display("{method} {url} failed: {source}"))]
    Transport {
        method: Method,
        url: String,
        source: reqwest::Error,
    },

    #[snafu(display("failed to build http client: {source}"))]
    HttpClient { source: reqwest::Error },

    #[snafu(display("failed to read response body from {url}: {source}"))]
    ReadBody { url: String, source: reqwest::Error },

    #[snafu(display("failed to decode response from {url}: {source}"))]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[snafu(display("{url} returned unexpected status {status}: {body}"))]
    Remote {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[snafu(display("unexpected response schema from {url}: {message}"))]
    Schema { url: String, message: String },

    #[snafu(display("request {request_id} failed: {message}"))]
    JobFailed { request_id: String, message: String },

    #[snafu(display("{resource} not found"))]
    NotFound { resource: String },

    #[snafu(display("command '{command}' exited with status {status}: {stderr}"))]
    CommandFailed {
        command: String,
        status: i64,
        stderr: String,
    },

    #[snafu(display("empty command"))]
    EmptyCommand,

    #[snafu(display("cluster catalog error: {message}"))]
    Datastore { message: String },

    #[snafu(display("unknown route '{name}'"))]
    UnknownRoute { name: String },

    #[snafu(display("unsupported method {method} for route {route}"))]
    UnsupportedMethod { route: RouteName, method: Method },

    #[snafu(display("route {route} left placeholder unbound in '{path}'"))]
    UnboundPlaceholder { route: RouteName, path: String },

    #[snafu(display("route {route} has no placeholder {placeholder}"))]
    UnusedBinding {
        route: RouteName,
        placeholder: Placeholder,
    },

    #[snafu(display("{what} cancelled"))]
    Cancelled { what: String },

    #[snafu(display("request {request_id} did not complete within {timeout:?}"))]
    DeadlineExceeded {
        request_id: String,
        timeout: Duration,
    },

    #[snafu(display("failed to read config {}: {source}", path.display()))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse config {}: {source}", path.display()))]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[snafu(display("invalid config: {source}"))]
    ConfigSyntax { source: serde_yaml_ng::Error },

    #[snafu(display("invalid config: {message}"))]
    InvalidConfig { message: String },

    #[snafu(display("{op} {target}: {source}"))]
    Operation {
        op: &'static str,
        target: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
}

/// Coarse classification of [`Error`], stable across wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    Encode,
    Transport,
    Decode,
    Remote,
    Schema,
    JobFailed,
    NotFound,
    CommandFailed,
    Datastore,
    Programmer,
    Cancelled,
    DeadlineExceeded,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Encode { .. } => ErrorKind::Encode,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::ReadBody { .. } | Error::Decode { .. } => ErrorKind::Decode,
            Error::Remote { .. } => ErrorKind::Remote,
            Error::Schema { .. } => ErrorKind::Schema,
            Error::JobFailed { .. } => ErrorKind::JobFailed,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::CommandFailed { .. } => ErrorKind::CommandFailed,
            Error::Datastore { .. } => ErrorKind::Datastore,
            Error::EmptyCommand
            | Error::UnknownRoute { .. }
            | Error::UnsupportedMethod { .. }
            | Error::UnboundPlaceholder { .. }
            | Error::UnusedBinding { .. } => ErrorKind::Programmer,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            Error::HttpClient { .. }
            | Error::ConfigRead { .. }
            | Error::ConfigParse { .. }
            | Error::ConfigSyntax { .. }
            | Error::InvalidConfig { .. } => ErrorKind::Config,
            Error::Operation { source, .. } => source.kind(),
        }
    }

    /// The innermost error, skipping operation annotations.
    pub fn root(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root(),
            e => e,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

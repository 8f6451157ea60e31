// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The HTTP channel agents are reached through.

use std::future::Future;

use reqwest::{Client, ClientBuilder};
use serde_json::Value;

/// Status code and body of an agent's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

/// Interface for sending requests to agents.
///
/// Implementations only move bytes; status handling and parsing are done by
/// [`Agent`][crate::Agent].
pub trait AgentChannel: Sync {
    /// Error type used by this trait.
    type Err: std::error::Error + Send + Sync + 'static;

    /// Performs a HTTP GET request with provided `url`.
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<ChannelResponse, Self::Err>> + Send;

    /// Performs a HTTP POST request with provided `url`, sending `body` as JSON.
    fn post(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = std::result::Result<ChannelResponse, Self::Err>> + Send;
}

/// [`AgentChannel`] implementation using the [`reqwest`] crate.
pub struct ReqwestAgentChannel(Client);

impl ReqwestAgentChannel {
    /// Construct [`ReqwestAgentChannel`] from [`Client`].
    pub fn new(client: Client) -> Self {
        Self(client)
    }

    /// Construct [`ReqwestAgentChannel`] from [`ClientBuilder`].
    pub fn from_builder(builder: ClientBuilder) -> reqwest::Result<Self> {
        Ok(Self(builder.build()?))
    }
}

impl AgentChannel for ReqwestAgentChannel {
    type Err = reqwest::Error;

    async fn get(&self, url: &str) -> reqwest::Result<ChannelResponse> {
        read_response(self.0.get(url).send().await?).await
    }

    async fn post(&self, url: &str, body: &Value) -> reqwest::Result<ChannelResponse> {
        read_response(self.0.post(url).json(body).send().await?).await
    }
}

async fn read_response(response: reqwest::Response) -> reqwest::Result<ChannelResponse> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(ChannelResponse { status, body })
}

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

use bh_von_claims::{ClaimIndex, PresentationProof};
use bherror::{
    traits::{ForeignError as _, PropagateError as _},
    Error as BhError,
};
use serde_json::Value;

use crate::{AgentChannel, AgentEndpoint, ChannelResponse, Error, MessageTemplates, MessageType, Result};

/// Status code of a successful agent response.
const HTTP_OK: u16 = 200;

/// A connected agent: where it listens, how it is reached and its DID.
pub struct Agent<C> {
    endpoint: AgentEndpoint,
    did: String,
    channel: C,
}

impl<C: AgentChannel> Agent<C> {
    /// Connects to the agent at `endpoint`, fetching its DID.
    pub async fn connect(endpoint: AgentEndpoint, channel: C) -> Result<Self> {
        let mut agent = Self {
            endpoint,
            did: String::new(),
            channel,
        };

        let Value::String(did) = agent.get("did").await? else {
            return Err(BhError::root(Error::MalformedResponse(
                agent.endpoint.profile.clone(),
                "DID is not a string".to_owned(),
            )));
        };
        tracing::debug!(profile = %agent.endpoint.profile, %did, "connected to agent");

        agent.did = did;
        Ok(agent)
    }

    /// The agent's DID.
    pub fn did(&self) -> &str {
        &self.did
    }

    /// Where the agent listens.
    pub fn endpoint(&self) -> &AgentEndpoint {
        &self.endpoint
    }

    /// Issues a GET request for the API resource at `suffix`, returning the JSON response.
    pub async fn get(&self, suffix: &str) -> Result<Value> {
        let url = self.endpoint.url_for(Some(suffix))?;
        tracing::debug!(profile = %self.endpoint.profile, url = url.as_str(), "GET");

        let response = self
            .channel
            .get(url.as_str())
            .await
            .foreign_err(|| Error::Transport(url.as_str().to_owned()))?;

        self.parse_response(response)
    }

    /// Forms a message of type `msg_type` from its template and `args`, posts it to the agent and
    /// returns the JSON response.
    ///
    /// With a `proxy_did`, the agent forwards the message to the agent with that DID.
    pub async fn post(
        &self,
        proxy_did: Option<&str>,
        msg_type: MessageType,
        templates: &MessageTemplates,
        args: &[&str],
    ) -> Result<Value> {
        let message = msg_type.form(templates.get(msg_type)?, proxy_did, args)?;
        let url = self.endpoint.url_for(Some(msg_type.slug()))?;
        tracing::debug!(
            profile = %self.endpoint.profile,
            %msg_type,
            proxy_did,
            "POST"
        );

        let response = self
            .channel
            .post(url.as_str(), &Value::Object(message))
            .await
            .foreign_err(|| Error::Transport(url.as_str().to_owned()))?;

        self.parse_response(response)
    }

    fn parse_response(&self, response: ChannelResponse) -> Result<Value> {
        if response.status != HTTP_OK {
            return Err(BhError::root(Error::UnexpectedStatus(
                self.endpoint.profile.clone(),
                response.status,
            )));
        }

        serde_json::from_str(&response.body).foreign_err(|| {
            Error::MalformedResponse(self.endpoint.profile.clone(), "not JSON".to_owned())
        })
    }
}

/// Extracts the claim index from an agent's response to a `claim-request`.
pub fn claim_index(mut response: Value) -> Result<ClaimIndex> {
    let claims = response
        .get_mut("claims")
        .map(Value::take)
        .ok_or_else(|| BhError::root(Error::MalformedResponse(
            "claim-request".to_owned(),
            "no `claims`".to_owned(),
        )))?;

    ClaimIndex::from_value(claims).with_err(|| {
        Error::MalformedResponse("claim-request".to_owned(), "invalid `claims`".to_owned())
    })
}

/// Extracts the presentation proof from an agent's response to a `proof-request`.
pub fn presentation_proof(response: Value) -> Result<PresentationProof> {
    PresentationProof::from_value(response).with_err(|| {
        Error::MalformedResponse("proof-request".to_owned(), "invalid proof".to_owned())
    })
}

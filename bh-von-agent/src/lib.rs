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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate provides the client side of the VON agent message protocol.
//!
//! Agents are addressed through an [`AgentDirectory`] of [`AgentEndpoint`]s, spoken to through an
//! [`AgentChannel`] and sent messages of a [`MessageType`] formed from caller-supplied
//! [`MessageTemplates`].  Responses come back as JSON, ready to be turned into the typed records
//! of [`bh_von_claims`] with [`claim_index`] and [`presentation_proof`].
//!
//! # Example
//!
//! ```no_run
//! use bh_von_agent::{Agent, AgentDirectory, MessageTemplates, MessageType, ReqwestAgentChannel};
//! use bh_von_claims::{proto, SchemaKey};
//!
//! # async fn run() -> bh_von_agent::Result<()> {
//! let directory = AgentDirectory::from_properties(
//!     "agent.sri.host=localhost\nagent.sri.port=8001\n",
//! )?;
//! let sri = Agent::connect(
//!     directory.for_profile("sri")?.clone(),
//!     ReqwestAgentChannel::new(reqwest::Client::new()),
//! )
//! .await?;
//!
//! let mut templates = MessageTemplates::new();
//! templates.insert(
//!     MessageType::SchemaLookup,
//!     r#"{ "type": "schema-lookup", "data": { "schema": %s } }"#,
//! );
//!
//! let key = SchemaKey::new(sri.did(), "sri", "1.1");
//! let selector = serde_json::to_string(&proto::SchemaSelector::from(&key)).unwrap();
//! let schema = sri
//!     .post(None, MessageType::SchemaLookup, &templates, &[&selector])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub use agent::{claim_index, presentation_proof, Agent};
pub use channel::{AgentChannel, ChannelResponse, ReqwestAgentChannel};
pub use config::{AgentDirectory, AgentEndpoint};
pub use error::{Error, Result};
pub use message::{MessageTemplates, MessageType};

mod agent;
mod channel;
pub mod config;
mod error;
pub mod message;

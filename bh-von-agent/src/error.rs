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

/// Error type defining possible failures when addressing or messaging agents.
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum Error {
    /// The agent directory configuration could not be parsed.
    #[strum(to_string = "Invalid agent configuration: {0}")]
    InvalidConfig(String),

    /// No agent is configured for the profile.
    #[strum(to_string = "Unknown agent profile: {0}")]
    UnknownProfile(String),

    /// The endpoint URL built for an agent is not a valid URI.
    #[strum(to_string = "Invalid agent endpoint: {0}")]
    InvalidEndpoint(String),

    /// No template is registered for the message type.
    #[strum(to_string = "Missing template for message type {0}")]
    MissingTemplate(String),

    /// A message template could not be filled in or does not yield a JSON object.
    #[strum(to_string = "Template error for message type {0}: {1}")]
    Template(String, String),

    /// The request to the agent could not be sent or its response not read.
    #[strum(to_string = "Transport error while calling {0}")]
    Transport(String),

    /// The agent responded with a status other than 200 OK.
    #[strum(to_string = "Agent [{0}] returned HTTP {1}")]
    UnexpectedStatus(String, u16),

    /// The agent response is not the JSON expected.
    #[strum(to_string = "Malformed response from agent [{0}]: {1}")]
    MalformedResponse(String, String),
}

impl bherror::BhError for Error {}

/// Result type used across the crate.
pub type Result<T> = bherror::Result<T, Error>;

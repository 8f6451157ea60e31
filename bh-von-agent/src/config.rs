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

//! Addressing of agents.
//!
//! Agents are identified by a profile (e.g. `bc-registrar`) and reached at a host and port.  The
//! [`AgentDirectory`] holds the endpoints of all known agents and is handed to whatever needs to
//! talk to them; there is no process-wide configuration.

use std::collections::BTreeMap;

use bherror::{traits::ForeignError as _, Error as BhError};
use iref::UriBuf;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prefix of the properties configuring agents, e.g. `agent.sri.host`.
const AGENT_PROPERTY_PREFIX: &str = "agent.";

/// Where an agent listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEndpoint {
    /// Agent profile, used in logging and to look the agent up.
    pub profile: String,
    /// Host name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl AgentEndpoint {
    /// Construct an endpoint for the agent profile.
    pub fn new(profile: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            profile: profile.into(),
            host: host.into(),
            port,
        }
    }

    /// Returns the URL of the agent API resource at `suffix`, e.g. a message type slug.
    ///
    /// The URL has the form `http://{host}:{port}/api/v0/{suffix}?format=json`, with trailing
    /// slashes of the path removed.  No suffix addresses the API root.
    pub fn url_for(&self, suffix: Option<&str>) -> Result<UriBuf> {
        let path = format!("api/v0/{}", suffix.unwrap_or_default());
        let url = format!(
            "http://{}:{}/{}?format=json",
            self.host,
            self.port,
            path.trim_end_matches('/')
        );

        let Ok(uri) = UriBuf::new(url.clone().into_bytes()) else {
            return Err(BhError::root(Error::InvalidEndpoint(url)));
        };
        Ok(uri)
    }
}

/// The endpoints of all known agents, by profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDirectory(BTreeMap<String, AgentEndpoint>);

#[derive(Deserialize)]
struct EndpointSpec {
    host: String,
    port: u16,
}

impl AgentDirectory {
    /// Parse the directory from a JSON object mapping profiles to hosts and ports:
    ///
    /// ```json
    /// { "sri": { "host": "localhost", "port": 8001 } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: BTreeMap<String, EndpointSpec> = serde_json::from_str(json)
            .foreign_err(|| Error::InvalidConfig("expected profiles with host and port".to_owned()))?;

        Ok(specs
            .into_iter()
            .map(|(profile, spec)| AgentEndpoint::new(profile, spec.host, spec.port))
            .collect())
    }

    /// Parse the directory from `key=value` properties, as in the connector configuration file:
    ///
    /// ```properties
    /// agent.sri.host=localhost
    /// agent.sri.port=8001
    /// ```
    ///
    /// Only a subset of the `.properties` format is understood: one `key=value` or `key:value`
    /// per line, with no line continuations or escapes.  A line without a separator is rejected
    /// rather than read as a key with an empty value.  Blank lines, comments (`#` or `!`) and
    /// properties not starting with `agent.` are ignored.  Every configured agent must have both a
    /// host and a port.
    pub fn from_properties(properties: &str) -> Result<Self> {
        let mut hosts = BTreeMap::new();
        let mut ports = BTreeMap::new();

        for line in properties.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once(&['=', ':'][..]) else {
                return Err(BhError::root(Error::InvalidConfig(format!(
                    "not a property: {line}"
                ))));
            };
            let Some(agent_key) = key.trim().strip_prefix(AGENT_PROPERTY_PREFIX) else {
                continue;
            };

            let value = value.trim();
            match agent_key.rsplit_once('.') {
                Some((profile, "host")) => {
                    hosts.insert(profile.to_owned(), value.to_owned());
                }
                Some((profile, "port")) => {
                    let port = value.parse::<u16>().foreign_err(|| {
                        Error::InvalidConfig(format!("invalid port for {profile}: {value}"))
                    })?;
                    ports.insert(profile.to_owned(), port);
                }
                _ => tracing::debug!(key, "ignoring unknown agent property"),
            }
        }

        if let Some(profile) = ports.keys().find(|profile| !hosts.contains_key(*profile)) {
            return Err(BhError::root(Error::InvalidConfig(format!(
                "no host for {profile}"
            ))));
        }

        hosts
            .into_iter()
            .map(|(profile, host)| {
                let Some(port) = ports.get(&profile) else {
                    return Err(BhError::root(Error::InvalidConfig(format!(
                        "no port for {profile}"
                    ))));
                };
                Ok(AgentEndpoint::new(profile, host, *port))
            })
            .collect()
    }

    /// Returns the endpoint of the agent with the profile, ignoring case.
    pub fn for_profile(&self, profile: &str) -> Result<&AgentEndpoint> {
        self.0
            .values()
            .find(|endpoint| endpoint.profile.eq_ignore_ascii_case(profile))
            .ok_or_else(|| BhError::root(Error::UnknownProfile(profile.to_owned())))
    }

    /// Iterate over all endpoints, ordered by profile.
    pub fn iter(&self) -> impl Iterator<Item = &AgentEndpoint> {
        self.0.values()
    }
}

impl FromIterator<AgentEndpoint> for AgentDirectory {
    fn from_iter<T: IntoIterator<Item = AgentEndpoint>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|endpoint| (endpoint.profile.clone(), endpoint))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_message_type() {
        let endpoint = AgentEndpoint::new("sri", "localhost", 8001);

        let url = endpoint.url_for(Some("claim-request")).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8001/api/v0/claim-request?format=json"
        );
    }

    #[test]
    fn test_url_for_strips_trailing_slashes() {
        let endpoint = AgentEndpoint::new("sri", "10.0.0.2", 8001);

        assert_eq!(
            endpoint.url_for(Some("did//")).unwrap().as_str(),
            "http://10.0.0.2:8001/api/v0/did?format=json"
        );
        assert_eq!(
            endpoint.url_for(None).unwrap().as_str(),
            "http://10.0.0.2:8001/api/v0?format=json"
        );
    }

    #[test]
    fn test_url_for_rejects_invalid_host() {
        let endpoint = AgentEndpoint::new("sri", "local host", 8001);

        let err = endpoint.url_for(Some("did")).unwrap_err();

        assert!(matches!(err.error, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_json() {
        let directory = AgentDirectory::from_json(
            r#"{
                "trust-anchor": { "host": "localhost", "port": 8000 },
                "sri": { "host": "localhost", "port": 8001 }
            }"#,
        )
        .unwrap();

        assert_eq!(
            directory.for_profile("sri").unwrap(),
            &AgentEndpoint::new("sri", "localhost", 8001)
        );
        assert_eq!(directory.iter().count(), 2);
    }

    #[test]
    fn test_from_json_rejects_missing_port() {
        let err = AgentDirectory::from_json(r#"{ "sri": { "host": "localhost" } }"#).unwrap_err();

        assert!(matches!(err.error, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_from_properties() {
        let directory = AgentDirectory::from_properties(
            "# agents\n\
             agent.bc-registrar.host=localhost\n\
             agent.bc-registrar.port = 8003\n\
             \n\
             agent.sri.host=10.0.0.2\n\
             agent.sri.port=8001\n\
             agent.sri.wallet=ignored\n\
             logging.level=debug\n",
        )
        .unwrap();

        assert_eq!(
            directory.iter().cloned().collect::<Vec<_>>(),
            [
                AgentEndpoint::new("bc-registrar", "localhost", 8003),
                AgentEndpoint::new("sri", "10.0.0.2", 8001),
            ]
        );
    }

    #[test]
    fn test_from_properties_requires_host_and_port() {
        for properties in [
            "agent.sri.host=localhost",
            "agent.sri.port=8001",
            "agent.sri.host=localhost\nagent.sri.port=http",
            "agent.sri.host",
        ] {
            let err = AgentDirectory::from_properties(properties).unwrap_err();
            assert!(matches!(err.error, Error::InvalidConfig(_)), "{properties}");
        }
    }

    #[test]
    fn test_for_profile_ignores_case() {
        let directory: AgentDirectory = [AgentEndpoint::new("bc-org-book", "localhost", 8002)]
            .into_iter()
            .collect();

        assert_eq!(directory.for_profile("BC-Org-Book").unwrap().port, 8002);

        let err = directory.for_profile("pspc-org-book").unwrap_err();
        assert_eq!(err.error, Error::UnknownProfile("pspc-org-book".to_owned()));
    }
}

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

//! The vocabulary of protocol messages and their construction from templates.

use std::collections::HashMap;

use bh_von_claims::JsonObject;
use bherror::{traits::ForeignError as _, Error as BhError};
use serde_json::Value;

use crate::{Error, Result};

/// Field of a message's `data` object naming the agent to forward the message to.
const PROXY_DID: &str = "proxy-did";

/// Type of a protocol message an agent accepts.
///
/// The slug of a message type names both the agent API resource it is posted to and its
/// template.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum MessageType {
    /// Drop all claims from the agent's wallet.
    ClaimsReset,
    /// Create a claim offer (issuer).
    ClaimOfferCreate,
    /// Store a claim offer (holder-prover).
    ClaimOfferStore,
    /// Create a claim (issuer).
    ClaimCreate,
    /// Store a claim (holder-prover).
    ClaimStore,
    /// Find claims matching schemata, attribute and predicate matches (holder-prover).
    ClaimRequest,
    /// Create a proof from claims found by filter (holder-prover).
    ProofRequest,
    /// Create a proof from claims given by referent (holder-prover).
    ProofRequestByReferent,
    /// Look up a schema on the ledger.
    SchemaLookup,
    /// Verify a proof (verifier).
    VerificationRequest,
}

impl MessageType {
    /// All message types.
    pub const ALL: [MessageType; 10] = [
        Self::ClaimsReset,
        Self::ClaimOfferCreate,
        Self::ClaimOfferStore,
        Self::ClaimCreate,
        Self::ClaimStore,
        Self::ClaimRequest,
        Self::ProofRequest,
        Self::ProofRequestByReferent,
        Self::SchemaLookup,
        Self::VerificationRequest,
    ];

    /// The slug of the message type, e.g. `claim-request`.
    pub fn slug(self) -> &'static str {
        self.into()
    }

    /// Returns the message type with the slug, if any.
    pub fn for_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|msg_type| msg_type.slug() == slug)
    }

    /// Whether an agent may forward a message of this type to another agent.
    pub fn may_proxy(self) -> bool {
        !matches!(self, Self::ClaimsReset)
    }

    /// Forms a message of this type from its template.
    ///
    /// Every `%s` in the template is replaced by the next argument, in order; `%%` stands for a
    /// literal `%`.  No other format specifiers are understood, and the number of `%s` markers must
    /// match the number of arguments.  Arguments are inserted verbatim, so JSON fragments must
    /// already be serialized.  The result must be a JSON object.
    ///
    /// With a `proxy_did`, the message is marked for forwarding by setting `data.proxy-did`.  For
    /// message types that cannot be proxied the DID is ignored with a warning.
    pub fn form(self, template: &str, proxy_did: Option<&str>, args: &[&str]) -> Result<JsonObject> {
        let text = interpolate(template, args)
            .map_err(|reason| BhError::root(Error::Template(self.to_string(), reason)))?;

        let mut message: JsonObject = serde_json::from_str(&text).foreign_err(|| {
            Error::Template(self.to_string(), "result is not a JSON object".to_owned())
        })?;

        if let Some(proxy_did) = proxy_did {
            if !self.may_proxy() {
                tracing::warn!(msg_type = %self, proxy_did, "message type does not accept proxy-did");
                return Ok(message);
            }

            let Some(data) = message.get_mut("data").and_then(Value::as_object_mut) else {
                return Err(BhError::root(Error::Template(
                    self.to_string(),
                    "no `data` object to carry the proxy DID".to_owned(),
                )));
            };
            data.insert(PROXY_DID.to_owned(), proxy_did.into());
        }

        Ok(message)
    }
}

fn interpolate(template: &str, args: &[&str]) -> std::result::Result<String, String> {
    let mut text = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => match args.next() {
                Some(arg) => text.push_str(arg),
                None => return Err("too few arguments".to_owned()),
            },
            Some('%') => text.push('%'),
            other => return Err(format!("unsupported format specifier %{}", other.unwrap_or(' '))),
        }
    }

    if args.next().is_some() {
        return Err("too many arguments".to_owned());
    }
    Ok(text)
}

/// Message templates by message type.
///
/// Templates are loaded by the caller; this crate performs no file access.
#[derive(Debug, Clone, Default)]
pub struct MessageTemplates(HashMap<MessageType, String>);

impl MessageTemplates {
    /// Construct an empty set of templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the template of a message type, returning the one it replaces.
    pub fn insert(&mut self, msg_type: MessageType, template: impl Into<String>) -> Option<String> {
        self.0.insert(msg_type, template.into())
    }

    /// Returns the template of a message type.
    pub fn get(&self, msg_type: MessageType) -> Result<&str> {
        self.0
            .get(&msg_type)
            .map(String::as_str)
            .ok_or_else(|| BhError::root(Error::MissingTemplate(msg_type.to_string())))
    }
}

impl FromIterator<(MessageType, String)> for MessageTemplates {
    fn from_iter<T: IntoIterator<Item = (MessageType, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

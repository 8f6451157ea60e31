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

use std::collections::BTreeMap;

use bherror::traits::ForeignError as _;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
pub use serde_json::{Map, Value};

use crate::{Error, Result, SchemaKey};

/// A JSON object, i.e. a mapping from [`String`] to [`Value`].
pub type JsonObject = Map<String, Value>;

/// Helper macro with the same syntax as [`serde_json::json`] specialized for
/// constructing JSON objects.
///
/// It will construct a more specific type ([`serde_json::Map<String,Value>`])
/// than just [`serde_json::Value`] when constructing an object, and panic if
/// the syntax is valid JSON but not an object.
#[macro_export]
macro_rules! json_object {
    ($stuff:tt) => {
        match ::serde_json::json!($stuff) {
            ::serde_json::Value::Object(o) => o,
            _ => unreachable!("JSON literal wasn't an object"),
        }
    };
}

/// Claim records per attribute slot, in the order the agent listed the slots.
pub type ClaimSlots = IndexMap<String, Vec<ClaimRecord>>;

/// Claims found by a holder-prover agent, grouped by the requested attribute slot they satisfy.
///
/// This is the structure at `["claims"]` of the agent's response to a `claim-request` message:
///
/// ```json
/// {
///     "attrs": {
///         "attr0_uuid": [
///             {
///                 "referent": "claim::00000000-0000-0000-0000-000000000000",
///                 "attrs": { "attr0": "2", "attr1": "Hello" },
///                 "issuer_did": "Q4zqM7aXqm7gDQkUVLng9h",
///                 "schema_key": { "did": "Q4zqM7aXqm7gDQkUVLng9h", "name": "bc-reg", "version": "1.0" },
///                 "revoc_reg_seq_no": null
///             }
///         ]
///     }
/// }
/// ```
///
/// The same claim may be listed under several slots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimIndex {
    /// Claim records per attribute slot, `None` if the index has no `attrs` section at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<ClaimSlots>,
    /// Any other sections of the index (e.g. `predicates`), kept as received.
    #[serde(flatten)]
    pub other: JsonObject,
}

impl ClaimIndex {
    /// Parse a claim index from its JSON form.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).foreign_err(|| Error::MalformedClaimIndex)
    }

    /// Serialize the claim index back into its JSON form.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).foreign_err(|| Error::MalformedClaimIndex)
    }

    /// Claim records per attribute slot, if the index has an `attrs` section.
    pub fn slots(&self) -> Option<&ClaimSlots> {
        self.attrs.as_ref()
    }

    /// Iterate over every claim record of every slot, in slot order.
    pub(crate) fn records(&self) -> impl Iterator<Item = &ClaimRecord> {
        self.attrs.iter().flat_map(ClaimSlots::values).flatten()
    }
}

/// A single claim held in a holder-prover's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Wallet identifier of the claim.
    pub referent: String,
    /// Raw attribute values by attribute name.
    pub attrs: JsonObject,
    /// DID of the claim issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_did: Option<String>,
    /// Key of the schema the claim was issued against.
    pub schema_key: SchemaKey,
    /// Revocation registry sequence number, if the claim is revocable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoc_reg_seq_no: Option<u64>,
    /// Any other fields of the record, kept as received.
    #[serde(flatten)]
    pub other: JsonObject,
}

impl ClaimRecord {
    /// Construct a claim record with no issuer or revocation information.
    pub fn new(referent: impl Into<String>, attrs: JsonObject, schema_key: SchemaKey) -> Self {
        Self {
            referent: referent.into(),
            attrs,
            issuer_did: None,
            schema_key,
            revoc_reg_seq_no: None,
            other: JsonObject::new(),
        }
    }
}

/// A presentation proof as returned by a holder-prover agent in response to a `proof-request`.
///
/// Only the parts needed to recover revealed attributes are modelled; each sub-proof is kept as
/// received and navigated on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationProof {
    /// The proof itself.
    pub proof: ProofBody,
    /// Any other fields of the response (e.g. the originating `proof-req`).
    #[serde(flatten)]
    pub other: JsonObject,
}

/// The body of a [`PresentationProof`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofBody {
    /// One sub-proof per disclosed referent.
    pub proofs: BTreeMap<String, Value>,
    /// Any other fields of the proof (e.g. `aggregated_proof`, `requested_proof`).
    #[serde(flatten)]
    pub other: JsonObject,
}

impl PresentationProof {
    /// Parse a presentation proof from its JSON form.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).foreign_err(|| {
            Error::MalformedProof("expected an object with `proof.proofs`".to_owned())
        })
    }
}

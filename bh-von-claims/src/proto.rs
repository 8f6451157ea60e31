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

//! Builders for the request fragments embedded in protocol messages.
//!
//! Message templates expect these fragments, serialized as JSON, at fixed keys of the request
//! envelope: a list of [`SchemaSelector`]s at [`SCHEMATA`], [`AttrMatch`]es at [`ATTR_MATCH`],
//! [`PredicateMatch`]es at [`PREDICATE_MATCH`] and [`RequestedAttrs`] at [`REQUESTED_ATTRS`].
//! Field names and nesting are part of the wire protocol and must not change.

use serde::{Deserialize, Serialize};

use crate::{json_object, schema_key::ORIGIN_DID, JsonObject, SchemaKey};

/// Envelope key of the schema selector list.
pub const SCHEMATA: &str = "schemata";
/// Envelope key of the attribute match list.
pub const ATTR_MATCH: &str = "attr-match";
/// Envelope key of the predicate match list.
pub const PREDICATE_MATCH: &str = "predicate-match";
/// Envelope key of the requested attributes list.
pub const REQUESTED_ATTRS: &str = "requested_attrs";

/// A schema key in the form the message protocol expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSelector {
    /// DID of the schema originator.
    #[serde(rename = "origin-did")]
    pub origin_did: String,
    /// Schema name.
    pub name: String,
    /// Schema version.
    pub version: String,
}

impl From<&SchemaKey> for SchemaSelector {
    fn from(key: &SchemaKey) -> Self {
        Self {
            origin_did: key.origin_did().to_owned(),
            name: key.name().to_owned(),
            version: key.version().to_owned(),
        }
    }
}

/// An `attr-match` entry: attribute values a claim of the schema must carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrMatch {
    /// Schema the match applies to.
    pub schema: SchemaSelector,
    /// Attribute values to match, by attribute name.
    #[serde(rename = "match")]
    pub matches: JsonObject,
}

/// A single predicate of a [`PredicateMatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateMatchEntry {
    /// Attribute name.
    pub attr: String,
    /// Predicate type, e.g. `>=`.  The vocabulary is defined by the agents.
    #[serde(rename = "pred-type")]
    pub pred_type: String,
    /// Comparison value.
    pub value: i64,
}

/// A `predicate-match` entry: predicates a claim of the schema must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateMatch {
    /// Schema the predicates apply to.
    pub schema: SchemaSelector,
    /// The predicates.
    #[serde(rename = "match")]
    pub matches: Vec<PredicateMatchEntry>,
}

/// A `requested_attrs` entry: attributes to request from claims of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedAttrs {
    /// Schema to request attributes from.
    pub schema: SchemaSelector,
    /// Attribute names; empty requests all attributes of the schema.
    pub names: Vec<String>,
}

/// Returns the `schemata` list for the given schema keys, in input order.
pub fn schema_selectors<'a>(keys: impl IntoIterator<Item = &'a SchemaKey>) -> Vec<SchemaSelector> {
    keys.into_iter().map(SchemaSelector::from).collect()
}

/// Returns an `attr-match` entry for the schema.
pub fn attr_match(key: &SchemaKey, matches: JsonObject) -> AttrMatch {
    AttrMatch {
        schema: key.into(),
        matches,
    }
}

/// Returns one predicate for the `match` list of a [`PredicateMatch`].
///
/// The predicate type is passed through as is.
pub fn predicate_match_entry(
    attr: impl Into<String>,
    pred_type: impl Into<String>,
    value: i64,
) -> PredicateMatchEntry {
    PredicateMatchEntry {
        attr: attr.into(),
        pred_type: pred_type.into(),
        value,
    }
}

/// Returns a `predicate-match` entry for the schema.
pub fn predicate_match(key: &SchemaKey, matches: Vec<PredicateMatchEntry>) -> PredicateMatch {
    PredicateMatch {
        schema: key.into(),
        matches,
    }
}

/// Returns a `requested_attrs` entry for the schema.
///
/// No attribute names requests all attributes of the schema.
pub fn requested_attrs<S: Into<String>>(
    key: &SchemaKey,
    names: impl IntoIterator<Item = S>,
) -> RequestedAttrs {
    RequestedAttrs {
        schema: key.into(),
        names: names.into_iter().map(Into::into).collect(),
    }
}

/// Returns the `requested_attrs` object of a raw proof request, restricting every attribute to
/// claims of the schema:
///
/// ```json
/// { "legal_name": { "name": "legal_name", "restrictions": [{ "schema_key": { ... } }] } }
/// ```
pub fn proof_request_attrs<'a>(
    key: &SchemaKey,
    names: impl IntoIterator<Item = &'a str>,
) -> JsonObject {
    let schema_key = json_object!({
        ORIGIN_DID: key.origin_did(),
        "name": key.name(),
        "version": key.version(),
    });

    names
        .into_iter()
        .map(|name| {
            let requested = json_object!({
                "name": name,
                "restrictions": [{ "schema_key": schema_key }],
            });
            (name.to_owned(), requested.into())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::test_utils::{bc_reg_key, sri_key, BC_REG_DID, SRI_DID};

    #[test]
    fn test_schema_selectors_preserve_order() {
        let selectors = schema_selectors([&sri_key(), &bc_reg_key()]);

        assert_eq!(
            serde_json::to_value(&selectors).unwrap(),
            json!([
                { "origin-did": SRI_DID, "name": "sri", "version": "1.1" },
                { "origin-did": BC_REG_DID, "name": "bc-reg", "version": "1.0" },
            ])
        );
        assert!(schema_selectors([]).is_empty());
    }

    #[test]
    fn test_attr_match() {
        let fragment = attr_match(&bc_reg_key(), json_object!({ "attr0": "2" }));

        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({
                "schema": { "origin-did": BC_REG_DID, "name": "bc-reg", "version": "1.0" },
                "match": { "attr0": "2" },
            })
        );
    }

    #[test]
    fn test_predicate_match() {
        let fragment = predicate_match(
            &bc_reg_key(),
            vec![predicate_match_entry("id", ">=", 2)],
        );

        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({
                "schema": { "origin-did": BC_REG_DID, "name": "bc-reg", "version": "1.0" },
                "match": [{ "attr": "id", "pred-type": ">=", "value": 2 }],
            })
        );
    }

    #[test]
    fn test_predicate_type_not_validated() {
        let entry = predicate_match_entry("id", "~", -1);

        assert_eq!(entry.pred_type, "~");
        assert_eq!(entry.value, -1);
    }

    #[test]
    fn test_requested_attrs() {
        let some = requested_attrs(&sri_key(), ["legalName", "jurisdictionId"]);
        let all = requested_attrs(&sri_key(), Vec::<String>::new());

        assert_eq!(
            serde_json::to_value(&some).unwrap(),
            json!({
                "schema": { "origin-did": SRI_DID, "name": "sri", "version": "1.1" },
                "names": ["legalName", "jurisdictionId"],
            })
        );
        assert_eq!(serde_json::to_value(&all).unwrap()["names"], json!([]));
    }

    #[test]
    fn test_proof_request_attrs() {
        let attrs = proof_request_attrs(&bc_reg_key(), ["legal_name", "city"]);

        assert_eq!(attrs.keys().collect::<Vec<_>>(), ["legal_name", "city"]);
        assert_eq!(
            Value::from(attrs)["city"],
            json!({
                "name": "city",
                "restrictions": [{
                    "schema_key": { "did": BC_REG_DID, "name": "bc-reg", "version": "1.0" },
                }],
            })
        );
    }
}

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

use bherror::Error as BhError;
use serde_json::Value;

use crate::{codec, Error, JsonObject, PresentationProof, Result};

/// Decoded revealed attribute values (`None` for null) by attribute name, per referent.
pub type RevealedAttrs = BTreeMap<String, BTreeMap<String, Option<String>>>;

/// Location of the revealed attributes within each sub-proof.
const REVEALED_ATTRS_PATH: [&str; 3] = ["primary_proof", "eq_proof", "revealed_attrs"];

/// Fetches the revealed attributes of every sub-proof of `proof`, decoding their values with
/// [`codec::decode`], for processing as further claims downstream.
///
/// Attributes proven only through predicates are never revealed and do not appear.
///
/// # Errors
///
/// * [`Error::MalformedProof`] if a sub-proof lacks `primary_proof.eq_proof.revealed_attrs`, or
///   a revealed value is neither a string nor a number.
/// * [`Error::Encoding`] if a revealed value cannot be decoded.
pub fn revealed_attrs(proof: &PresentationProof) -> Result<RevealedAttrs> {
    let mut revealed = RevealedAttrs::new();

    for (referent, sub_proof) in &proof.proof.proofs {
        let attrs = revealed_attrs_object(sub_proof).ok_or_else(|| {
            BhError::root(Error::MalformedProof(format!(
                "`{}` missing for referent {referent}",
                REVEALED_ATTRS_PATH.join(".")
            )))
        })?;

        let decoded = attrs
            .iter()
            .map(|(name, value)| -> Result<(String, Option<String>)> {
                Ok((name.clone(), decode_revealed(referent, name, value)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        tracing::debug!(%referent, count = decoded.len(), "recovered revealed attributes");
        revealed.insert(referent.clone(), decoded);
    }

    Ok(revealed)
}

fn revealed_attrs_object(sub_proof: &Value) -> Option<&JsonObject> {
    REVEALED_ATTRS_PATH
        .iter()
        .try_fold(sub_proof, |value, key| value.get(key))?
        .as_object()
}

fn decode_revealed(referent: &str, name: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::String(encoded) => codec::decode(encoded),
        Value::Number(encoded) => codec::decode(&encoded.to_string()),
        _ => Err(BhError::root(Error::MalformedProof(format!(
            "revealed attribute {name} of referent {referent} is not an encoded value"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sub_proof(revealed: Value) -> Value {
        json!({
            "primary_proof": {
                "eq_proof": {
                    "revealed_attrs": revealed,
                    "a_prime": "1234",
                    "e": "5678",
                },
                "ge_proofs": [],
            },
            "non_revoc_proof": null,
        })
    }

    fn proof(proofs: Value) -> PresentationProof {
        PresentationProof::from_value(json!({
            "proof": {
                "proofs": proofs,
                "aggregated_proof": { "c_hash": "1", "c_list": [] },
            },
            "requested_proof": {},
        }))
        .unwrap()
    }

    #[test]
    fn test_decodes_revealed_values() {
        let proof = proof(json!({
            "claim::1": sub_proof(json!({
                "id": "3",
                "legalName": codec::encode(Some("Tart City")),
                "endDate": codec::encode(None),
            })),
        }));

        let revealed = revealed_attrs(&proof).unwrap();

        assert_eq!(
            revealed,
            RevealedAttrs::from([(
                "claim::1".to_owned(),
                BTreeMap::from([
                    ("id".to_owned(), Some("3".to_owned())),
                    ("legalName".to_owned(), Some("Tart City".to_owned())),
                    ("endDate".to_owned(), None),
                ])
            )])
        );
    }

    #[test]
    fn test_numeric_revealed_values() {
        let proof = proof(json!({ "claim::1": sub_proof(json!({ "id": 3 })) }));

        let revealed = revealed_attrs(&proof).unwrap();

        assert_eq!(revealed["claim::1"]["id"].as_deref(), Some("3"));
    }

    #[test]
    fn test_one_entry_per_referent() {
        let proof = proof(json!({
            "claim::1": sub_proof(json!({ "id": "3" })),
            "claim::2": sub_proof(json!({})),
        }));

        let revealed = revealed_attrs(&proof).unwrap();

        assert_eq!(revealed.len(), 2);
        assert!(revealed["claim::2"].is_empty());
    }

    #[test]
    fn test_missing_path_is_malformed() {
        let proof = proof(json!({
            "claim::1": { "primary_proof": { "ge_proofs": [] } },
        }));

        let err = revealed_attrs(&proof).unwrap_err();

        assert!(matches!(err.error, Error::MalformedProof(_)));
    }

    #[test]
    fn test_non_scalar_value_is_malformed() {
        let proof = proof(json!({ "claim::1": sub_proof(json!({ "id": ["3"] })) }));

        let err = revealed_attrs(&proof).unwrap_err();

        assert!(matches!(err.error, Error::MalformedProof(_)));
    }

    #[test]
    fn test_undecodable_value() {
        let proof = proof(json!({ "claim::1": sub_proof(json!({ "id": "three" })) }));

        let err = revealed_attrs(&proof).unwrap_err();

        assert!(matches!(err.error, Error::Encoding(_)));
    }
}

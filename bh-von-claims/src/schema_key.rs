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

use bherror::Error as BhError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, JsonObject, Result};

const NAME: &str = "name";
const VERSION: &str = "version";

/// Field name under which the origin DID is written back to the wire.
pub(crate) const ORIGIN_DID: &str = "did";

/// Identifies a schema by the DID of its originator, its name and its version.
///
/// Schema keys are compared and hashed over all three fields, so they can be used as keys of a
/// [`ClaimFilter`][crate::ClaimFilter].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "JsonObject", into = "JsonObject")]
pub struct SchemaKey {
    origin_did: String,
    name: String,
    version: String,
}

impl SchemaKey {
    /// Construct a schema key from the origin DID, schema name and schema version.
    pub fn new(
        origin_did: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            origin_did: origin_did.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// The DID of the schema originator.
    pub fn origin_did(&self) -> &str {
        &self.origin_did
    }

    /// The schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SchemaKey({}, {}, {})", self.origin_did, self.name, self.version)
    }
}

/// Parses a schema key from its three-field object form.
///
/// Agents disagree on the name of the origin DID field (`did`, `issuer`, `origin_did`, ...), so
/// it is identified by elimination: it is whichever field is neither `name` nor `version`.
// NB: elimination accepts any third field name; an object carrying two alternate origin
// fields is still rejected by the field count.
impl TryFrom<&JsonObject> for SchemaKey {
    type Error = BhError<Error>;

    fn try_from(object: &JsonObject) -> Result<Self> {
        if object.len() != 3 {
            return Err(BhError::root(Error::InvalidSchemaKey(format!(
                "expected 3 fields, found {}",
                object.len()
            ))));
        }

        let name = text_field(object, NAME)?;
        let version = text_field(object, VERSION)?;

        let Some(origin_field) = object.keys().find(|key| *key != NAME && *key != VERSION) else {
            return Err(BhError::root(Error::InvalidSchemaKey(
                "origin DID field not found".to_owned(),
            )));
        };
        let origin_did = text_field(object, origin_field)?;

        Ok(Self::new(origin_did, name, version))
    }
}

impl TryFrom<JsonObject> for SchemaKey {
    type Error = BhError<Error>;

    fn try_from(object: JsonObject) -> Result<Self> {
        Self::try_from(&object)
    }
}

impl TryFrom<&Value> for SchemaKey {
    type Error = BhError<Error>;

    fn try_from(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(BhError::root(Error::InvalidSchemaKey(format!(
                "{value} is not an object"
            ))));
        };
        Self::try_from(object)
    }
}

impl From<SchemaKey> for JsonObject {
    fn from(key: SchemaKey) -> Self {
        crate::json_object!({
            ORIGIN_DID: key.origin_did,
            NAME: key.name,
            VERSION: key.version,
        })
    }
}

fn text_field(object: &JsonObject, field: &str) -> Result<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            BhError::root(Error::InvalidSchemaKey(format!(
                "field `{field}` is missing or not a string"
            )))
        })
}

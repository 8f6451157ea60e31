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

use std::collections::{BTreeMap, HashMap};

use crate::{ClaimIndex, ClaimRecord, JsonObject, SchemaKey};

/// Attribute values to match per schema.
///
/// A claim matches only if its schema key is present and every listed attribute is present in
/// the claim with a structurally equal value.  Schemas absent from the filter match nothing.
pub type ClaimFilter = HashMap<SchemaKey, JsonObject>;

/// Finds the claims of `index` matching `filter`, returning the attributes of each matching
/// claim by referent, so that an end user can choose the claims of interest for further
/// processing via [`prune_claims`][crate::prune_claims].
///
/// Each referent appears at most once, however many slots list it; the first occurrence wins.
/// A `None` filter accepts every claim.
///
/// Returns `None` if the index has no `attrs` section, and an empty map if it has one but nothing
/// matches.
pub fn claims_for(
    index: &ClaimIndex,
    filter: Option<&ClaimFilter>,
) -> Option<BTreeMap<String, JsonObject>> {
    let slots = index.slots()?;

    let mut found = BTreeMap::new();
    for (slot, records) in slots {
        for record in records {
            if found.contains_key(&record.referent) {
                continue;
            }

            if let Some(filter) = filter {
                if !record.matches(filter) {
                    tracing::trace!(
                        %slot,
                        referent = %record.referent,
                        "claim does not match filter"
                    );
                    continue;
                }
            }

            found.insert(record.referent.clone(), record.attrs.clone());
        }
    }

    tracing::debug!(count = found.len(), "found claims");
    Some(found)
}

impl ClaimRecord {
    /// Whether this claim satisfies the filter entry for its schema.
    pub fn matches(&self, filter: &ClaimFilter) -> bool {
        let Some(expected) = filter.get(&self.schema_key) else {
            return false;
        };

        expected
            .iter()
            .all(|(name, value)| self.attrs.get(name) == Some(value))
    }
}

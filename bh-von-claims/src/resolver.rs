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

use crate::{ClaimIndex, SchemaKey};

/// Maps every referent listed in `index` to the schema key of its claim.
///
/// The first occurrence of a referent wins.  An index without an `attrs` section yields an empty
/// map.  All referents are resolved; narrowing down to a target set is left to the caller.
pub fn schema_keys(index: &ClaimIndex) -> BTreeMap<String, SchemaKey> {
    let mut keys = BTreeMap::new();
    for record in index.records() {
        keys.entry(record.referent.clone())
            .or_insert_with(|| record.schema_key.clone());
    }
    keys
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;
    use crate::test_utils::{bc_reg_key, bc_reg_record, index_of, sri_key, sri_record};

    #[test]
    fn test_resolves_each_referent_to_its_schema() {
        let index = index_of(
            &["attr0_uuid", "attr1_uuid"],
            &[bc_reg_record("r1", "2", "Hello"), sri_record("r2", "Tart City")],
        );

        let keys = schema_keys(&index);

        assert_eq!(
            keys,
            BTreeMap::from([("r1".to_owned(), bc_reg_key()), ("r2".to_owned(), sri_key())])
        );
    }

    #[test]
    fn test_caller_narrows_to_targets() {
        let index = index_of(
            &["attr0_uuid"],
            &[bc_reg_record("r1", "2", "Hello"), sri_record("r2", "Tart City")],
        );
        let targets = HashSet::from(["r2"]);

        let narrowed: Vec<_> = schema_keys(&index)
            .into_iter()
            .filter(|(referent, _)| targets.contains(referent.as_str()))
            .collect();

        assert_eq!(narrowed, [("r2".to_owned(), sri_key())]);
    }

    #[test]
    fn test_no_attrs_section() {
        let index = ClaimIndex::from_value(json!({ "predicates": {} })).unwrap();

        assert!(schema_keys(&index).is_empty());
    }
}

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

use crate::{json_object, ClaimIndex, ClaimRecord, SchemaKey};

pub(crate) const BC_REG_DID: &str = "Q4zqM7aXqm7gDQkUVLng9h";
pub(crate) const SRI_DID: &str = "27TL9VHhcQNok9QvHLVx1a";

pub(crate) fn bc_reg_key() -> SchemaKey {
    SchemaKey::new(BC_REG_DID, "bc-reg", "1.0")
}

pub(crate) fn sri_key() -> SchemaKey {
    SchemaKey::new(SRI_DID, "sri", "1.1")
}

pub(crate) fn bc_reg_record(referent: &str, attr0: &str, attr1: &str) -> ClaimRecord {
    let mut record = ClaimRecord::new(
        referent,
        json_object!({ "attr0": attr0, "attr1": attr1 }),
        bc_reg_key(),
    );
    record.issuer_did = Some(BC_REG_DID.to_owned());
    record
}

pub(crate) fn sri_record(referent: &str, legal_name: &str) -> ClaimRecord {
    ClaimRecord::new(
        referent,
        json_object!({ "legalName": legal_name, "jurisdictionId": "1" }),
        sri_key(),
    )
}

/// Builds an index listing every record under every one of the given slots, as agents do when
/// all requested attributes are satisfied by the same claims.
pub(crate) fn index_of(slots: &[&str], records: &[ClaimRecord]) -> ClaimIndex {
    ClaimIndex {
        attrs: Some(
            slots
                .iter()
                .map(|slot| (slot.to_string(), records.to_vec()))
                .collect(),
        ),
        other: Default::default(),
    }
}

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

use std::collections::HashSet;

use crate::ClaimIndex;

/// Strips every claim whose referent is not in `keep` out of `index`, **mutating it in place**,
/// and returns the same index for chaining.
///
/// Slots keep their key even when all their claims are removed.  An index without an `attrs`
/// section is left untouched.
pub fn prune_claims<'a>(index: &'a mut ClaimIndex, keep: &HashSet<String>) -> &'a mut ClaimIndex {
    if let Some(slots) = index.attrs.as_mut() {
        for (slot, records) in slots.iter_mut() {
            let doomed: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, record)| !keep.contains(&record.referent))
                .map(|(position, _)| position)
                .collect();

            // Remove from the back so the remaining positions stay valid.
            for position in doomed.iter().rev() {
                records.remove(*position);
            }

            tracing::trace!(%slot, removed = doomed.len(), kept = records.len(), "pruned slot");
        }
    }

    index
}

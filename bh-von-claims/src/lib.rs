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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate implements the data-transformation layer between the VON agent message protocol
//! and application logic.
//!
//! Agents (issuers, holder/provers and verifiers) exchange claim indices and presentation proofs
//! as JSON.  This crate parses them into typed records and offers the transformations a client
//! needs to act on them.
//!
//! # Details
//!
//! The main components of this crate are the following.
//!
//! * [`codec`] -- Reversibly maps claim attribute values to and from the numeric form used in
//!   zero-knowledge predicate arithmetic.
//! * [`proto`] -- Builds the request fragments (schema selectors, attribute and predicate
//!   matches, requested attributes) embedded into protocol messages.
//! * [`claims_for`] -- Filters a claim index down to a referent-indexed view.
//! * [`schema_keys`] -- Resolves referents to the schema keys of their claims.
//! * [`prune_claims`] -- Reduces a claim index, in place, to a set of referents.
//! * [`revealed_attrs`] -- Recovers the decoded attribute values disclosed in a proof.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//!
//! use bh_von_claims::{claims_for, prune_claims, ClaimIndex};
//!
//! let mut index = ClaimIndex::from_value(serde_json::json!({
//!     "attrs": {
//!         "attr0_uuid": [{
//!             "referent": "claim::1",
//!             "attrs": { "id": "3" },
//!             "schema_key": { "did": "Q4zqM7aXqm7gDQkUVLng9h", "name": "bc-reg", "version": "1.0" }
//!         }]
//!     }
//! }))
//! .unwrap();
//!
//! let found = claims_for(&index, None).unwrap();
//! assert_eq!(found["claim::1"]["id"], "3");
//!
//! prune_claims(&mut index, &HashSet::new());
//! assert!(index.slots().unwrap()["attr0_uuid"].is_empty());
//! ```

pub use error::{Error, Result};
pub use filter::{claims_for, ClaimFilter};
pub use models::*;
pub use prune::prune_claims;
pub use resolver::schema_keys;
pub use revealed::{revealed_attrs, RevealedAttrs};
pub use schema_key::SchemaKey;

pub mod codec;
mod error;
mod filter;
mod models;
pub mod proto;
mod prune;
mod resolver;
mod revealed;
mod schema_key;
#[cfg(test)]
mod test_utils;

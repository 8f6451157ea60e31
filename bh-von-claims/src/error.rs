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

/// Error type defining the failures of the claim and proof transformations.
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum Error {
    /// A value is not a valid, invertible attribute encoding.
    #[strum(to_string = "Encoding error: {0}")]
    Encoding(String),

    /// An expected substructure of a presentation proof is missing or has the wrong type.
    #[strum(to_string = "Malformed proof: {0}")]
    MalformedProof(String),

    /// A structured schema key does not consist of an origin DID, a name and a version.
    #[strum(to_string = "Invalid schema key: {0}")]
    InvalidSchemaKey(String),

    /// A claim index does not have the shape returned by a holder-prover agent.
    #[strum(to_string = "Malformed claim index")]
    MalformedClaimIndex,
}

impl bherror::BhError for Error {}

/// Result type used across the crate.
pub type Result<T> = bherror::Result<T, Error>;

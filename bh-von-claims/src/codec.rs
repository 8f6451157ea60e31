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

//! Encoding of claim attribute values for zero-knowledge predicate arithmetic.
//!
//! Agents sign and prove over non-negative integers, so every raw attribute value is mapped to
//! one:
//!
//! * a canonical decimal string in `[0, 2^32)` stands for itself, so predicates such as `>=` work
//!   directly on numeric attributes;
//! * the empty string is `2^32` and a null value is `2^32 + 1`;
//! * any other string is `2^32` plus the big-endian integer whose bytes are the ASCII hex digits
//!   of the string's UTF-8 encoding.
//!
//! Encoding happens in the agents, which is why only [`decode`] is used by the rest of this
//! crate.  [`encode`] is its inverse: `decode(&encode(x)) == x` for every `x`.

use bherror::{traits::ForeignError as _, Error as BhError};
use num_bigint::{BigInt, BigUint};

use crate::{Error, Result};

/// Upper bound (exclusive) of values encoding plain numeric attributes.
const PLAIN_BOUND: u64 = 1 << 32;
/// Offset from [`PLAIN_BOUND`] of the empty string.
const EMPTY_OFFSET: u32 = 0;
/// Offset from [`PLAIN_BOUND`] of a null value.
const NULL_OFFSET: u32 = 1;

/// Decodes an encoded attribute value back into its raw form.
///
/// Returns `None` for an encoded null value.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if `encoded` is not an integer, is negative, or does not decode to
/// an even-length sequence of hex digit pairs forming valid UTF-8.
pub fn decode(encoded: &str) -> Result<Option<String>> {
    let digits = encoded.strip_prefix(&['+', '-'][..]).unwrap_or(encoded);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BhError::root(Error::Encoding(format!(
            "`{encoded}` is not a numeric string"
        ))));
    }

    let value = encoded
        .parse::<BigInt>()
        .foreign_err(|| Error::Encoding(format!("`{encoded}` is not a numeric string")))?;

    let Some(value) = value.to_biguint() else {
        return Err(BhError::root(Error::Encoding(format!(
            "`{encoded}` is negative"
        ))));
    };

    let bound = BigUint::from(PLAIN_BOUND);
    if value < bound {
        return Ok(Some(value.to_string()));
    }

    let offset = value - bound;
    if offset == BigUint::from(EMPTY_OFFSET) {
        tracing::trace!("decoded empty string sentinel");
        return Ok(Some(String::new()));
    }
    if offset == BigUint::from(NULL_OFFSET) {
        tracing::trace!("decoded null sentinel");
        return Ok(None);
    }

    let digits = offset.to_bytes_be();
    if digits.len() % 2 != 0 {
        return Err(BhError::root(Error::Encoding(format!(
            "`{encoded}` does not decode to an even number of hex digits"
        ))));
    }

    let bytes = digits
        .chunks_exact(2)
        .map(|pair| -> Result<u8> {
            Ok((hex_digit(pair[0], encoded)? << 4) | hex_digit(pair[1], encoded)?)
        })
        .collect::<Result<Vec<u8>>>()?;

    String::from_utf8(bytes)
        .foreign_err(|| Error::Encoding(format!("`{encoded}` does not decode to UTF-8")))
        .map(Some)
}

/// Encodes a raw attribute value, `None` standing for null.
///
/// Only canonical decimal strings (no sign, no leading zeros) below `2^32` are treated as plain
/// numbers; e.g. `"007"` is encoded as text so that it decodes back to `"007"`.
pub fn encode(raw: Option<&str>) -> String {
    let bound = BigUint::from(PLAIN_BOUND);
    match raw {
        None => (bound + NULL_OFFSET).to_string(),
        Some("") => (bound + EMPTY_OFFSET).to_string(),
        Some(raw) if is_plain(raw) => raw.to_owned(),
        Some(raw) => {
            let digits = hex::encode(raw.as_bytes());
            (BigUint::from_bytes_be(digits.as_bytes()) + bound).to_string()
        }
    }
}

fn is_plain(raw: &str) -> bool {
    raw.parse::<u32>()
        .is_ok_and(|number| number.to_string() == raw)
}

fn hex_digit(byte: u8, encoded: &str) -> Result<u8> {
    char::from(byte)
        .to_digit(16)
        .map(|digit| digit as u8)
        .ok_or_else(|| {
            BhError::root(Error::Encoding(format!(
                "`{encoded}` contains byte {byte:#04x} which is not a hex digit"
            )))
        })
}

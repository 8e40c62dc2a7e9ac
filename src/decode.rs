/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Funycode.
 *
 * Funycode is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Funycode is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Funycode. If not, see <https://www.gnu.org/licenses/>.
 */

//! Functions and types for decoding funycode.

use crate::compress::decompress;
use crate::delta;
use crate::INITIAL_BIAS;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Formatter};

/// An error encountered while decoding an encoded name.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Encountered a byte outside the `[0-9A-Za-z_]` alphabet, or an
    /// underscore beyond the single separator.
    BadByte(u8),
    /// The suffix ended in the middle of a delta.
    Truncated,
    /// A delta did not fit in 64 bits.
    Overflow,
    /// A back-reference reached before the start of the name.
    BadReference,
    /// The suffix decoded to a value that is not a Unicode scalar.
    BadScalar(u64),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::BadByte(b) => {
                write!(f, "bad byte: {:?}", char::from(*b))
            }
            Self::Truncated => write!(f, "truncated suffix"),
            Self::Overflow => write!(f, "suffix delta out of range"),
            Self::BadReference => {
                write!(f, "back-reference before start of name")
            }
            Self::BadScalar(v) => {
                write!(f, "not a Unicode scalar: {:#x}", v)
            }
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Splits an encoded name into prefix and suffix.
///
/// A trailing underscore marks a suffix-only name; otherwise everything
/// before the *first* underscore is prefix. The prefix never contains
/// an underscore, so the first one is always the separator.
fn split(enc: &[u8]) -> (&[u8], &[u8]) {
    if let [rest @ .., b'_'] = enc {
        (&enc[..0], rest)
    } else if let Some(i) = enc.iter().position(|&b| b == b'_') {
        (&enc[..i], &enc[i + 1..])
    } else {
        (enc, &enc[..0])
    }
}

fn bootstring(enc: &[u8]) -> DecodeResult<Vec<u32>> {
    let (prefix, suffix) = split(enc);
    let mut buf: Vec<u32> = Vec::with_capacity(enc.len());
    for &b in prefix {
        if !b.is_ascii_alphanumeric() {
            return Err(DecodeError::BadByte(b));
        }
        buf.push(u32::from(b));
    }

    let mut last = delta::initial_last(prefix.len());
    let mut bias = INITIAL_BIAS;
    let mut pos = 0;
    while pos < suffix.len() {
        let (delta, used) = delta::decode(&suffix[pos..], bias)?;
        pos += used;
        let sym = i64::try_from(delta)
            .ok()
            .and_then(|delta| last.checked_add(delta))
            .ok_or(DecodeError::Overflow)?;
        let units = buf.len() as i64 + 1;
        let (wc, at) = (sym / units, (sym % units) as usize);
        let wc = u32::try_from(wc)
            .ok()
            .filter(|&wc| wc <= char::MAX as u32)
            .ok_or(DecodeError::BadScalar(sym as u64 / units as u64))?;
        buf.insert(at, wc);
        last = i64::from(wc) * (buf.len() as i64 + 1) + at as i64 + 1;
        bias = delta::adapt(delta, buf.len());
    }
    Ok(buf)
}

fn scalars(enc: &[u8]) -> DecodeResult<Vec<u32>> {
    decompress(&bootstring(enc)?)
}

fn char_of(sym: u32) -> DecodeResult<char> {
    char::from_u32(sym).ok_or(DecodeError::BadScalar(u64::from(sym)))
}

/// Decodes an encoded name back to the original string.
pub fn decode(enc: &str) -> DecodeResult<String> {
    scalars(enc.as_bytes())?.into_iter().map(char_of).collect()
}

/// Decodes an encoded name to a sequence of scalar values.
pub fn decode_chars(enc: &str) -> DecodeResult<Vec<char>> {
    scalars(enc.as_bytes())?.into_iter().map(char_of).collect()
}

/// Decodes an encoded name given as raw bytes, producing UTF-8.
///
/// Any byte outside the encoded alphabet fails with
/// [`DecodeError::BadByte`], so the input needs no prior validation.
pub fn decode_bytes(enc: &[u8]) -> DecodeResult<Vec<u8>> {
    Ok(scalars(enc)?
        .into_iter()
        .map(char_of)
        .collect::<DecodeResult<String>>()?
        .into_bytes())
}

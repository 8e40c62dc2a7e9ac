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

//! Functions and types for encoding names as funycode.

use crate::compress::compress;
use crate::delta;
use crate::INITIAL_BIAS;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Formatter};
use core::str::Utf8Error;

/// An extended character waiting for the suffix, still at its position
/// in the compressed stream.
struct Code {
    wc: u32,
    pos: usize,
}

/// Letters always; digits only once the prefix is non-empty, so the
/// result cannot start with one.
fn is_basic(sym: u32, have_basic: bool) -> bool {
    match sym {
        0x41..=0x5a | 0x61..=0x7a => true,
        0x30..=0x39 => have_basic,
        _ => false,
    }
}

fn bootstring(syms: &[u32]) -> String {
    let mut out = String::new();
    let mut codes: Vec<Code> = Vec::new();
    for (pos, &sym) in syms.iter().enumerate() {
        if is_basic(sym, !out.is_empty()) {
            out.push(sym as u8 as char);
        } else {
            codes.push(Code { wc: sym, pos });
        }
    }
    if codes.is_empty() {
        return out;
    }

    let prefix_len = out.len();
    if prefix_len != 0 {
        out.push('_');
    }

    // Emit the extended characters ordered by scalar value rather than
    // by position: the deltas between consecutive scalars are far
    // smaller than the scalars themselves. Each position must then be
    // adjusted down by the number of later-sorted characters that will
    // already have been inserted in front of it.
    codes.sort_by_key(|code| (code.wc, code.pos));
    for i in 0..codes.len() {
        let ofs = codes[i + 1..]
            .iter()
            .filter(|code| code.pos < codes[i].pos)
            .count();
        codes[i].pos -= ofs;
    }

    let mut declen = prefix_len as i64;
    let mut last = delta::initial_last(prefix_len);
    let mut bias = INITIAL_BIAS;
    for code in &codes {
        let sym = i64::from(code.wc) * (declen + 1) + code.pos as i64;
        debug_assert!(sym >= last, "extended scalar below U+0020");
        let delta = (sym - last).max(0) as u64;
        delta::encode(&mut out, delta, bias);
        declen += 1;
        last = i64::from(code.wc) * (declen + 1) + code.pos as i64 + 1;
        bias = delta::adapt(delta, declen as usize);
    }

    if prefix_len == 0 {
        out.push('_');
    }
    out
}

/// Encodes `name` as a C identifier.
///
/// The result is empty only when `name` is; otherwise it matches
/// `[A-Za-z][0-9A-Za-z_]*` and [`decode`](crate::decode::decode) maps it
/// back to `name` exactly.
pub fn encode(name: &str) -> String {
    let syms: Vec<u32> = name.chars().map(u32::from).collect();
    bootstring(&compress(&syms))
}

/// Encodes a name given as a sequence of scalar values.
pub fn encode_chars(name: &[char]) -> String {
    let syms: Vec<u32> = name.iter().copied().map(u32::from).collect();
    bootstring(&compress(&syms))
}

/// An error encountered while encoding a name given as bytes.
#[non_exhaustive]
#[derive(Debug)]
pub enum EncodeBytesError {
    /// The provided bytes were not valid UTF-8.
    InvalidUtf8(Utf8Error),
}

impl fmt::Display for EncodeBytesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidUtf8(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for EncodeBytesError {}

/// Encodes a UTF-8 name.
///
/// This function is like [`encode`], but takes raw bytes and fails when
/// they are not valid UTF-8.
pub fn encode_bytes(name: &[u8]) -> Result<String, EncodeBytesError> {
    let name =
        core::str::from_utf8(name).map_err(EncodeBytesError::InvalidUtf8)?;
    Ok(encode(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_vectors() {
        assert_eq!(encode("foo"), "foo");
        assert_eq!(encode("foo_bar"), "foobar_H7");
        assert_eq!(
            encode("supercalifragilisticexpialidocious"),
            "supercalifragilisticexpialidocious"
        );
        assert_eq!(encode("bücher"), "bcher_eL");
        assert_eq!(encode("hörbücher"), "hrbcher_5S0u0");
        assert_eq!(encode("_"), "C1_");
        assert_eq!(encode(" "), "A0_");
        assert_eq!(encode("自転車"), "qeE4K2A1_");
        assert_eq!(encode("велосипед"), "FH420EHL9G_");
    }

    #[test]
    fn empty_name() {
        assert_eq!(encode(""), "");
    }

    #[test]
    fn plain_identifiers_are_untouched() {
        for name in ["a", "Z", "x86", "alreadyValid", "Mixed123Case"] {
            assert_eq!(encode(name), name);
        }
    }

    #[test]
    fn leading_digit_moves_to_suffix() {
        assert_eq!(encode("1foo"), "foo_71");
        assert_eq!(encode("9"), "Z0_");
    }

    #[test]
    fn compressed_repeats() {
        assert_eq!(encode("abababababab"), "ab_1ts2");
        assert_eq!(encode("foo bar baz"), "foobarbaz_303");
    }

    #[test]
    fn astral_plane_is_suffix_only() {
        assert_eq!(encode("𝓯𝓸𝓸"), "cxr0I00_");
    }

    #[test]
    fn identifier_well_formedness() {
        let long = "x".repeat(300);
        let names = [
            "foo_bar",
            "9to5",
            " ",
            "~!@#$%^&*()",
            "übergrößenträger",
            "Καλημέρα κόσμε",
            "€100",
            "___",
            long.as_str(),
        ];
        for name in names {
            let enc = encode(name);
            let mut bytes = enc.bytes();
            let first = bytes.next().unwrap();
            assert!(first.is_ascii_alphabetic(), "{:?}", enc);
            assert!(
                bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_'),
                "{:?}",
                enc
            );
            assert!(enc.bytes().filter(|&b| b == b'_').count() <= 1);
        }
    }

    #[test]
    fn distinct_names_encode_distinctly() {
        let names = [
            "foo", "foo_bar", "foo-bar", "foo bar", "Foo", "foO", "fo o",
            "bücher", "bucher", "b_cher", "bücheR",
        ];
        for a in names {
            for b in names {
                assert_eq!(encode(a) == encode(b), a == b);
            }
        }
    }

    #[test]
    fn bytes_adapter() {
        assert_eq!(encode_bytes("bücher".as_bytes()).unwrap(), "bcher_eL");
        assert!(matches!(
            encode_bytes(b"b\xfccher"),
            Err(EncodeBytesError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn chars_adapter() {
        let name: Vec<char> = "hörbücher".chars().collect();
        assert_eq!(encode_chars(&name), "hrbcher_5S0u0");
    }
}

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

//! Funycode losslessly encodes arbitrary Unicode strings as valid C
//! identifiers: the result consists only of ASCII letters, digits, and
//! underscores, and never starts with a digit or an underscore.
//!
//! It is meant for mangling symbol names (the long, namespace-laden,
//! highly repetitive names produced by modern languages) into a form any
//! C toolchain will accept, while staying short enough to read in a
//! backtrace:
//!
//! ```text
//! hörbücher            → hrbcher_5S0u0
//! велосипед            → FH420EHL9G_
//! 自転車               → qeE4K2A1_
//! ```
//!
//! Names are first run through a small LZ compressor that replaces
//! repeated fragments with back-references, then through a
//! Bootstring-style stage (the algorithm behind Punycode) that moves
//! everything outside `[0-9A-Za-z]` into a base-62 suffix, separated from
//! the verbatim prefix by a single underscore.
//!
//! The mapping is bijective, so distinct names always mangle to distinct
//! identifiers. One restriction applies: names must not contain C0
//! control characters (`U+0000..=U+001F`), as the suffix arithmetic
//! cannot reach below `U+0020`; symbol names never contain them.
//!
//! This crate provides both a binary and a library.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
#![forbid(unsafe_code)]

extern crate alloc;

mod compress;
mod delta;
mod digit;

pub mod decode;
pub mod encode;

const BASE: u32 = 62;
const TMIN: u32 = 1;
const TMAX: u32 = 52;
const SKEW: u32 = 208;
const INITIAL_BIAS: u32 = 2 * BASE - TMAX / 2;
const INITIAL_N: u32 = 32;

pub use decode::decode;
pub use decode::decode_bytes;
pub use decode::decode_chars;
pub use decode::DecodeError;
pub use decode::DecodeResult;

pub use encode::encode;
pub use encode::encode_bytes;
pub use encode::encode_chars;
pub use encode::EncodeBytesError;

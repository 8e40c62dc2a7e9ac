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

//! The back-reference compressor that runs ahead of the Bootstring
//! stage.
//!
//! A single greedy pass replaces repeats of at least [`MINCOPY`] symbols
//! with a (length, distance) token packed into the UTF-16 low-surrogate
//! range, `U+D800..=U+DFFF`. Well-formed Unicode input never contains
//! surrogates, which leaves the whole band free for our use; the
//! Bootstring stage carries tokens to the suffix like any other
//! non-identifier character.

use crate::decode::DecodeError;
use alloc::vec::Vec;

const BACKREF: u32 = 0xd800;

const COPYBITS: u32 = 4;
const COPYMASK: u32 = (1 << COPYBITS) - 1;
const MINCOPY: usize = 4;
const MAXCOPY: usize = (1 << COPYBITS) - 1 + MINCOPY;

const DISTBITS: u32 = 7;
const DISTMASK: u32 = ((1 << DISTBITS) - 1) << COPYBITS;
const MINDIST: usize = 1;
const MAXDIST: usize = (1 << DISTBITS) - 1 + MINDIST;

const HASH_SLOTS: usize = 512;

const FNV_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x100_0000_01b3;

pub fn is_backref(sym: u32) -> bool {
    (BACKREF..=BACKREF | COPYMASK | DISTMASK).contains(&sym)
}

/// Hash-table slot for the `MINCOPY - 1` symbols at `pos`, or slot 0
/// when fewer remain.
fn fingerprint(src: &[u32], pos: usize) -> usize {
    if pos + (MINCOPY - 1) > src.len() {
        return 0;
    }
    let mut hash = FNV_BASIS;
    for &sym in &src[pos..pos + MINCOPY - 1] {
        hash = (hash ^ u64::from(sym)).wrapping_mul(FNV_PRIME);
    }
    (hash % HASH_SLOTS as u64) as usize
}

fn common_len(src: &[u32], from: usize, at: usize) -> usize {
    let mut len = 0;
    while len < MAXCOPY && at + len < src.len() && src[from + len] == src[at + len]
    {
        len += 1;
    }
    len
}

pub fn compress(src: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(src.len());
    let mut htab = [0_usize; HASH_SLOTS];
    let mut pos = 0;
    while pos + MINCOPY <= src.len() {
        let candidate = htab[fingerprint(src, pos)];
        let dist = pos - candidate;
        let len = if (MINDIST..=MAXDIST).contains(&dist) {
            common_len(src, candidate, pos)
        } else {
            0
        };
        let len = if len >= MINCOPY {
            out.push(
                BACKREF
                    + (len - MINCOPY) as u32
                    + (((dist - MINDIST) as u32) << COPYBITS),
            );
            len
        } else {
            out.push(src[pos]);
            1
        };
        for refresh in pos..pos + len {
            if refresh + (MINCOPY - 1) <= src.len() {
                htab[fingerprint(src, refresh)] = refresh;
            }
        }
        pos += len;
    }
    out.extend_from_slice(&src[pos..]);
    out
}

pub fn decompress(src: &[u32]) -> Result<Vec<u32>, DecodeError> {
    let mut out = Vec::with_capacity(src.len());
    for &sym in src {
        if is_backref(sym) {
            let len = (sym & COPYMASK) as usize + MINCOPY;
            let dist = ((sym & DISTMASK) >> COPYBITS) as usize + MINDIST;
            let from = out
                .len()
                .checked_sub(dist)
                .ok_or(DecodeError::BadReference)?;
            // An overlapping copy repeats what it has just written, so
            // this must stay a left-to-right, element-at-a-time loop.
            for i in from..from + len {
                let copied = out[i];
                out.push(copied);
            }
        } else {
            out.push(sym);
        }
    }
    Ok(out)
}

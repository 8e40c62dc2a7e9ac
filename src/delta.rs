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

//! Variable-length integers over base-62 digits.
//!
//! Suffix deltas are encoded as in RFC 3492: a digit below the
//! position-dependent threshold ends the number, anything else carries
//! on. The bias moves after every insertion so that runs of similar
//! deltas stay short. Unlike RFC 3492 there is no separate damp for the
//! first delta; every adaptation halves.

use crate::decode::DecodeError;
use crate::digit::Digit;
use crate::{BASE, INITIAL_N, SKEW, TMAX, TMIN};
use alloc::string::String;

pub fn threshold(position: usize, bias: u32) -> u32 {
    let t = (position as u64 + 1) * u64::from(BASE);
    t.saturating_sub(u64::from(bias))
        .clamp(u64::from(TMIN), u64::from(TMAX)) as u32
}

/// Appends the base-62 digits of `delta` to `out`.
pub fn encode(out: &mut String, mut delta: u64, bias: u32) {
    let base = u64::from(BASE);
    let mut position = 0;
    loop {
        let t = u64::from(threshold(position, bias));
        if delta < t {
            out.push(Digit::new(delta as u32).ascii() as char);
            return;
        }
        let digit = t + (delta - t) % (base - t);
        out.push(Digit::new(digit as u32).ascii() as char);
        delta = (delta - t) / (base - t);
        position += 1;
    }
}

/// Reads one delta from the front of `buf`, returning it along with the
/// number of bytes consumed.
pub fn decode(buf: &[u8], bias: u32) -> Result<(u64, usize), DecodeError> {
    let base = u64::from(BASE);
    let mut delta = 0_u64;
    let mut weight = 1_u64;
    let mut used = 0;
    loop {
        let b = *buf.get(used).ok_or(DecodeError::Truncated)?;
        let digit = Digit::from_ascii(b).ok_or(DecodeError::BadByte(b))?;
        let value = u64::from(digit.value());
        let t = u64::from(threshold(used, bias));
        delta = value
            .checked_mul(weight)
            .and_then(|v| delta.checked_add(v))
            .ok_or(DecodeError::Overflow)?;
        used += 1;
        if value < t {
            return Ok((delta, used));
        }
        weight = weight.checked_mul(base - t).ok_or(DecodeError::Overflow)?;
    }
}

/// Moves the bias after an insertion. `len` is the length of the
/// reconstructed string including that insertion.
pub fn adapt(delta: u64, len: usize) -> u32 {
    let base = u64::from(BASE);
    let tmin = u64::from(TMIN);
    let tmax = u64::from(TMAX);
    let mut delta = delta / 2;
    delta += delta / len as u64;
    let mut bias = 0;
    while delta > (base - tmin) * tmax / 2 {
        delta /= base - tmin;
        bias += BASE;
    }
    bias + (((base - tmin + 1) * delta) / (delta + u64::from(SKEW))) as u32
}

/// The starting point for suffix deltas. The offset for an empty prefix
/// keeps the first suffix digit out of `0-9`, so a suffix-only result
/// still starts with a letter.
pub fn initial_last(prefix_len: usize) -> i64 {
    let units = prefix_len as i64 + 1;
    let mut last = i64::from(INITIAL_N) * units;
    if prefix_len == 0 {
        last -= 10 * units;
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INITIAL_BIAS;
    use alloc::string::String;

    #[test]
    fn threshold_clamps() {
        assert_eq!(threshold(0, INITIAL_BIAS), TMIN);
        assert_eq!(threshold(1, INITIAL_BIAS), 26);
        assert_eq!(threshold(2, INITIAL_BIAS), TMAX);
        assert_eq!(threshold(0, 0), TMAX);
        assert_eq!(threshold(0, 61), TMIN);
        assert_eq!(threshold(1, 106), 18);
    }

    #[test]
    fn known_digit_strings() {
        let mut out = String::new();
        encode(&mut out, 444, INITIAL_BIAS);
        assert_eq!(out, "H7");

        let mut out = String::new();
        encode(&mut out, 1321, INITIAL_BIAS);
        assert_eq!(out, "eL");

        let mut out = String::new();
        encode(&mut out, 6592, 106);
        assert_eq!(out, "4K2");
    }

    #[test]
    fn encode_decode_round_trip() {
        for bias in [0, 1, 19, 79, INITIAL_BIAS, 106, 200] {
            for delta in [0, 1, 9, 61, 62, 444, 6592, 33236, u32::MAX as u64]
            {
                let mut out = String::new();
                encode(&mut out, delta, bias);
                let (back, used) = decode(out.as_bytes(), bias).unwrap();
                assert_eq!(back, delta);
                assert_eq!(used, out.len());
            }
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(
            decode(b"_", INITIAL_BIAS),
            Err(DecodeError::BadByte(b'_'))
        );
        assert_eq!(decode(b"", INITIAL_BIAS), Err(DecodeError::Truncated));
        // 'z' is never below the threshold, so the delta cannot end.
        assert_eq!(decode(b"zz", INITIAL_BIAS), Err(DecodeError::Truncated));
        assert_eq!(
            decode(b"zzzzzzzzzzzzzzzzzzzz", INITIAL_BIAS),
            Err(DecodeError::Overflow)
        );
    }

    #[test]
    fn adaptation() {
        // Values pinned by the reference vectors for 自転車 and hörbücher.
        assert_eq!(adapt(33236, 1), 106);
        assert_eq!(adapt(6592, 2), 79);
        assert_eq!(adapt(1713, 8), 50);
        assert_eq!(adapt(1052, 1), 51);
        assert_eq!(adapt(4, 2), 0);
        assert_eq!(adapt(0, 1), 0);
    }

    #[test]
    fn initial_last_offsets() {
        assert_eq!(initial_last(0), 22);
        assert_eq!(initial_last(5), 192);
        assert_eq!(initial_last(6), 224);
    }
}

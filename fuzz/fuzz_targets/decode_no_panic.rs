#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|enc: &[u8]| {
    // Property: the decoder must never panic on arbitrary input.
    // It may return Ok(_) or a defined error, but must not crash.
    let _ = funycode::decode_bytes(enc);
});

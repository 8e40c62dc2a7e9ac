#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: &str| {
    // Property: decode(encode(x)) == x over the encodable domain
    // (names without C0 controls; &str already rules out surrogates).
    if name.chars().any(|c| c < ' ') {
        return;
    }
    let enc = funycode::encode(name);
    match funycode::decode(&enc) {
        Ok(back) => assert_eq!(back, name),
        Err(e) => panic!("decoder rejected encoder output {:?}: {}", enc, e),
    }
});

#![no_main]

//! Move text parser fuzzer.
//!
//! Parsing arbitrary text must never panic, and anything that parses must
//! round-trip through the canonical encoding.

use fendo::Move;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Ok(mv) = text.parse::<Move>() {
        let canonical = mv.to_string();
        let reparsed: Move = canonical
            .parse()
            .expect("canonical encoding must re-parse");
        assert_eq!(reparsed, mv);
    }
});

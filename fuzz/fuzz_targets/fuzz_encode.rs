//! Fuzz target for sequence encoding.
//!
//! Arbitrary bytes either encode and decode back unchanged, or are
//! rejected at the first byte outside `ACGT`.

#![no_main]

use knucleotide::sequence::EncodedSequence;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let first_invalid = data.iter().position(|b| !b"ACGT".contains(b));

    match EncodedSequence::from_ascii(data) {
        Ok(dna) => {
            assert!(first_invalid.is_none());
            assert_eq!(dna.to_ascii(), data);
        }
        Err(err) => {
            assert_eq!(Some(err.position), first_invalid);
            assert_eq!(err.symbol, data[err.position]);
        }
    }
});

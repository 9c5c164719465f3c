//! Fuzz target for pack/unpack roundtrip.
//!
//! Packing then unpacking a literal of 1-32 letters must be the identity,
//! on whichever key width the literal fits.

#![no_main]

use knucleotide::kmer::{pack, unpack_to_bytes, KmerLength, MAX_NARROW_LENGTH};
use knucleotide::nucleotide::encode_all;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(length) = KmerLength::new(data.len()) else {
        return;
    };
    // Validation is covered by fuzz_encode.
    let Ok(codes) = encode_all(data) else {
        return;
    };

    let wide: u64 = pack(&codes);
    assert_eq!(unpack_to_bytes(wide, length), data, "u64 roundtrip failed");

    if data.len() <= MAX_NARROW_LENGTH {
        let narrow: u32 = pack(&codes);
        assert_eq!(unpack_to_bytes(narrow, length), data, "u32 roundtrip failed");
    }
});

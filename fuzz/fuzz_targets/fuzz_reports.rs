//! Fuzz target for frequency reports.
//!
//! The first byte picks a length; the rest is the sequence. Row counts
//! must add up to the number of windows.

#![no_main]

use knucleotide::kmer::KmerLength;
use knucleotide::report::{frequency, Report};
use knucleotide::sequence::EncodedSequence;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let Ok(length) = KmerLength::new(usize::from(first % 32) + 1) else {
        return;
    };
    let Ok(dna) = EncodedSequence::from_ascii(rest) else {
        return;
    };

    if let Report::Frequency { rows, windows, .. } = frequency(&dna, length) {
        let total: u64 = rows.iter().map(|row| u64::from(row.count)).sum();
        assert_eq!(total, windows);
        assert_eq!(windows, length.windows(dna.len()) as u64);
    }
});

//! Sliding-window subsequence counting.
//!
//! One pass over the encoded sequence builds a table from packed key to
//! occurrence count. The window key is rolled forward one symbol at a
//! time, so each position costs one shift, one mask and one hash update
//! no matter how long the subsequence is.

use std::collections::HashMap;
use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

use crate::{
    kmer::{pack, unpack_to_string, KeyWidth, KmerLength, PackedKey},
    nucleotide::NucleotideCode,
    sequence::EncodedSequence,
};

#[cfg(feature = "tracing")]
use tracing::debug;

/// Occurrence counter. `N - L + 1` windows always fit.
pub type Count = u32;

/// A `HashMap` w/ `FxHasher`.
type FxMap<K> = HashMap<K, Count, BuildHasherDefault<FxHasher>>;

/// Occurrence counts of every subsequence of one length, keyed by packed key.
#[derive(Debug, Clone)]
pub struct CountTable<K: PackedKey> {
    length: KmerLength,
    counts: FxMap<K>,
}

impl<K: PackedKey> CountTable<K> {
    /// Counts every window of `length` symbols in `dna`.
    ///
    /// Panics in debug builds if `length` does not fit `K`; use
    /// [`Counts::build`] to have the width picked for you.
    #[must_use]
    pub fn build(dna: &EncodedSequence, length: KmerLength) -> Self {
        debug_assert!(length.get() <= K::CAPACITY);

        let codes = dna.codes();
        let mut counts = FxMap::<K>::default();

        if codes.len() >= length.get() {
            let (prefix, rest) = codes.split_at(length.get() - 1);
            let mut key: K = pack(prefix);
            for &code in rest {
                key = key.push(code).masked(length);
                *counts.entry(key).or_insert(0) += 1;
            }
        }

        #[cfg(feature = "tracing")]
        debug!(length = length.get(), distinct = counts.len(), "Built count table");

        Self { length, counts }
    }

    /// Number of distinct subsequences seen.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts, i.e. the number of windows counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Count of the subsequence with packed `key`, zero if never seen.
    #[must_use]
    pub fn get(&self, key: K) -> Count {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Count of the subsequence given as codes, zero if never seen.
    ///
    /// Codes of a different length than the table never match.
    #[must_use]
    pub fn count_of(&self, codes: &[NucleotideCode]) -> Count {
        if codes.len() == self.length.get() {
            self.get(pack(codes))
        } else {
            0
        }
    }

    /// Iterates over `(key, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Count)> + '_ {
        self.counts.iter().map(|(&key, &count)| (key, count))
    }

    /// Decodes every entry into `(subsequence, count)`.
    #[must_use]
    pub fn decoded(&self) -> Vec<(String, Count)> {
        self.iter()
            .map(|(key, count)| (unpack_to_string(key, self.length), count))
            .collect()
    }
}

/// A count table of whichever key width the length needs.
#[derive(Debug, Clone)]
pub enum Counts {
    /// Lengths 1-16.
    Narrow(CountTable<u32>),
    /// Lengths 17-32.
    Wide(CountTable<u64>),
}

impl Counts {
    /// Counts every window of `length` symbols, picking the key width once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use knucleotide::counter::Counts;
    /// use knucleotide::kmer::KmerLength;
    /// use knucleotide::sequence::EncodedSequence;
    ///
    /// let dna = EncodedSequence::from_ascii(b"GGTGGT")?;
    /// let counts = Counts::build(&dna, KmerLength::new(3)?);
    ///
    /// assert_eq!(counts.total(), 4);
    /// assert_eq!(counts.count_of(&[3, 3, 2]), 2); // GGT
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn build(dna: &EncodedSequence, length: KmerLength) -> Self {
        match length.width() {
            KeyWidth::Narrow => Self::Narrow(CountTable::build(dna, length)),
            KeyWidth::Wide => Self::Wide(CountTable::build(dna, length)),
        }
    }

    /// Number of distinct subsequences seen.
    #[must_use]
    pub fn distinct(&self) -> usize {
        match self {
            Self::Narrow(table) => table.distinct(),
            Self::Wide(table) => table.distinct(),
        }
    }

    /// Number of windows counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self {
            Self::Narrow(table) => table.total(),
            Self::Wide(table) => table.total(),
        }
    }

    /// Count of the subsequence given as codes, zero if never seen.
    #[must_use]
    pub fn count_of(&self, codes: &[NucleotideCode]) -> Count {
        match self {
            Self::Narrow(table) => table.count_of(codes),
            Self::Wide(table) => table.count_of(codes),
        }
    }

    /// Decodes every entry into `(subsequence, count)`.
    #[must_use]
    pub fn decoded(&self) -> Vec<(String, Count)> {
        match self {
            Self::Narrow(table) => table.decoded(),
            Self::Wide(table) => table.decoded(),
        }
    }
}

//! The shared, read-only encoded sequence.

use bytes::Bytes;
use rayon::prelude::*;

use crate::{
    error::InvalidSymbolError,
    nucleotide::{decode, encode, encode_all, NucleotideCode},
};

#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// Inputs shorter than this are encoded on the calling thread.
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// A DNA sequence stored as one 2-bit code per byte.
///
/// The codes live in a reference-counted [`Bytes`] buffer: cloning is
/// cheap and every clone reads the same immutable data, so workers can
/// share one sequence without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedSequence {
    codes: Bytes,
}

impl EncodedSequence {
    /// Validates and encodes ASCII letters.
    ///
    /// Fails on the first byte outside `A`/`C`/`G`/`T`, reporting its
    /// position. Large inputs are validated and encoded in parallel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use knucleotide::sequence::EncodedSequence;
    ///
    /// let dna = EncodedSequence::from_ascii(b"GATTACA")?;
    /// assert_eq!(dna.len(), 7);
    /// assert_eq!(dna.codes(), &[3, 0, 2, 2, 0, 1, 0]);
    ///
    /// let err = EncodedSequence::from_ascii(b"GATNACA").unwrap_err();
    /// assert_eq!(err.position, 3);
    /// # Ok::<(), knucleotide::error::InvalidSymbolError>(())
    /// ```
    pub fn from_ascii(letters: &[u8]) -> Result<Self, InvalidSymbolError> {
        #[cfg(feature = "tracing")]
        let _span = info_span!("encode_sequence", bases = letters.len()).entered();

        let codes: Vec<NucleotideCode> = if letters.len() < PARALLEL_THRESHOLD {
            encode_all(letters)?
        } else {
            if let Some(position) = letters.par_iter().position_first(|&b| encode(b).is_err()) {
                return Err(InvalidSymbolError {
                    symbol: letters[position],
                    position,
                });
            }
            letters
                .par_iter()
                .map(|&b| encode(b).unwrap_or_default())
                .collect()
        };

        #[cfg(feature = "tracing")]
        debug!(bases = codes.len(), "Encoded sequence");

        Ok(Self {
            codes: Bytes::from(codes),
        })
    }

    /// The 2-bit codes, one per byte.
    #[must_use]
    pub fn codes(&self) -> &[NucleotideCode] {
        &self.codes
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` if the sequence has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Decodes back to uppercase ASCII letters.
    #[must_use]
    pub fn to_ascii(&self) -> Vec<u8> {
        self.codes.iter().map(|&c| decode(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_and_decodes() {
        let dna = EncodedSequence::from_ascii(b"ACGT").unwrap();
        assert_eq!(dna.codes(), &[0, 1, 3, 2]);
        assert_eq!(dna.to_ascii(), b"ACGT");
    }

    #[test]
    fn empty_sequence() {
        let dna = EncodedSequence::from_ascii(b"").unwrap();
        assert!(dna.is_empty());
        assert_eq!(dna, EncodedSequence::default());
    }

    #[test]
    fn rejects_lowercase() {
        let err = EncodedSequence::from_ascii(b"ACgT").unwrap_err();
        assert_eq!(err.symbol, b'g');
        assert_eq!(err.position, 2);
    }

    #[test]
    fn parallel_path_reports_first_invalid() {
        let mut letters = b"GGTA".repeat(PARALLEL_THRESHOLD);
        let first = letters.len() / 3;
        letters[first] = b'N';
        letters[first + 7] = b'X';

        let err = EncodedSequence::from_ascii(&letters).unwrap_err();
        assert_eq!(err.symbol, b'N');
        assert_eq!(err.position, first);
    }

    #[test]
    fn parallel_path_matches_serial() {
        let letters = b"GATTACA".repeat(PARALLEL_THRESHOLD / 4);
        let dna = EncodedSequence::from_ascii(&letters).unwrap();
        assert_eq!(dna.len(), letters.len());
        assert_eq!(dna.to_ascii(), letters);
    }

    #[test]
    fn clones_share_storage() {
        let dna = EncodedSequence::from_ascii(b"GATTACA").unwrap();
        let clone = dna.clone();
        assert_eq!(dna.codes().as_ptr(), clone.codes().as_ptr());
    }
}

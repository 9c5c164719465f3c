//! Packed subsequence keys.
//!
//! A run of `L` nucleotide codes is packed most-significant-first into a
//! single unsigned integer, two bits per symbol:
//!
//! ```text
//! key = code[0] * 4^(L-1) + code[1] * 4^(L-2) + ... + code[L-1]
//! ```
//!
//! Lengths up to 16 fit a `u32`, lengths 17 to 32 need a `u64`. The
//! [`PackedKey`] trait lets counting and lookup code be written once over
//! both widths; [`KeyWidth`] picks the width for a given length.

use std::{fmt::Debug, hash::Hash};

use crate::{
    error::KmerLengthError,
    nucleotide::{decode, NucleotideCode},
};

/// Minimum supported subsequence length.
pub const MIN_LENGTH: u8 = 1;

/// Maximum supported subsequence length.
pub const MAX_LENGTH: u8 = 32;

/// Longest subsequence that still fits a 32-bit key.
pub const MAX_NARROW_LENGTH: usize = 16;

/// A validated subsequence length in `1..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerLength(usize);

impl KmerLength {
    /// Validates `length`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use knucleotide::kmer::KmerLength;
    ///
    /// assert_eq!(KmerLength::new(18)?.get(), 18);
    /// assert!(KmerLength::new(0).is_err());
    /// assert!(KmerLength::new(33).is_err());
    /// # Ok::<(), knucleotide::error::KmerLengthError>(())
    /// ```
    pub const fn new(length: usize) -> Result<Self, KmerLengthError> {
        if length >= MIN_LENGTH as usize && length <= MAX_LENGTH as usize {
            Ok(Self(length))
        } else {
            Err(KmerLengthError {
                length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            })
        }
    }

    /// Returns the length as a `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the key width needed for this length.
    #[must_use]
    pub const fn width(self) -> KeyWidth {
        if self.0 <= MAX_NARROW_LENGTH {
            KeyWidth::Narrow
        } else {
            KeyWidth::Wide
        }
    }

    /// Number of sliding windows of this length over `n` symbols.
    #[must_use]
    pub const fn windows(self, n: usize) -> usize {
        n.saturating_sub(self.0 - 1)
    }
}

impl std::fmt::Display for KmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for KmerLength {
    type Error = KmerLengthError;

    fn try_from(length: usize) -> Result<Self, Self::Error> {
        Self::new(length)
    }
}

/// Integer width used for the keys of one length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWidth {
    /// `u32` keys, lengths 1-16.
    Narrow,
    /// `u64` keys, lengths 17-32.
    Wide,
}

/// An unsigned integer that can hold a packed subsequence.
pub trait PackedKey: Copy + Eq + Hash + Ord + Debug + Send + Sync + 'static {
    /// Number of symbols that fit in this width.
    const CAPACITY: usize;

    /// The all-zero key.
    const ZERO: Self;

    /// Shifts in one 2-bit code at the low end: `(self << 2) | code`.
    #[must_use]
    fn push(self, code: NucleotideCode) -> Self;

    /// Keeps only the low `2 * length` bits.
    #[must_use]
    fn masked(self, length: KmerLength) -> Self;

    /// Returns the 2-bit code at the low end.
    fn low_code(self) -> NucleotideCode;

    /// Drops the low 2-bit code: `self >> 2`.
    #[must_use]
    fn pop(self) -> Self;
}

macro_rules! impl_packed_key {
    ($ty:ty) => {
        impl PackedKey for $ty {
            const CAPACITY: usize = <$ty>::BITS as usize / 2;

            const ZERO: Self = 0;

            #[inline]
            fn push(self, code: NucleotideCode) -> Self {
                (self << 2) | Self::from(code)
            }

            #[inline]
            fn masked(self, length: KmerLength) -> Self {
                // A full-width key has no bits above the window to clear.
                if length.get() >= Self::CAPACITY {
                    self
                } else {
                    self & ((1 << (2 * length.get())) - 1)
                }
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn low_code(self) -> NucleotideCode {
                (self & 0b11) as NucleotideCode
            }

            #[inline]
            fn pop(self) -> Self {
                self >> 2
            }
        }
    };
}

impl_packed_key!(u32);
impl_packed_key!(u64);

/// Packs `codes` into a key, first code most significant.
///
/// Callers keep `codes.len()` within `K::CAPACITY`; longer runs keep
/// only their last `K::CAPACITY` codes.
///
/// # Example
///
/// ```rust
/// use knucleotide::kmer::pack;
///
/// // G=3, G=3, T=2
/// assert_eq!(pack::<u32>(&[3, 3, 2]), 0b11_11_10);
/// ```
#[must_use]
pub fn pack<K: PackedKey>(codes: &[NucleotideCode]) -> K {
    codes.iter().fold(K::ZERO, |key, &code| key.push(code))
}

/// Unpacks the low `length` symbols of `key` into letters.
///
/// Symbols are peeled off the low end and written back to front, so the
/// result reads in the same order the codes were packed.
#[must_use]
pub fn unpack_to_bytes<K: PackedKey>(key: K, length: KmerLength) -> Vec<u8> {
    let mut letters = vec![0; length.get()];
    let mut key = key;
    for slot in letters.iter_mut().rev() {
        *slot = decode(key.low_code());
        key = key.pop();
    }
    letters
}

/// Unpacks the low `length` symbols of `key` into a `String`.
///
/// # Example
///
/// ```rust
/// use knucleotide::kmer::{pack, unpack_to_string, KmerLength};
///
/// let k = KmerLength::new(3)?;
/// assert_eq!(unpack_to_string(pack::<u32>(&[3, 3, 2]), k), "GGT");
/// # Ok::<(), knucleotide::error::KmerLengthError>(())
/// ```
#[must_use]
pub fn unpack_to_string<K: PackedKey>(key: K, length: KmerLength) -> String {
    unpack_to_bytes(key, length)
        .into_iter()
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nucleotide::encode_all;

    #[test]
    fn length_bounds() {
        assert!(KmerLength::new(0).is_err());
        assert!(KmerLength::new(1).is_ok());
        assert!(KmerLength::new(32).is_ok());
        assert_eq!(
            KmerLength::new(33),
            Err(KmerLengthError {
                length: 33,
                min: 1,
                max: 32
            })
        );
    }

    #[test]
    fn width_selection() {
        assert_eq!(KmerLength::new(1).unwrap().width(), KeyWidth::Narrow);
        assert_eq!(KmerLength::new(16).unwrap().width(), KeyWidth::Narrow);
        assert_eq!(KmerLength::new(17).unwrap().width(), KeyWidth::Wide);
        assert_eq!(KmerLength::new(32).unwrap().width(), KeyWidth::Wide);
    }

    #[test]
    fn windows_count() {
        let k = KmerLength::new(3).unwrap();
        assert_eq!(k.windows(5), 3);
        assert_eq!(k.windows(3), 1);
        assert_eq!(k.windows(2), 0);
        assert_eq!(k.windows(0), 0);
    }

    #[test]
    fn pack_is_big_endian_over_symbols() {
        let codes = encode_all(b"GGTA").unwrap();
        assert_eq!(pack::<u32>(&codes), 0b11_11_10_00);
        assert_eq!(pack::<u64>(&codes), 0b11_11_10_00);
    }

    #[test]
    fn masks_per_width() {
        let k = KmerLength::new(2).unwrap();
        assert_eq!(0b11_10_01u32.masked(k), 0b10_01);
        assert_eq!(0b11_10_01u64.masked(k), 0b10_01);

        let full = KmerLength::new(16).unwrap();
        assert_eq!(u32::MAX.masked(full), u32::MAX);
        let full = KmerLength::new(32).unwrap();
        assert_eq!(u64::MAX.masked(full), u64::MAX);
    }

    #[test]
    fn unpack_roundtrip_both_widths() {
        let narrow = b"GGTATTTTAATT";
        let k = KmerLength::new(narrow.len()).unwrap();
        let key: u32 = pack(&encode_all(narrow).unwrap());
        assert_eq!(unpack_to_bytes(key, k), narrow);

        let wide = b"GGTATTTTAATTTATAGT";
        let k = KmerLength::new(wide.len()).unwrap();
        let key: u64 = pack(&encode_all(wide).unwrap());
        assert_eq!(unpack_to_string(key, k), "GGTATTTTAATTTATAGT");
    }

    #[test]
    fn unpack_full_width_keys() {
        let k = KmerLength::new(16).unwrap();
        assert_eq!(unpack_to_string(u32::MAX, k), "G".repeat(16));
        let k = KmerLength::new(32).unwrap();
        assert_eq!(unpack_to_string(0u64, k), "A".repeat(32));
    }
}

//! Two-bit nucleotide codec.
//!
//! Every nucleotide letter maps to a 2-bit code with the fixed table
//! `A=0, C=1, T=2, G=3`. The table is not alphabetical; it is the one
//! the packed keys in [`crate::kmer`] are built from, and [`decode`] is
//! its exact inverse.

use crate::error::InvalidSymbolError;

/// A 2-bit nucleotide code in `0..=3`.
pub type NucleotideCode = u8;

/// Letters indexed by their code.
const LETTERS: [u8; 4] = *b"ACTG";

/// One of the four DNA bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A,
    C,
    T,
    G,
}

impl Nucleotide {
    /// Returns the 2-bit code of this base.
    #[must_use]
    pub const fn code(self) -> NucleotideCode {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::T => 2,
            Self::G => 3,
        }
    }

    /// Returns the base for the low 2 bits of `code`.
    #[must_use]
    pub const fn from_code(code: NucleotideCode) -> Self {
        match code & 0b11 {
            0 => Self::A,
            1 => Self::C,
            2 => Self::T,
            _ => Self::G,
        }
    }

    /// Returns the uppercase ASCII letter of this base.
    #[must_use]
    pub const fn into_u8(self) -> u8 {
        LETTERS[self.code() as usize]
    }
}

impl TryFrom<u8> for Nucleotide {
    type Error = InvalidSymbolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'A' => Ok(Self::A),
            b'C' => Ok(Self::C),
            b'T' => Ok(Self::T),
            b'G' => Ok(Self::G),
            _ => Err(InvalidSymbolError {
                symbol: value,
                position: 0,
            }),
        }
    }
}

/// Encodes one letter. Lowercase and ambiguity codes are rejected.
pub fn encode(byte: u8) -> Result<NucleotideCode, InvalidSymbolError> {
    Nucleotide::try_from(byte).map(Nucleotide::code)
}

/// Decodes the low 2 bits of `code` back to its letter.
#[must_use]
pub const fn decode(code: NucleotideCode) -> u8 {
    Nucleotide::from_code(code).into_u8()
}

/// Encodes a whole run of letters, reporting the first invalid byte.
pub fn encode_all(bytes: &[u8]) -> Result<Vec<NucleotideCode>, InvalidSymbolError> {
    bytes
        .iter()
        .enumerate()
        .map(|(position, &byte)| encode(byte).map_err(|e| e.at_offset(position)))
        .collect()
}

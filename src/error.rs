//! Error types for knucleotide.
//!
//! Every failure is detected before counting starts and aborts the run;
//! nothing here is retried or downgraded to a zero count.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in knucleotide operations.
#[derive(Debug, Error)]
pub enum KnucleotideError {
    /// Encountered a byte outside the `A`/`C`/`G`/`T` alphabet.
    #[error("invalid symbol {} at position {position}", describe_symbol(.symbol))]
    InvalidSymbol { symbol: u8, position: usize },

    /// Subsequence length is outside the valid range (1-32).
    #[error("unsupported subsequence length {length}: must be between {min} and {max}")]
    UnsupportedLength { length: usize, min: u8, max: u8 },

    /// Failed to read sequence file.
    #[error("failed to read sequence file '{path}': {source}")]
    SequenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to parse sequence record.
    #[error("failed to parse sequence record: {details}")]
    SequenceParse { details: String },

    /// No record header starts with the requested prefix.
    #[error("no record with header prefix '>{prefix}' found in input")]
    RecordNotFound { prefix: String },

    /// Failed to write output.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },
}

fn describe_symbol(symbol: &u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", char::from(*symbol))
    } else {
        format!("0x{symbol:02x}")
    }
}

/// Error for a subsequence length outside 1-32.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("subsequence length {length} is out of range: must be between {min} and {max}")]
pub struct KmerLengthError {
    /// The invalid length that was provided.
    pub length: usize,
    /// Minimum valid length.
    pub min: u8,
    /// Maximum valid length.
    pub max: u8,
}

/// Error for a byte that is not a nucleotide letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbolError {
    /// The invalid byte value.
    pub symbol: u8,
    /// Position of the invalid byte in its sequence.
    pub position: usize,
}

impl InvalidSymbolError {
    /// Returns the same error shifted to `offset + position`.
    #[must_use]
    pub const fn at_offset(self, offset: usize) -> Self {
        Self {
            symbol: self.symbol,
            position: offset + self.position,
        }
    }
}

impl std::fmt::Display for InvalidSymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid symbol {} at position {}",
            describe_symbol(&self.symbol),
            self.position
        )
    }
}

impl std::error::Error for InvalidSymbolError {}

impl From<std::io::Error> for KnucleotideError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteError { source }
    }
}

impl From<serde_json::Error> for KnucleotideError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonError { source }
    }
}

impl From<KmerLengthError> for KnucleotideError {
    fn from(err: KmerLengthError) -> Self {
        Self::UnsupportedLength {
            length: err.length,
            min: err.min,
            max: err.max,
        }
    }
}

impl From<InvalidSymbolError> for KnucleotideError {
    fn from(err: InvalidSymbolError) -> Self {
        Self::InvalidSymbol {
            symbol: err.symbol,
            position: err.position,
        }
    }
}

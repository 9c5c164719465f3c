//! Frequency and exact-count reports.
//!
//! Two report kinds are built on [`Counts`]:
//!
//! - a frequency report lists every distinct subsequence of one length
//!   with its share of all windows, most frequent first;
//! - a sequence report gives the exact count of one literal subsequence.
//!
//! Both are structured [`Report`] values; their [`Display`](std::fmt::Display)
//! output is the plain-text block written by the binary.
//!
//! # Example
//!
//! ```rust
//! use knucleotide::kmer::KmerLength;
//! use knucleotide::report::{frequency_report, sequence_report, Probe};
//! use knucleotide::sequence::EncodedSequence;
//!
//! let dna = EncodedSequence::from_ascii(b"ACGT")?;
//!
//! assert_eq!(
//!     frequency_report(&dna, KmerLength::new(1)?),
//!     "T 25.000\nG 25.000\nC 25.000\nA 25.000\n"
//! );
//! assert_eq!(sequence_report(&dna, &Probe::new("CG")?), "1\tCG");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{cmp::Ordering, fmt};

use serde::Serialize;

use crate::{
    counter::{Count, Counts},
    error::KnucleotideError,
    kmer::KmerLength,
    nucleotide::{encode_all, NucleotideCode},
    sequence::EncodedSequence,
};

/// One row of a frequency report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    /// The decoded subsequence.
    pub sequence: String,
    /// Number of windows equal to `sequence`.
    pub count: Count,
    /// `100 * count / windows`.
    pub percent: f64,
}

impl FrequencyRow {
    /// Report order: higher count first, then the lexicographically
    /// greater subsequence first.
    fn report_order(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A finished report of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Report {
    /// Every distinct subsequence of one length, most frequent first.
    Frequency {
        /// Subsequence length.
        length: usize,
        /// Number of windows counted, `max(0, N - L + 1)`.
        windows: u64,
        /// Rows in report order.
        rows: Vec<FrequencyRow>,
    },
    /// Exact count of one literal subsequence.
    Sequence {
        /// The literal exactly as requested.
        sequence: String,
        /// Number of occurrences, zero if never seen.
        count: Count,
    },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frequency { rows, .. } => {
                for row in rows {
                    writeln!(f, "{} {:.3}", row.sequence, row.percent)?;
                }
                Ok(())
            }
            Self::Sequence { sequence, count } => write!(f, "{count}\t{sequence}"),
        }
    }
}

/// A literal subsequence to look up, validated up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Probe {
    literal: String,
    codes: Vec<NucleotideCode>,
    length: KmerLength,
}

impl Probe {
    /// Validates `literal`: 1 to 32 letters, all of `A`/`C`/`G`/`T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use knucleotide::report::Probe;
    ///
    /// assert!(Probe::new("GGTATT").is_ok());
    /// assert!(Probe::new("GGNA").is_err());
    /// assert!(Probe::new("").is_err());
    /// ```
    pub fn new(literal: &str) -> Result<Self, KnucleotideError> {
        let length = KmerLength::new(literal.len())?;
        let codes = encode_all(literal.as_bytes())?;
        Ok(Self {
            literal: literal.to_string(),
            codes,
            length,
        })
    }

    /// The literal as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// The literal's 2-bit codes.
    #[must_use]
    pub fn codes(&self) -> &[NucleotideCode] {
        &self.codes
    }

    /// The literal's length.
    #[must_use]
    pub const fn length(&self) -> KmerLength {
        self.length
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl std::str::FromStr for Probe {
    type Err = KnucleotideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Builds the frequency report for `length` from already-built counts.
#[must_use]
pub fn frequency_rows(counts: &Counts, windows: u64) -> Vec<FrequencyRow> {
    let scale = if windows == 0 {
        0.0
    } else {
        100.0 / windows as f64
    };

    let mut rows: Vec<FrequencyRow> = counts
        .decoded()
        .into_iter()
        .map(|(sequence, count)| FrequencyRow {
            sequence,
            count,
            percent: f64::from(count) * scale,
        })
        .collect();
    rows.sort_unstable_by(FrequencyRow::report_order);
    rows
}

/// Counts every subsequence of `length` and returns the structured report.
#[must_use]
pub fn frequency(dna: &EncodedSequence, length: KmerLength) -> Report {
    let counts = Counts::build(dna, length);
    let windows = length.windows(dna.len()) as u64;
    Report::Frequency {
        length: length.get(),
        windows,
        rows: frequency_rows(&counts, windows),
    }
}

/// Looks up the exact count of `probe` and returns the structured report.
#[must_use]
pub fn lookup(dna: &EncodedSequence, probe: &Probe) -> Report {
    let counts = Counts::build(dna, probe.length());
    Report::Sequence {
        sequence: probe.as_str().to_string(),
        count: counts.count_of(probe.codes()),
    }
}

/// Text block listing every subsequence of `length` as `"<SEQ> <PCT>\n"`.
#[must_use]
pub fn frequency_report(dna: &EncodedSequence, length: KmerLength) -> String {
    frequency(dna, length).to_string()
}

/// Single line `"<COUNT>\t<SEQ>"` for `probe`.
#[must_use]
pub fn sequence_report(dna: &EncodedSequence, probe: &Probe) -> String {
    lookup(dna, probe).to_string()
}

/// A declared report, before it runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Full frequency table for one length.
    Frequency(KmerLength),
    /// Exact count of one literal.
    Sequence(Probe),
}

impl ReportKind {
    /// Runs the report over `dna`.
    #[must_use]
    pub fn run(&self, dna: &EncodedSequence) -> Report {
        match self {
            Self::Frequency(length) => frequency(dna, *length),
            Self::Sequence(probe) => lookup(dna, probe),
        }
    }

    /// Relative cost used to schedule expensive reports first.
    ///
    /// Counting grows with the number of distinct keys, which grows with
    /// the length; a frequency report also decodes and sorts every row.
    #[must_use]
    pub const fn cost(&self) -> usize {
        match self {
            Self::Frequency(length) => 2 * length.get(),
            Self::Sequence(probe) => probe.length().get(),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frequency(length) => write!(f, "frequency({length})"),
            Self::Sequence(probe) => write!(f, "sequence({probe})"),
        }
    }
}

//! Extracting the sequence to analyse from FASTA input.
//!
//! The input may hold several records; the one analysed is the first
//! whose header line starts with a given prefix (`>THREE` by default).

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use bio::io::fasta;
use bytes::Bytes;

use crate::error::KnucleotideError;

#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// Where to read FASTA from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// A file; `.gz` files are decompressed with the `gzip` feature.
    File(PathBuf),
    /// Standard input.
    #[default]
    Stdin,
}

impl Input {
    /// `None` and `-` mean standard input.
    #[must_use]
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.as_os_str() != "-" => Self::File(path.to_path_buf()),
            _ => Self::Stdin,
        }
    }

    fn open(&self) -> Result<Box<dyn Read>, KnucleotideError> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
            Self::File(path) => {
                let file = File::open(path).map_err(|source| KnucleotideError::SequenceRead {
                    source,
                    path: path.clone(),
                })?;
                Ok(decompress(path, file))
            }
        }
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

#[cfg(feature = "gzip")]
fn decompress(path: &Path, file: File) -> Box<dyn Read> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    }
}

#[cfg(not(feature = "gzip"))]
fn decompress(_path: &Path, file: File) -> Box<dyn Read> {
    Box::new(file)
}

/// Reads the sequence of the first record whose header starts with
/// `>` followed by `prefix`.
pub fn read_input(input: &Input, prefix: &str) -> Result<Bytes, KnucleotideError> {
    #[cfg(feature = "tracing")]
    let _span = info_span!("read_fasta", input = %input, prefix).entered();

    read_sequence(input.open()?, prefix)
}

/// Reads the sequence of the first record whose header starts with
/// `>` followed by `prefix`, from any reader.
///
/// Letters are folded to uppercase, so soft-masked (lowercase) records
/// read the same as uppercase ones. Other bytes are left for the encoder
/// to reject.
///
/// # Example
///
/// ```rust
/// use knucleotide::reader::read_sequence;
///
/// let fasta = b">ONE first\nAAAA\n>THREE third\nggta\nTTGG\n";
/// let seq = read_sequence(&fasta[..], "THREE")?;
/// assert_eq!(&seq[..], b"GGTATTGG");
/// # Ok::<(), knucleotide::error::KnucleotideError>(())
/// ```
pub fn read_sequence<R: Read>(reader: R, prefix: &str) -> Result<Bytes, KnucleotideError> {
    for record in fasta::Reader::new(reader).records() {
        let record = record.map_err(|e| KnucleotideError::SequenceParse {
            details: e.to_string(),
        })?;

        if header_matches(&record, prefix) {
            #[cfg(feature = "tracing")]
            debug!(id = record.id(), bases = record.seq().len(), "Found record");

            let mut seq = record.seq().to_vec();
            seq.make_ascii_uppercase();
            return Ok(Bytes::from(seq));
        }
    }

    Err(KnucleotideError::RecordNotFound {
        prefix: prefix.to_string(),
    })
}

/// Compares against the header line as written, `id` then description.
fn header_matches(record: &fasta::Record, prefix: &str) -> bool {
    let id = record.id();
    if prefix.len() <= id.len() {
        return id.starts_with(prefix);
    }
    match (prefix.strip_prefix(id), record.desc()) {
        (Some(rest), Some(desc)) => rest
            .strip_prefix(' ')
            .is_some_and(|rest| desc.starts_with(rest)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FASTA: &[u8] = b">ONE Homo sapiens alu\n\
GGCCGGGCGCGGTGGCTCA\n\
>TWO IUB ambiguity codes\n\
cttBtatcatatgctaKggNcataaa\n\
>THREE Homo sapiens frequency\n\
aacacttcaccaggtatcgtgaagg\n\
GGTATTTTAATT\n\
TATAGT\n";

    #[test]
    fn selects_record_by_prefix() {
        let seq = read_sequence(FASTA, "ONE").unwrap();
        assert_eq!(&seq[..], b"GGCCGGGCGCGGTGGCTCA");
    }

    #[test]
    fn concatenates_lines_and_folds_case() {
        let seq = read_sequence(FASTA, "THREE").unwrap();
        assert_eq!(
            &seq[..],
            b"AACACTTCACCAGGTATCGTGAAGGGGTATTTTAATTTATAGT".as_slice()
        );
    }

    #[test]
    fn prefix_may_cover_description() {
        let seq = read_sequence(FASTA, "TWO IUB").unwrap();
        assert!(seq.starts_with(b"CTTB"));
        assert!(read_sequence(FASTA, "TWO IUX").is_err());
    }

    #[test]
    fn partial_id_prefix_matches() {
        let seq = read_sequence(FASTA, "TH").unwrap();
        assert!(seq.starts_with(b"AACAC"));
    }

    #[test]
    fn missing_record() {
        let err = read_sequence(FASTA, "FOUR").unwrap_err();
        assert!(matches!(
            err,
            KnucleotideError::RecordNotFound { ref prefix } if prefix == "FOUR"
        ));
    }

    #[test]
    fn input_from_option() {
        assert_eq!(Input::from_option(None), Input::Stdin);
        assert_eq!(Input::from_option(Some(Path::new("-"))), Input::Stdin);
        assert_eq!(
            Input::from_option(Some(Path::new("genome.fa"))),
            Input::File(PathBuf::from("genome.fa"))
        );
        assert_eq!(Input::Stdin.to_string(), "<stdin>");
    }

    #[test]
    fn missing_file_is_read_error() {
        let input = Input::File(PathBuf::from("/nonexistent/input.fa"));
        let err = read_input(&input, "THREE").unwrap_err();
        assert!(matches!(err, KnucleotideError::SequenceRead { .. }));
    }
}

//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::{
    kmer::{MAX_LENGTH, MIN_LENGTH},
    report::Probe,
};

/// Nucleotide frequency reports over one record of a FASTA file.
///
/// Without -k/-s, reports the frequencies of all 1- and 2-mers and the
/// counts of GGT, GGTA, GGTATT, GGTATTTTAATT and GGTATTTTAATTTATAGT.
#[derive(Parser, Debug)]
#[command(name = "knucleotide")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Path to a FASTA file (reads stdin if omitted or "-")
    pub path: Option<PathBuf>,

    /// Header prefix of the record to analyse (without the leading '>')
    #[arg(short, long, default_value = "THREE")]
    pub record: String,

    /// Report the frequency of every subsequence of this length (1-32)
    #[arg(short = 'k', long = "frequency", value_name = "LENGTH", value_parser = parse_length)]
    pub frequencies: Vec<usize>,

    /// Report the exact count of this subsequence
    #[arg(short, long = "sequence", value_name = "SEQ", value_parser = parse_probe)]
    pub sequences: Vec<Probe>,

    /// Number of worker threads (defaults to the available parallelism)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One text block per report, separated by line breaks
    #[default]
    Text,
    /// JSON array of reports
    Json,
}

fn parse_length(s: &str) -> Result<usize, String> {
    let length: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if length < usize::from(MIN_LENGTH) {
        return Err(format!("length must be at least {MIN_LENGTH}"));
    }
    if length > usize::from(MAX_LENGTH) {
        return Err(format!("length must be at most {MAX_LENGTH}"));
    }
    Ok(length)
}

fn parse_probe(s: &str) -> Result<Probe, String> {
    Probe::new(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["knucleotide"]).unwrap();
        assert!(args.path.is_none());
        assert_eq!(args.record, "THREE");
        assert!(args.frequencies.is_empty());
        assert!(args.sequences.is_empty());
        assert!(args.threads.is_none());
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn repeated_jobs() {
        let args = Args::try_parse_from([
            "knucleotide",
            "input.fa",
            "-k",
            "1",
            "-k",
            "12",
            "-s",
            "GGT",
            "--sequence",
            "GGTA",
            "-t",
            "2",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.frequencies, vec![1, 12]);
        assert_eq!(
            args.sequences.iter().map(Probe::as_str).collect::<Vec<_>>(),
            vec!["GGT", "GGTA"]
        );
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["knucleotide", "-k", "0"]).is_err());
        assert!(Args::try_parse_from(["knucleotide", "-k", "33"]).is_err());
        assert!(Args::try_parse_from(["knucleotide", "-k", "abc"]).is_err());
        assert!(Args::try_parse_from(["knucleotide", "-s", "GGN"]).is_err());
        assert!(Args::try_parse_from(["knucleotide", "-t", "0"]).is_err());
    }

    #[test]
    fn parse_length_messages() {
        assert_eq!(parse_length("32"), Ok(32));
        assert_eq!(
            parse_length("0"),
            Err("length must be at least 1".to_string())
        );
        assert_eq!(
            parse_length("40"),
            Err("length must be at most 32".to_string())
        );
    }
}

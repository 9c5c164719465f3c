//! # knucleotide
//!
//! Frequency reports for fixed-length subsequences of one DNA sequence.
//!
//! The sequence is taken from a single FASTA record, encoded once as
//! 2-bit nucleotide codes, and shared read-only by a pool of worker
//! threads. Each report is an independent job that builds its own count
//! table in a single sliding-window pass:
//!
//! - a **frequency report** lists every subsequence of a length with its
//!   percentage of all windows, most frequent first;
//! - a **sequence report** gives the exact count of one literal.
//!
//! Reports are always returned in the order they were declared, whatever
//! order the workers finish them in.
//!
//! ## Encoding
//!
//! Letters map to codes as `A=0`, `C=1`, `T=2`, `G=3`. Subsequences of up
//! to 16 letters pack into a `u32`, up to 32 into a `u64`, first letter in
//! the most significant position. The FASTA reader folds record letters
//! to uppercase; any other byte is rejected before counting starts.
//!
//! ## Example
//!
//! ```rust
//! use knucleotide::config::ReportPlan;
//! use knucleotide::run::analyze_ascii;
//!
//! let plan = ReportPlan::new().frequency(1)?.sequence("GGT")?;
//! let reports = analyze_ascii(b"GGTATTGGT", &plan)?;
//!
//! assert_eq!(
//!     reports[0].to_string(),
//!     "T 44.444\nG 44.444\nA 11.111\n"
//! );
//! assert_eq!(reports[1].to_string(), "2\tGGT");
//! # Ok::<(), knucleotide::error::KnucleotideError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): spans and events for reading, encoding and
//!   scheduling, and a stderr subscriber in the binary.
//! - `gzip`: transparent decompression of `.gz` input files.

pub mod cli;
pub mod config;
pub mod counter;
pub mod error;
pub mod kmer;
pub mod nucleotide;
pub mod output;
pub mod reader;
pub mod report;
pub mod run;
pub mod scheduler;
pub mod sequence;

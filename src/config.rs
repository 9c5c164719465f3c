//! Run configuration.
//!
//! [`ReportPlan`] is the ordered list of reports to produce plus the
//! worker-pool size. Every length and literal is validated as it is
//! added, so a plan that builds can run without further checks.
//!
//! # Example
//!
//! ```rust
//! use knucleotide::config::ReportPlan;
//!
//! let plan = ReportPlan::new()
//!     .frequency(1)?
//!     .frequency(2)?
//!     .sequence("GGT")?
//!     .workers(4);
//!
//! assert_eq!(plan.len(), 3);
//! # Ok::<(), knucleotide::error::KnucleotideError>(())
//! ```

use std::path::PathBuf;

use crate::{
    cli::{Args, OutputFormat},
    error::KnucleotideError,
    kmer::KmerLength,
    reader::Input,
    report::{Probe, Report, ReportKind},
    scheduler::{Job, JobScheduler},
};

/// Header prefix of the record analysed by default.
pub const DEFAULT_RECORD: &str = "THREE";

/// Frequency-report lengths of the reference job list.
pub const REFERENCE_FREQUENCIES: [usize; 2] = [1, 2];

/// Lookup literals of the reference job list.
pub const REFERENCE_SEQUENCES: [&str; 5] = [
    "GGT",
    "GGTA",
    "GGTATT",
    "GGTATTTTAATT",
    "GGTATTTTAATTTATAGT",
];

/// An ordered list of reports and the pool size to run them with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportPlan {
    reports: Vec<ReportKind>,
    workers: Option<usize>,
}

impl ReportPlan {
    /// An empty plan using one worker per available execution unit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference job list: frequencies of lengths 1 and 2, then the
    /// counts of GGT, GGTA, GGTATT, GGTATTTTAATT and GGTATTTTAATTTATAGT.
    pub fn reference() -> Result<Self, KnucleotideError> {
        let plan = REFERENCE_FREQUENCIES
            .into_iter()
            .try_fold(Self::new(), Self::frequency)?;
        REFERENCE_SEQUENCES
            .into_iter()
            .try_fold(plan, Self::sequence)
    }

    /// Appends a frequency report for subsequences of `length`.
    ///
    /// # Errors
    ///
    /// Returns [`KnucleotideError::UnsupportedLength`] unless `length` is 1-32.
    pub fn frequency(mut self, length: usize) -> Result<Self, KnucleotideError> {
        self.reports
            .push(ReportKind::Frequency(KmerLength::new(length)?));
        Ok(self)
    }

    /// Appends an exact-count report for `literal`.
    ///
    /// # Errors
    ///
    /// Returns [`KnucleotideError::InvalidSymbol`] for a letter outside
    /// `A`/`C`/`G`/`T` and [`KnucleotideError::UnsupportedLength`] for an
    /// empty or over-long literal.
    pub fn sequence(self, literal: &str) -> Result<Self, KnucleotideError> {
        Ok(self.probe(Probe::new(literal)?))
    }

    /// Appends an exact-count report for an already validated literal.
    #[must_use]
    pub fn probe(mut self, probe: Probe) -> Self {
        self.reports.push(ReportKind::Sequence(probe));
        self
    }

    /// Sets the worker-pool size.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Declared reports, in order.
    #[must_use]
    pub fn reports(&self) -> &[ReportKind] {
        &self.reports
    }

    /// Number of declared reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns `true` if no report is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// The scheduler this plan runs on.
    #[must_use]
    pub fn scheduler(&self) -> JobScheduler {
        self.workers
            .map_or_else(JobScheduler::new, JobScheduler::with_workers)
    }

    /// One job per declared report, in declaration order.
    #[must_use]
    pub fn jobs(&self) -> Vec<Job<Report>> {
        self.reports.iter().cloned().map(Job::report).collect()
    }
}

/// Everything the binary needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// FASTA source.
    pub input: Input,
    /// Header prefix of the record to analyse.
    pub record: String,
    /// Reports to produce.
    pub plan: ReportPlan,
    /// Output format.
    pub format: OutputFormat,
}

impl Config {
    /// Builds a run configuration from parsed arguments.
    ///
    /// Explicit `--frequency` reports are declared before `--sequence`
    /// reports, each in argument order; with neither, the reference job
    /// list is used.
    pub fn from_args(args: Args) -> Result<Self, KnucleotideError> {
        let mut plan = if args.frequencies.is_empty() && args.sequences.is_empty() {
            ReportPlan::reference()?
        } else {
            let plan = args
                .frequencies
                .into_iter()
                .try_fold(ReportPlan::new(), ReportPlan::frequency)?;
            args.sequences.into_iter().fold(plan, ReportPlan::probe)
        };
        if let Some(threads) = args.threads {
            plan = plan.workers(usize::from(threads));
        }

        Ok(Self {
            input: Input::from_option(args.path.as_deref()),
            record: args.record,
            plan,
            format: args.format,
        })
    }

    /// Configuration for `path` with the reference job list.
    pub fn reference(path: impl Into<PathBuf>) -> Result<Self, KnucleotideError> {
        Ok(Self {
            input: Input::File(path.into()),
            record: DEFAULT_RECORD.to_string(),
            plan: ReportPlan::reference()?,
            format: OutputFormat::Text,
        })
    }
}

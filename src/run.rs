//! Reading, scheduling and writing in one pass.
//!
//! [`run`] is what the binary calls; [`analyze`] is the in-memory entry
//! point for callers that already hold a sequence.

use std::io::{stdout, BufWriter, Write};

use crate::{
    cli::OutputFormat,
    config::{Config, ReportPlan},
    error::KnucleotideError,
    output::{write_reports, write_text},
    reader::read_input,
    report::Report,
    sequence::EncodedSequence,
};

#[cfg(feature = "tracing")]
use tracing::{info, info_span};

/// Runs every report of `plan` over `dna`, in declaration order.
///
/// # Example
///
/// ```rust
/// use knucleotide::config::ReportPlan;
/// use knucleotide::run::analyze;
/// use knucleotide::sequence::EncodedSequence;
///
/// let dna = EncodedSequence::from_ascii(b"GGTGGT")?;
/// let plan = ReportPlan::new().frequency(2)?.sequence("GGT")?;
/// let reports = analyze(&dna, &plan);
///
/// assert_eq!(reports[0].to_string(), "GT 40.000\nGG 40.000\nTG 20.000\n");
/// assert_eq!(reports[1].to_string(), "2\tGGT");
/// # Ok::<(), knucleotide::error::KnucleotideError>(())
/// ```
#[must_use]
pub fn analyze(dna: &EncodedSequence, plan: &ReportPlan) -> Vec<Report> {
    plan.scheduler().run(dna, plan.jobs())
}

/// Encodes `letters` and runs `plan` over them.
///
/// # Errors
///
/// Returns [`KnucleotideError::InvalidSymbol`] for the first byte outside
/// `A`/`C`/`G`/`T`; no report is produced in that case.
pub fn analyze_ascii(letters: &[u8], plan: &ReportPlan) -> Result<Vec<Report>, KnucleotideError> {
    let dna = EncodedSequence::from_ascii(letters)?;
    Ok(analyze(&dna, plan))
}

/// Reads the configured record and writes its reports to stdout.
pub fn run(config: &Config) -> Result<(), KnucleotideError> {
    let stdout = stdout();
    run_to_writer(config, BufWriter::new(stdout.lock()))
}

/// Reads the configured record and writes its reports to `writer`.
pub fn run_to_writer<W: Write>(config: &Config, writer: W) -> Result<(), KnucleotideError> {
    #[cfg(feature = "tracing")]
    let _span = info_span!("run", input = %config.input, record = %config.record).entered();

    let letters = read_input(&config.input, &config.record)?;
    let dna = EncodedSequence::from_ascii(&letters)?;
    drop(letters);

    #[cfg(feature = "tracing")]
    info!(bases = dna.len(), reports = config.plan.len(), "Sequence encoded");

    write_analysis(&dna, &config.plan, config.format, writer)
}

/// Runs `plan` over `dna` and writes the reports in `format`.
///
/// Text blocks are written as soon as they are next in declaration order;
/// JSON is written once every report is done.
pub fn write_analysis<W: Write>(
    dna: &EncodedSequence,
    plan: &ReportPlan,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), KnucleotideError> {
    match format {
        OutputFormat::Json => write_reports(writer, &analyze(dna, plan), format)?,
        OutputFormat::Text => {
            // Later jobs still run after a failed write; their output is dropped.
            let mut failure = None;
            plan.scheduler().run_with(dna, plan.jobs(), |_, report| {
                if failure.is_none() {
                    failure = write_text(&mut writer, &report).err();
                }
            });
            if let Some(e) = failure {
                return Err(e);
            }
            writer.flush()?;
        }
    }

    #[cfg(feature = "tracing")]
    info!(reports = plan.len(), "Reports written");

    Ok(())
}

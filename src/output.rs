//! Writing finished reports.
//!
//! Text output is each report's block followed by a line break, so a
//! frequency block (already newline-terminated) is followed by a blank
//! line and a lookup line ends with a single newline.

use std::io::Write;

use crate::{cli::OutputFormat, error::KnucleotideError, report::Report};

/// Writes one report as a text block.
pub fn write_text<W: Write>(writer: &mut W, report: &Report) -> Result<(), KnucleotideError> {
    writeln!(writer, "{report}")?;
    Ok(())
}

/// Writes all reports in the given format and flushes.
///
/// # Example
///
/// ```rust
/// use knucleotide::cli::OutputFormat;
/// use knucleotide::output::write_reports;
/// use knucleotide::report::Report;
///
/// let reports = vec![Report::Sequence { sequence: "GGT".into(), count: 3 }];
/// let mut out = Vec::new();
/// write_reports(&mut out, &reports, OutputFormat::Text)?;
/// assert_eq!(out, b"3\tGGT\n");
/// # Ok::<(), knucleotide::error::KnucleotideError>(())
/// ```
pub fn write_reports<W: Write>(
    mut writer: W,
    reports: &[Report],
    format: OutputFormat,
) -> Result<(), KnucleotideError> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                write_text(&mut writer, report)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, reports)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FrequencyRow;

    fn reports() -> Vec<Report> {
        vec![
            Report::Frequency {
                length: 1,
                windows: 4,
                rows: vec![
                    FrequencyRow {
                        sequence: "T".to_string(),
                        count: 3,
                        percent: 75.0,
                    },
                    FrequencyRow {
                        sequence: "A".to_string(),
                        count: 1,
                        percent: 25.0,
                    },
                ],
            },
            Report::Sequence {
                sequence: "TT".to_string(),
                count: 2,
            },
        ]
    }

    #[test]
    fn text_blocks_separated_by_line_breaks() {
        let mut out = Vec::new();
        write_reports(&mut out, &reports(), OutputFormat::Text).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "T 75.000\nA 25.000\n\n2\tTT\n"
        );
    }

    #[test]
    fn json_array() {
        let mut out = Vec::new();
        write_reports(&mut out, &reports(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["kind"], "frequency");
        assert_eq!(value[0]["rows"][0]["sequence"], "T");
        assert_eq!(value[0]["rows"][0]["percent"], 75.0);
        assert_eq!(value[1]["kind"], "sequence");
        assert_eq!(value[1]["count"], 2);
    }

    #[test]
    fn empty_frequency_block_is_blank_line() {
        let mut out = Vec::new();
        let empty = Report::Frequency {
            length: 3,
            windows: 0,
            rows: vec![],
        };
        write_text(&mut out, &empty).unwrap();
        assert_eq!(out, b"\n");
    }
}

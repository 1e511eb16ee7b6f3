//! Plain-text report output.
//!
//! One tab-separated line per benchmark run:
//!
//! ```text
//! name    iterations    ns/op         [B/op        allocs/op]
//! switch  1000000000    0.52 ns/op    0 B/op       0 allocs/op
//! broken  FAIL          <panic message>
//! ```
//!
//! Allocation columns appear only when the runner counts allocations.
//! [`parse_line()`] reads a completed line back for comparison tooling.

use std::error::Error;
use std::fmt;
use std::io::{self, Write};

use crate::runner::BenchOutcome;

/// Failure to write a report line. Non-fatal: the line is lost.
#[derive(Debug)]
pub enum ReportError {
    /// The output stream rejected the write.
    Io(io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "report write failed: {e}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Writes report lines to any [`Write`] sink.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    show_allocs: bool,
    name_width: usize,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter. `show_allocs` adds the `B/op` and `allocs/op`
    /// columns for samples that carry allocation counts.
    pub fn new(out: W, show_allocs: bool) -> Self {
        Self {
            out,
            show_allocs,
            name_width: 0,
        }
    }

    /// Left-pad names to `width` so columns line up in a terminal.
    pub fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    /// Write the column header line.
    pub fn write_header(&mut self) -> Result<(), ReportError> {
        let mut line = format!("{:<w$}\titerations\tns/op", "name", w = self.name_width);
        if self.show_allocs {
            line.push_str("\tB/op\tallocs/op");
        }
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Write the line for one benchmark run.
    pub fn write_outcome(&mut self, name: &str, outcome: &BenchOutcome) -> Result<(), ReportError> {
        let line = format_line(name, outcome, self.show_allocs, self.name_width);
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format one report line without a trailing newline.
pub fn format_line(name: &str, outcome: &BenchOutcome, show_allocs: bool, name_width: usize) -> String {
    match outcome {
        BenchOutcome::Completed(sample) => {
            let mut line = format!(
                "{name:<name_width$}\t{}\t{:.2} ns/op",
                sample.iterations,
                sample.ns_per_iter()
            );
            if show_allocs {
                if let (Some(bytes), Some(allocs)) = (sample.bytes_per_iter(), sample.allocs_per_iter()) {
                    line.push_str(&format!("\t{bytes} B/op\t{allocs} allocs/op"));
                }
            }
            line
        }
        BenchOutcome::Failed { reason } => {
            let reason = reason.replace(['\n', '\t'], " ");
            format!("{name:<name_width$}\tFAIL\t{reason}")
        }
    }
}

/// A completed report line read back from text.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedLine {
    /// Benchmark name, padding removed.
    pub name: String,
    /// Iterations in the final round.
    pub iterations: u64,
    /// Nanoseconds per iteration.
    pub ns_per_iter: f64,
    /// Bytes per iteration, if reported.
    pub bytes_per_iter: Option<u64>,
    /// Allocations per iteration, if reported.
    pub allocs_per_iter: Option<u64>,
}

/// Parse a completed report line. Header and `FAIL` lines yield `None`.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let mut cols = line.split('\t');
    let name = cols.next()?.trim().to_string();
    let iterations = cols.next()?.trim().parse().ok()?;
    let ns_per_iter = cols.next()?.trim().strip_suffix(" ns/op")?.parse().ok()?;

    let mut unit_col = |suffix: &str| -> Option<Option<u64>> {
        match cols.next() {
            None => Some(None),
            Some(c) => c.trim().strip_suffix(suffix)?.parse::<u64>().ok().map(Some),
        }
    };
    let bytes_per_iter = unit_col(" B/op")?;
    let allocs_per_iter = unit_col(" allocs/op")?;

    Some(ParsedLine {
        name,
        iterations,
        ns_per_iter,
        bytes_per_iter,
        allocs_per_iter,
    })
}

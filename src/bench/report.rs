//! CSV reporting of measured trials.
//!
//! Every record carries the same 20 columns regardless of which algorithm
//! produced it, so an O(1) identity check and an O(pixels) traversal can be
//! compared on the same axes.

use std::fmt;
use std::io::{self, Write};

use crate::instrument::Snapshot;

/// Column header, emitted once before any record.
pub const HEADER: &str = "test,type,imgA,imgB,width,height,pixels,result,time_sec,time_ctu,\
pixreads,pixwrites,lutreads,lutwrites,pixvalidations,stackops,queueops,peakstack,peakqueue,peakrecdepth";

/// Number of comma-separated fields per line.
pub const NUM_FIELDS: usize = 20;

/// One measured trial.
#[derive(Clone, Debug, PartialEq)]
pub struct Record<'a> {
    /// Algorithm family, e.g. `fill`.
    pub test: &'a str,
    /// Variant within the family, e.g. `queue`.
    pub variant: &'a str,
    /// First operand label.
    pub img_a: &'a str,
    /// Second operand or seed label; may be empty.
    pub img_b: &'a str,
    pub width: usize,
    pub height: usize,
    /// Algorithm outcome: 0/1 for equality, painted pixels or region count otherwise.
    pub result: u64,
    pub snapshot: Snapshot,
}

impl Record<'_> {
    /// Returns `width * height`.
    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{:.6},{:.6}",
            self.test,
            self.variant,
            self.img_a,
            self.img_b,
            self.width,
            self.height,
            self.pixels(),
            self.result,
            self.snapshot.elapsed_sec,
            self.snapshot.elapsed_ctu,
        )?;
        for value in self.snapshot.counters {
            write!(f, ",{value}")?;
        }
        Ok(())
    }
}

/// Writes the header and records as CSV lines.
pub struct Reporter<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    /// Writes the header line; later calls are no-ops.
    pub fn print_header(&mut self) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        writeln!(self.out, "{HEADER}")?;
        self.header_written = true;
        Ok(())
    }

    /// Writes one record line, preceded by the header if it is still pending.
    pub fn print_record(&mut self, record: &Record<'_>) -> io::Result<()> {
        self.print_header()?;
        writeln!(self.out, "{record}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, Reporter, HEADER, NUM_FIELDS};
    use crate::instrument::{Counter, Snapshot};

    fn record() -> Record<'static> {
        let mut counters = [0u64; 10];
        counters[0] = 42;
        counters[9] = 7;
        Record {
            test: "fill",
            variant: "stack",
            img_a: "white4x2",
            img_b: "",
            width: 4,
            height: 2,
            result: 8,
            snapshot: Snapshot {
                counters,
                elapsed_sec: 0.000_123_4,
                elapsed_ctu: 1.5,
            },
        }
    }

    #[test]
    fn header_has_all_columns() {
        assert_eq!(HEADER.split(',').count(), NUM_FIELDS);
        assert!(HEADER.starts_with("test,type,imgA,imgB,width,height,pixels,result"));
        let columns: Vec<&str> = HEADER.split(',').collect();
        assert_eq!(columns[10..], Counter::ALL.map(Counter::column));
    }

    #[test]
    fn record_formats_fixed_columns() {
        let line = record().to_string();
        assert_eq!(
            line,
            "fill,stack,white4x2,,4,2,8,8,0.000123,1.500000,42,0,0,0,0,0,0,0,0,7"
        );
        assert_eq!(line.split(',').count(), NUM_FIELDS);
    }

    #[test]
    fn header_is_written_once() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.print_header().unwrap();
        reporter.print_record(&record()).unwrap();
        reporter.print_header().unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
    }
}

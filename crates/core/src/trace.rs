//! Trace record model and trace sources.
//!
//! This module defines the record the core consumes one-by-one, and the
//! `TraceSource` seam that lets the core be driven either from a file (the
//! real entry point) or from an in-memory sequence (tests, and the
//! determinism law that a file-backed and memory-backed reader serving the
//! same records must produce identical results).

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::SimError;

/// A single memory-reference trace record.
///
/// Consumed strictly in file order, each record exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Target byte address of the memory access.
    pub addr: u64,
    /// Count of preceding non-memory instructions to inject before this
    /// access. Decremented to zero by the core, one per cycle slot, before
    /// the memory access itself is issued.
    pub prec: u64,
    /// Whether this access is a write (`true`) or a read (`false`).
    pub is_write: bool,
}

/// A lazy, finite sequence of trace records.
///
/// The core is the sole consumer: each call to `next` returns the next
/// unread record, or [`SimError::EndOfTrace`] once the source is exhausted.
pub trait TraceSource {
    /// Returns the next trace record, or `Err(SimError::EndOfTrace)` if the
    /// trace has no more records. Malformed input is reported as
    /// `Err(SimError::MalformedTrace { .. })`.
    fn next(&mut self) -> Result<TraceRecord, SimError>;
}

/// Parses one field as a non-negative integer, auto-detecting the base:
/// `0x`/`0X` hex, `0o`/`0O` octal, `0b`/`0B` binary, otherwise decimal.
fn parse_auto_radix(field: &str) -> Result<u64, String> {
    let lower = field.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };
    u64::from_str_radix(digits, radix).map_err(|e| format!("{field:?} is not a valid integer: {e}"))
}

/// Parses a single trace line: whitespace-separated `<prec> <type> <addr>`.
/// Extra trailing fields are ignored.
fn parse_line(line: &str, line_no: usize) -> Result<TraceRecord, SimError> {
    let mut fields = line.split_whitespace();
    let malformed = |reason: String| SimError::MalformedTrace {
        line: line_no,
        reason,
    };

    let prec_field = fields
        .next()
        .ok_or_else(|| malformed("missing prec field".to_string()))?;
    let type_field = fields
        .next()
        .ok_or_else(|| malformed("missing type field".to_string()))?;
    let addr_field = fields
        .next()
        .ok_or_else(|| malformed("missing addr field".to_string()))?;

    let prec = parse_auto_radix(prec_field).map_err(malformed)?;
    let addr = parse_auto_radix(addr_field).map_err(malformed)?;
    let is_write = match type_field {
        "R" => false,
        "W" => true,
        other => return Err(malformed(format!("unknown request type {other:?}"))),
    };

    Ok(TraceRecord {
        addr,
        prec,
        is_write,
    })
}

/// A [`TraceSource`] reading records from a text file, one per line.
pub struct FileTraceReader {
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl FileTraceReader {
    /// Opens `path` for reading. Blank lines are skipped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl TraceSource for FileTraceReader {
    fn next(&mut self) -> Result<TraceRecord, SimError> {
        loop {
            let Some(line) = self.lines.next() else {
                return Err(SimError::EndOfTrace);
            };
            self.line_no += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            return parse_line(&line, self.line_no);
        }
    }
}

/// A [`TraceSource`] serving a pre-built, in-memory sequence of records.
///
/// Used by tests, and to demonstrate that the core's behavior does not
/// depend on the concrete trace source, only on the sequence of records it
/// serves.
pub struct InMemoryTraceReader {
    records: std::vec::IntoIter<TraceRecord>,
}

impl InMemoryTraceReader {
    /// Builds a reader serving exactly `records`, in order.
    #[must_use]
    pub fn new(records: Vec<TraceRecord>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl TraceSource for InMemoryTraceReader {
    fn next(&mut self) -> Result<TraceRecord, SimError> {
        self.records.next().ok_or(SimError::EndOfTrace)
    }
}

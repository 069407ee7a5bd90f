//! Error taxonomy for the simulator.
//!
//! This module defines the error handling for the co-simulation. It provides:
//! 1. **Trace errors:** malformed records and end-of-trace signaling.
//! 2. **I/O errors:** wrapping the underlying trace file reader.
//! 3. **Invariant violations:** fatal, should-be-unreachable internal states.

use std::fmt;
use thiserror::Error;

/// All errors that can surface from the simulation engine.
///
/// All fallible paths in this crate return `Result<_, SimError>`; nothing in
/// the core simulation loop panics. `InvariantViolation` covers states the
/// design proves cannot occur (e.g. a memory response for an address with no
/// MSHR). It exists so a violation aborts with a diagnostic instead of
/// silently corrupting simulator state.
#[derive(Debug, Error)]
pub enum SimError {
    /// A trace line could not be parsed: unknown request type, a field that
    /// did not parse as an integer, or a line with too few fields.
    #[error("malformed trace line {line}: {reason}")]
    MalformedTrace {
        /// 1-based line number in the trace file.
        line: usize,
        /// Human-readable reason the line was rejected.
        reason: String,
    },

    /// The trace source has no more records.
    #[error("end of trace reached")]
    EndOfTrace,

    /// The underlying trace file could not be read.
    #[error("trace I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal invariant was violated. Should be unreachable; indicates
    /// a bug in the DRAM controller or core model rather than bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl SimError {
    /// Builds a [`SimError::InvariantViolation`] from a `Display`-able detail.
    pub fn invariant(detail: impl fmt::Display) -> Self {
        Self::InvariantViolation(detail.to_string())
    }
}

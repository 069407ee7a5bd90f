//! Memory request/response types exchanged between the core and DRAM.
//!
//! This module defines the narrow interface between the out-of-order core
//! and the DRAM controller. It provides:
//! 1. **Requests:** read/write requests tagged with an optional response
//!    receiver.
//! 2. **Responses:** completion notifications carrying only the address.
//! 3. **Receiver capability:** a narrow trait exposing just
//!    `receive_mem_response`, so the DRAM controller never needs to own or
//!    know the concrete type of its issuer.

/// Direction of a memory request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemRequestKind {
    /// A read. Generates a [`MemResponse`] delivered to the receiver.
    Read,
    /// A write. Completed by DRAM timing but never notifies the issuer
    /// (write-response latency is out of scope).
    Write,
}

/// Narrow capability handle for delivering a completed read.
///
/// Implemented by whichever component issued the originating read (the
/// core). The DRAM controller holds this only for the lifetime of a single
/// request and never manages the receiver's lifetime.
pub trait MemResponseReceiver {
    /// Delivers a response for a prior read request, to be observed at
    /// `cycle`.
    fn receive_mem_response(&mut self, cycle: u64, response: MemResponse);
}

/// A request submitted to the DRAM controller.
pub struct MemRequest {
    /// Read or write.
    pub kind: MemRequestKind,
    /// Target byte address.
    pub addr: u64,
}

impl MemRequest {
    /// Builds a read request for `addr`.
    #[must_use]
    pub fn read(addr: u64) -> Self {
        Self {
            kind: MemRequestKind::Read,
            addr,
        }
    }

    /// Builds a write request for `addr`.
    #[must_use]
    pub fn write(addr: u64) -> Self {
        Self {
            kind: MemRequestKind::Write,
            addr,
        }
    }
}

/// A completed memory response, carrying only the address that finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemResponse {
    /// The address whose read has completed.
    pub addr: u64,
}

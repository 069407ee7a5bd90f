//! Miss status holding registers: coalescing of in-flight loads.
//!
//! Concurrent loads to the same address share one outstanding DRAM request.
//! This module provides the table that tracks, per address, which ROB slots
//! are waiting and whether the request has already been issued.

use std::collections::HashMap;

use tracing::trace;

/// One outstanding memory request, shared by every ROB slot waiting on the
/// same address.
#[derive(Debug, Default)]
pub struct Mshr {
    /// ROB slot indices waiting for this address's response, in arrival
    /// order.
    pub rob_indices: Vec<usize>,
    /// Whether the DRAM request for this address has already been sent.
    pub issued: bool,
}

/// Address-keyed table of outstanding load requests.
#[derive(Debug, Default)]
pub struct MshrTable {
    entries: HashMap<u64, Mshr>,
}

impl MshrTable {
    /// Builds an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `addr`, creating an empty one if this is the
    /// first load to that address.
    pub fn entry(&mut self, addr: u64) -> &mut Mshr {
        self.entries.entry(addr).or_insert_with(|| {
            trace!(addr, "mshr created");
            Mshr::default()
        })
    }

    /// Removes and returns the entry for `addr`, once its response has been
    /// delivered to every waiting slot.
    pub fn remove(&mut self, addr: u64) -> Option<Mshr> {
        let removed = self.entries.remove(&addr);
        if let Some(mshr) = &removed {
            trace!(addr, waiters = mshr.rob_indices.len(), "mshr destroyed");
        }
        removed
    }
}

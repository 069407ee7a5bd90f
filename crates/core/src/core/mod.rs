//! Out-of-order core: reorder buffer, MSHR table, and the trace-driven
//! issue/retire loop.
//!
//! This module ties the [`rob`] and [`mshr`] submodules together into the
//! core's per-cycle behavior. It provides:
//! 1. **Issue:** consumes the trace one record at a time, injecting `prec`
//!    non-memory slots before each access and coalescing concurrent loads
//!    to the same address through the MSHR table.
//! 2. **Retirement:** drains the ROB head in strict program order.
//! 3. **Response delivery:** a min-heap of responses keyed by delivery
//!    cycle, filled by the DRAM controller and drained here.

mod mshr;
mod rob;

pub use mshr::{Mshr, MshrTable};
pub use rob::Rob;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::{instrument, trace};

use crate::common::SimError;
use crate::dram::DramController;
use crate::mem::{MemRequest, MemResponse, MemResponseReceiver};
use crate::trace::{TraceRecord, TraceSource};
use rob::AWAITING_RESPONSE;

/// A single-issue-width-configurable, out-of-order core driven by a trace
/// of memory references.
///
/// Owns its reorder buffer and MSHR table, and borrows the DRAM controller
/// each cycle only for the duration of [`Core::tick`].
pub struct Core {
    rob: Rob,
    mshrs: MshrTable,
    pending: BinaryHeap<Reverse<(u64, u64)>>,
    trace: Box<dyn TraceSource>,
    cur_record: Option<TraceRecord>,
    superscalar_width: usize,
    insns_retired: u64,
}

impl Core {
    /// Builds a core over `trace`, pre-fetching its first record.
    ///
    /// If the trace is empty, the core starts already drained rather than
    /// erroring — running it retires nothing and [`Core::is_drained`]
    /// returns `true` immediately.
    pub fn new(
        mut trace: Box<dyn TraceSource>,
        superscalar_width: usize,
        rob_size: usize,
    ) -> Result<Self, SimError> {
        let cur_record = match trace.next() {
            Ok(record) => Some(record),
            Err(SimError::EndOfTrace) => None,
            Err(other) => return Err(other),
        };
        Ok(Self {
            rob: Rob::new(rob_size),
            mshrs: MshrTable::new(),
            pending: BinaryHeap::new(),
            trace,
            cur_record,
            superscalar_width,
            insns_retired: 0,
        })
    }

    /// Total instructions retired so far.
    #[must_use]
    pub fn insns_retired(&self) -> u64 {
        self.insns_retired
    }

    /// True once the trace is exhausted and every in-flight instruction has
    /// retired — nothing further will ever change.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.cur_record.is_none() && self.rob.is_empty() && self.pending.is_empty()
    }

    /// Advances the core by one cycle: retire, then deliver due responses,
    /// then issue. `dram` receives any new requests generated this cycle.
    #[instrument(level = "trace", skip(self, dram), fields(cycle = now))]
    pub fn tick(&mut self, now: u64, dram: &mut DramController) -> Result<(), SimError> {
        self.tick_retire(now);
        self.tick_mem(now)?;
        self.tick_issue(now, dram)?;
        Ok(())
    }

    fn tick_retire(&mut self, now: u64) {
        let mut remaining = self.superscalar_width;
        while remaining > 0 {
            if !self.rob.retire_head(now) {
                break;
            }
            remaining -= 1;
            self.insns_retired += 1;
            trace!(cycle = now, total = self.insns_retired, "rob retired head");
        }
    }

    fn tick_mem(&mut self, now: u64) -> Result<(), SimError> {
        while let Some(Reverse((cycle, addr))) = self.pending.pop() {
            if cycle > now {
                self.pending.push(Reverse((cycle, addr)));
                break;
            }
            self.deliver(addr, now)?;
        }
        Ok(())
    }

    fn deliver(&mut self, addr: u64, now: u64) -> Result<(), SimError> {
        let mshr = self
            .mshrs
            .remove(addr)
            .ok_or_else(|| SimError::invariant(format!("response for {addr:#x} has no MSHR")))?;
        for index in mshr.rob_indices {
            self.rob.mark_eligible(index, now);
        }
        Ok(())
    }

    fn tick_issue(&mut self, now: u64, dram: &mut DramController) -> Result<(), SimError> {
        let mut remaining = self.superscalar_width;
        while remaining > 0 && !self.rob.is_full() {
            let Some(record) = self.cur_record else {
                break;
            };

            if record.prec > 0 {
                self.cur_record = Some(TraceRecord {
                    prec: record.prec - 1,
                    ..record
                });
                let _ = self.rob.allocate(now);
            } else if record.is_write {
                dram.receive_mem_request(&MemRequest::write(record.addr));
                let _ = self.rob.allocate(now);
                self.advance_trace()?;
            } else {
                let index = self.rob.allocate(AWAITING_RESPONSE);
                let mshr = self.mshrs.entry(record.addr);
                mshr.rob_indices.push(index);
                if mshr.issued {
                    trace!(addr = record.addr, "load coalesced into existing mshr");
                } else {
                    mshr.issued = true;
                    dram.receive_mem_request(&MemRequest::read(record.addr));
                }
                self.advance_trace()?;
            }

            remaining -= 1;
        }
        Ok(())
    }

    fn advance_trace(&mut self) -> Result<(), SimError> {
        match self.trace.next() {
            Ok(record) => {
                self.cur_record = Some(record);
                Ok(())
            }
            Err(SimError::EndOfTrace) => {
                self.cur_record = None;
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}

impl MemResponseReceiver for Core {
    fn receive_mem_response(&mut self, cycle: u64, response: MemResponse) {
        self.pending.push(Reverse((cycle, response.addr)));
    }
}

//! Banked, channeled DRAM controller.
//!
//! This module models a DRAM subsystem with open-row state per bank. It
//! provides:
//! 1. **Topology:** a configurable number of channels and banks per channel,
//!    decoded from the low bits of each request's address.
//! 2. **Timing:** fixed command latencies (`t_ccd`, `t_cl`, `t_rcd`, `t_rp`,
//!    `t_ras`) and a `clock_div` that runs the DRAM command clock at a
//!    quarter of the simulator's cycle rate.
//! 3. **Scheduling:** a row-hit-prioritizing request picker that issues at
//!    most one command per channel per DRAM cycle.

mod bank;
mod channel;
mod request;

pub use bank::BankState;
pub use channel::ChannelState;
pub use request::{DramRequest, RequestConflict, OFFSET_BITS, ROW_SIZE_BITS};

use tracing::{instrument, trace};

use crate::config::DramConfig;
use crate::mem::{MemRequest, MemResponse, MemResponseReceiver};

/// Channel command spacing, in DRAM cycles.
pub const T_CCD: u64 = 4;
/// Column access latency (CAS), in DRAM cycles.
pub const T_CL: u64 = 11;
/// Row-to-column delay (RAS-to-CAS), in DRAM cycles.
pub const T_RCD: u64 = 11;
/// Row precharge time, in DRAM cycles.
pub const T_RP: u64 = 11;
/// Row active time (minimum row-open duration), in DRAM cycles.
pub const T_RAS: u64 = 28;
/// Simulator cycles per DRAM command cycle. The controller only evaluates
/// its scheduling loop on cycles where `now % CLOCK_DIV == 0`.
pub const CLOCK_DIV: u64 = 4;

/// A banked, multi-channel DRAM controller.
///
/// Requests are decoded into `(channel, bank, row)` coordinates on arrival
/// and queued per channel; [`DramController::tick`] drains at most one
/// request per channel, per DRAM cycle, preferring a row hit over a miss or
/// conflict already queued ahead of it.
#[derive(Debug)]
pub struct DramController {
    channel_bits: u32,
    bank_bits: u32,
    channels: Vec<ChannelState>,
}

impl DramController {
    /// Builds a controller with the given channel/bank topology, all banks
    /// idle.
    #[must_use]
    pub fn new(config: &DramConfig) -> Self {
        let num_banks = config.banks_per_channel();
        Self {
            channel_bits: config.channel_bits,
            bank_bits: config.bank_bits,
            channels: (0..config.channels())
                .map(|_| ChannelState::new(num_banks))
                .collect(),
        }
    }

    /// Decodes `req` and enqueues it on its target channel. Does not issue
    /// it; issuance happens in [`DramController::tick`].
    pub fn receive_mem_request(&mut self, req: &MemRequest) {
        let decoded = DramRequest::decode(req, self.channel_bits, self.bank_bits);
        self.channels[decoded.channel].waiting.push(decoded);
    }

    /// Advances the controller by one simulator cycle.
    ///
    /// A no-op except on DRAM cycle boundaries (`now % CLOCK_DIV == 0`), at
    /// which point every channel whose command slot is free tries to issue
    /// its best queued request. `receiver` is delivered completed reads
    /// synchronously, with the future cycle at which they become visible.
    #[instrument(level = "trace", skip(self, receiver), fields(cycle = now))]
    pub fn tick(&mut self, now: u64, receiver: &mut dyn MemResponseReceiver) {
        if now % CLOCK_DIV != 0 {
            return;
        }
        for (i, chan) in self.channels.iter_mut().enumerate() {
            if chan.next_request_cycle > now {
                continue;
            }
            if let Some(req) = take_best_request(chan, now) {
                trace!(
                    channel = i,
                    addr = req.addr,
                    bank = req.bank,
                    row = req.row,
                    "channel issuing request"
                );
                issue_request(chan, req, now, receiver);
            }
        }
    }
}

/// Classifies `req` against the bank's currently open row.
fn conflict_state(bank: &BankState, req: &DramRequest) -> RequestConflict {
    match bank.open_row {
        Some(row) if row == req.row => RequestConflict::Hit,
        None => RequestConflict::Miss,
        Some(_) => RequestConflict::Conflict,
    }
}

/// Selects and removes the best-scheduled request from `chan.waiting`.
///
/// Scans in arrival order. A row hit is taken immediately. Otherwise the
/// first request whose bank is free — and, if it would conflict, whose bank
/// has already finished its minimum row-open time — becomes the provisional
/// pick; the scan continues only in case a later entry is an outright hit.
fn take_best_request(chan: &mut ChannelState, now: u64) -> Option<DramRequest> {
    let mut best: Option<usize> = None;
    for (i, req) in chan.waiting.iter().enumerate() {
        let bank = &chan.banks[req.bank];
        if bank.next_request_cycle > now {
            continue;
        }
        let state = conflict_state(bank, req);
        if state == RequestConflict::Hit {
            best = Some(i);
            break;
        }
        if best.is_none() {
            if state == RequestConflict::Conflict && bank.next_conflict_cycle > now {
                trace!(bank = req.bank, row = req.row, "skipping conflict inside t_ras window");
                continue;
            }
            best = Some(i);
        }
    }
    best.map(|i| chan.waiting.remove(i))
}

/// Issues `req` against its channel and bank, advancing their timing state
/// and, for reads, notifying `receiver` of the cycle the response becomes
/// visible.
fn issue_request(
    chan: &mut ChannelState,
    req: DramRequest,
    now: u64,
    receiver: &mut dyn MemResponseReceiver,
) {
    let bank = &chan.banks[req.bank];
    let state = conflict_state(bank, &req);
    let mut req_delay = 0u64;

    chan.next_request_cycle = after(now, T_CCD);

    let bank = &mut chan.banks[req.bank];
    if state != RequestConflict::Hit {
        if state == RequestConflict::Conflict {
            req_delay += T_RP;
        }
        bank.next_conflict_cycle = after(now, req_delay + T_RAS);
        req_delay += T_RCD;
        bank.open_row = Some(req.row);
    }
    req_delay += T_CCD;
    bank.next_request_cycle = after(now, req_delay);

    trace!(
        addr = req.addr,
        bank = req.bank,
        ?state,
        req_delay,
        "request issued"
    );

    if req.want_response {
        receiver.receive_mem_response(
            after(now, req_delay + T_CL),
            MemResponse { addr: req.addr },
        );
    }
}

/// Converts a DRAM-cycle delay into an absolute simulator cycle.
#[inline]
fn after(now: u64, component_cycles: u64) -> u64 {
    now + component_cycles * CLOCK_DIV
}

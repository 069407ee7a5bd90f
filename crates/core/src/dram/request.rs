//! DRAM-coordinate decoration of a memory request.

use crate::mem::{MemRequest, MemRequestKind};

/// Fixed number of address bits consumed by the cache-line offset, below
/// which the channel selection bits begin.
pub const OFFSET_BITS: u32 = 6;

/// Fixed number of address bits spanned by a single DRAM row.
pub const ROW_SIZE_BITS: u32 = 13;

/// A memory request decorated with its decoded `(channel, bank, row)`
/// coordinates.
///
/// Coordinates are decoded once, at [`super::DramController::receive_mem_request`]
/// time, from the following address layout (low bits first):
/// `[ offset (6) | channel (channel_bits) | bank (bank_bits) | row ]`.
pub struct DramRequest {
    /// Original target address.
    pub addr: u64,
    /// Channel index.
    pub channel: usize,
    /// Bank index within the channel.
    pub bank: usize,
    /// Row index within the bank.
    pub row: u64,
    /// Whether a [`crate::mem::MemResponse`] must be delivered on
    /// completion (true for reads, false for writes).
    pub want_response: bool,
}

impl DramRequest {
    /// Decodes `req`'s address into DRAM coordinates for the given topology.
    #[must_use]
    pub fn decode(req: &MemRequest, channel_bits: u32, bank_bits: u32) -> Self {
        let bank_lsb = ROW_SIZE_BITS + channel_bits;
        let row_lsb = bank_lsb + bank_bits;

        let channel = ((req.addr >> OFFSET_BITS) & mask(channel_bits)) as usize;
        let bank = ((req.addr >> bank_lsb) & mask(bank_bits)) as usize;
        let row = req.addr >> row_lsb;

        Self {
            addr: req.addr,
            channel,
            bank,
            row,
            want_response: req.kind == MemRequestKind::Read,
        }
    }
}

/// Returns a mask of the low `bits` bits (0 for `bits == 0`).
fn mask(bits: u32) -> u64 {
    if bits == 0 {
        0
    } else {
        (1u64 << bits) - 1
    }
}

/// Relationship between a request's target row and the bank's currently
/// open row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestConflict {
    /// The bank's open row already matches the request's row.
    Hit,
    /// No row is currently open in the bank.
    Miss,
    /// A different row is open; it must be precharged first.
    Conflict,
}

//! Per-bank open-row state.

/// Tracks which row is currently open in a single bank, and the earliest
/// cycles at which a new command or a row conflict may be serviced.
///
/// A bank is a strictly sequential resource: at most one command is in
/// flight against it at a time, enforced by `next_request_cycle`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BankState {
    /// Row currently open in this bank, or `None` if the bank is idle
    /// (precharged, no open row).
    pub open_row: Option<u64>,
    /// Earliest cycle at which the next command to this bank may issue.
    pub next_request_cycle: u64,
    /// Earliest cycle at which a *different* row may be opened (i.e. the
    /// currently open row has been held long enough to precharge).
    pub next_conflict_cycle: u64,
}

impl BankState {
    /// Builds a fresh, idle bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

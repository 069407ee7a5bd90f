//! Cycle-accurate out-of-order core / banked-DRAM co-simulator.
//!
//! This crate models the interaction between a trace-driven out-of-order
//! core and a banked, multi-channel DRAM controller, cycle by cycle. It
//! provides:
//! 1. **Common:** the monotonic simulation [`common::Clock`] and the
//!    [`common::SimError`] taxonomy shared by every fallible path.
//! 2. **Config:** hierarchical, `serde`-deserializable configuration for the
//!    DRAM topology and core width, mirroring the reference defaults.
//! 3. **Mem:** the narrow request/response vocabulary exchanged between the
//!    core and DRAM.
//! 4. **Trace:** the record format consumed by the core, and file-backed
//!    and in-memory sources for it.
//! 5. **Dram:** the banked controller: address decoding, open-row tracking,
//!    and row-hit-prioritizing scheduling.
//! 6. **Core:** the reorder buffer, MSHR coalescing table, and the
//!    issue/retire loop driving them from a trace.
//! 7. **Sim:** the top-level [`sim::Simulator`] tying clock, DRAM, and core
//!    together.
//! 8. **Stats:** cycle and instructions-retired summary reporting.

/// Monotonic clock and the simulator's error taxonomy.
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// Out-of-order core: reorder buffer, MSHR table, issue/retire loop.
pub mod core;
/// Banked, multi-channel DRAM controller.
pub mod dram;
/// Memory request/response types exchanged between core and DRAM.
pub mod mem;
/// Top-level simulation driver.
pub mod sim;
/// Run statistics (cycles, instructions retired, IPC).
pub mod stats;
/// Trace record model and trace sources.
pub mod trace;

/// The simulator's error taxonomy.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Out-of-order core type.
pub use crate::core::Core;
/// DRAM controller type.
pub use crate::dram::DramController;
/// Top-level simulator; owns the clock, DRAM controller, and core.
pub use crate::sim::Simulator;
/// Run statistics.
pub use crate::stats::SimStats;

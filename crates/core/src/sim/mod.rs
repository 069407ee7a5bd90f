//! Simulation driver.
//!
//! This module owns the top-level [`simulator::Simulator`] that wires the
//! clock, DRAM controller, and core together into the per-cycle loop.

pub mod simulator;

pub use simulator::Simulator;

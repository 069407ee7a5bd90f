//! Simulation statistics collection and reporting.
//!
//! This module tracks the two numbers the reference tool reports. It
//! provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and the
//!    derived instructions-per-cycle rate.

use std::time::Instant;

/// Summary statistics for one simulation run.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
        }
    }
}

impl SimStats {
    /// Instructions retired per cycle. `0.0` if no cycles elapsed.
    #[must_use]
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Prints the run summary to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let mips = if seconds > 0.0 {
            (self.instructions_retired as f64 / seconds) / 1_000_000.0
        } else {
            0.0
        };
        println!("==========================================================");
        println!("OOSIM SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", self.ipc());
        println!("sim_mips                 {mips:.2}");
        println!("==========================================================");
    }
}

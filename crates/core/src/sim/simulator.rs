//! Top-level simulator: owns the clock, the DRAM controller, and the core
//! side-by-side and drives their per-cycle interaction.

use tracing::{debug, info, instrument};

use crate::common::{Clock, SimError};
use crate::config::Config;
use crate::core::Core;
use crate::dram::DramController;
use crate::stats::SimStats;
use crate::trace::{FileTraceReader, TraceSource};

use std::path::Path;

/// Owns every piece of simulator state and advances them in lockstep.
///
/// Each cycle: the core retires, delivers due responses, and issues
/// (possibly generating new DRAM requests); then the DRAM controller ticks,
/// possibly delivering new responses back into the core; then the clock
/// advances. This ordering is the only place the two components interact;
/// neither owns the other.
pub struct Simulator {
    clock: Clock,
    dram: DramController,
    core: Core,
    cycle_budget: u64,
}

impl Simulator {
    /// Builds a simulator over an arbitrary [`TraceSource`].
    pub fn new(config: &Config, trace: Box<dyn TraceSource>) -> Result<Self, SimError> {
        let core = Core::new(trace, config.core.superscalar_width, config.core.rob_size)?;
        Ok(Self {
            clock: Clock::new(),
            dram: DramController::new(&config.dram),
            core,
            cycle_budget: config.cycle_budget,
        })
    }

    /// Builds a simulator reading its trace from a file.
    pub fn from_trace_file(config: &Config, trace_path: impl AsRef<Path>) -> Result<Self, SimError> {
        let trace = FileTraceReader::open(trace_path)?;
        Self::new(config, Box::new(trace))
    }

    /// Advances the simulator by one cycle.
    #[instrument(level = "trace", skip(self), fields(cycle = self.clock.now()))]
    pub fn tick(&mut self) -> Result<(), SimError> {
        let now = self.clock.now();
        self.core.tick(now, &mut self.dram)?;
        self.dram.tick(now, &mut self.core);
        self.clock.tick();
        Ok(())
    }

    /// Runs until the cycle budget is exhausted or the core drains (the
    /// trace is exhausted and nothing remains in flight), whichever comes
    /// first. Returns the resulting statistics.
    pub fn run(&mut self) -> Result<SimStats, SimError> {
        info!(cycle_budget = self.cycle_budget, "starting simulation run");
        let mut stats = SimStats::default();
        while self.clock.now() < self.cycle_budget && !self.core.is_drained() {
            self.tick()?;
        }
        debug!(cycles = self.clock.now(), "simulation run finished");
        stats.cycles = self.clock.now();
        stats.instructions_retired = self.core.insns_retired();
        Ok(stats)
    }
}

//! Configuration system for the co-simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulation. It provides:
//! 1. **Defaults:** baseline topology and timing constants matching the
//!    reference hardware this engine models.
//! 2. **Structures:** hierarchical config for the trace source, the DRAM
//!    controller, and the out-of-order core.
//!
//! Configuration is supplied as JSON (or any `serde`-compatible format) for
//! library users, or built from CLI flags by `oosim-cli`; `Config::default()`
//! reproduces the reference defaults exactly.

use serde::Deserialize;

/// Default configuration constants, matching the reference implementation
/// this simulator was modeled on.
mod defaults {
    /// Default number of address bits selecting the DRAM channel.
    pub const CHANNEL_BITS: u32 = 1;

    /// Default number of address bits selecting the bank within a channel.
    pub const BANK_BITS: u32 = 4;

    /// Default number of instructions the core can issue or retire per cycle.
    pub const SUPERSCALAR_WIDTH: usize = 4;

    /// Default reorder buffer capacity.
    pub const ROB_SIZE: usize = 192;

    /// Default simulation cycle budget.
    pub const CYCLE_BUDGET: u64 = 100_000_000;
}

/// Root configuration for a simulation run.
///
/// # Examples
///
/// ```
/// use oosim_core::config::Config;
///
/// let json = r#"{
///     "dram": { "channel_bits": 2, "bank_bits": 3 },
///     "core": { "superscalar_width": 8, "rob_size": 256 },
///     "cycle_budget": 1000
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.dram.channel_bits, 2);
/// assert_eq!(config.core.superscalar_width, 8);
/// assert_eq!(config.cycle_budget, 1000);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// DRAM controller topology.
    #[serde(default)]
    pub dram: DramConfig,
    /// Out-of-order core topology.
    #[serde(default)]
    pub core: CoreConfig,
    /// Number of simulator cycles to run before stopping.
    #[serde(default = "Config::default_cycle_budget")]
    pub cycle_budget: u64,
}

impl Config {
    /// Returns the default simulation cycle budget.
    fn default_cycle_budget() -> u64 {
        defaults::CYCLE_BUDGET
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dram: DramConfig::default(),
            core: CoreConfig::default(),
            cycle_budget: defaults::CYCLE_BUDGET,
        }
    }
}

/// DRAM controller channel/bank topology.
///
/// Timing parameters (`t_ccd`, `t_cl`, `t_rcd`, `t_rp`, `t_ras`, `clock_div`)
/// are fixed by the reference hardware and live as constants in
/// [`crate::dram`] rather than here; only the address-decoding topology is
/// configurable.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DramConfig {
    /// Number of address bits used to select the channel.
    #[serde(default = "DramConfig::default_channel_bits")]
    pub channel_bits: u32,
    /// Number of address bits used to select the bank within a channel.
    #[serde(default = "DramConfig::default_bank_bits")]
    pub bank_bits: u32,
}

impl DramConfig {
    /// Returns the default channel address-bit count.
    fn default_channel_bits() -> u32 {
        defaults::CHANNEL_BITS
    }

    /// Returns the default bank address-bit count.
    fn default_bank_bits() -> u32 {
        defaults::BANK_BITS
    }

    /// Number of channels implied by `channel_bits`.
    #[must_use]
    pub fn channels(&self) -> usize {
        1usize << self.channel_bits
    }

    /// Number of banks per channel implied by `bank_bits`.
    #[must_use]
    pub fn banks_per_channel(&self) -> usize {
        1usize << self.bank_bits
    }
}

impl Default for DramConfig {
    fn default() -> Self {
        Self {
            channel_bits: defaults::CHANNEL_BITS,
            bank_bits: defaults::BANK_BITS,
        }
    }
}

/// Out-of-order core width and reorder-buffer capacity.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoreConfig {
    /// Maximum instructions issued, and separately retired, per cycle.
    #[serde(default = "CoreConfig::default_superscalar_width")]
    pub superscalar_width: usize,
    /// Reorder buffer capacity.
    #[serde(default = "CoreConfig::default_rob_size")]
    pub rob_size: usize,
}

impl CoreConfig {
    /// Returns the default superscalar issue/retire width.
    fn default_superscalar_width() -> usize {
        defaults::SUPERSCALAR_WIDTH
    }

    /// Returns the default reorder buffer capacity.
    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            superscalar_width: defaults::SUPERSCALAR_WIDTH,
            rob_size: defaults::ROB_SIZE,
        }
    }
}

//! Out-of-order core issue/retire scenarios, driven end-to-end against a
//! real [`DramController`] rather than a stub.

use pretty_assertions::assert_eq;

use oosim_core::config::DramConfig;
use oosim_core::dram::DramController;
use oosim_core::trace::{InMemoryTraceReader, TraceRecord};
use oosim_core::Core;

fn dram() -> DramController {
    DramController::new(&DramConfig {
        channel_bits: 1,
        bank_bits: 4,
    })
}

fn run_to_completion(core: &mut Core, dram: &mut DramController, max_cycles: u64) {
    let mut now = 0;
    while !core.is_drained() && now < max_cycles {
        core.tick(now, dram).unwrap();
        dram.tick(now, core);
        now += 1;
    }
}

#[test]
fn three_non_memory_instructions_retire_before_the_trailing_read() {
    let trace = InMemoryTraceReader::new(vec![TraceRecord {
        addr: 0x40,
        prec: 3,
        is_write: false,
    }]);
    let mut core = Core::new(Box::new(trace), 1, 8).unwrap();
    let mut dram = dram();
    run_to_completion(&mut core, &mut dram, 512);

    assert!(core.is_drained());
    // 3 injected slots plus the read itself.
    assert_eq!(core.insns_retired(), 4);
}

#[test]
fn two_concurrent_loads_to_the_same_address_both_retire_on_one_dram_round_trip() {
    let trace = InMemoryTraceReader::new(vec![
        TraceRecord {
            addr: 0x400,
            prec: 0,
            is_write: false,
        },
        TraceRecord {
            addr: 0x400,
            prec: 0,
            is_write: false,
        },
    ]);
    // Wide enough to issue both loads in the same cycle, so they coalesce
    // into a single MSHR entry instead of queuing behind each other.
    let mut core = Core::new(Box::new(trace), 4, 8).unwrap();
    let mut dram = dram();
    run_to_completion(&mut core, &mut dram, 512);

    assert!(core.is_drained());
    assert_eq!(core.insns_retired(), 2);
}

#[test]
fn write_then_read_to_different_addresses_does_not_serialize_on_the_write() {
    let trace = InMemoryTraceReader::new(vec![
        TraceRecord {
            addr: 0x800,
            prec: 0,
            is_write: true,
        },
        TraceRecord {
            addr: 0x900,
            prec: 0,
            is_write: false,
        },
    ]);
    let mut core = Core::new(Box::new(trace), 4, 8).unwrap();
    let mut dram = dram();
    run_to_completion(&mut core, &mut dram, 512);

    assert!(core.is_drained());
    assert_eq!(core.insns_retired(), 2);
}

#[test]
fn a_narrow_rob_throttles_but_does_not_drop_instructions() {
    let records: Vec<TraceRecord> = (0..20)
        .map(|i| TraceRecord {
            addr: 0x1000 + i * 0x40,
            prec: 0,
            is_write: i % 2 == 0,
        })
        .collect();
    let trace = InMemoryTraceReader::new(records);
    // A ROB with only two slots forces issue to stall on retirement
    // throughout the run.
    let mut core = Core::new(Box::new(trace), 2, 2).unwrap();
    let mut dram = dram();
    run_to_completion(&mut core, &mut dram, 4096);

    assert!(core.is_drained());
    assert_eq!(core.insns_retired(), 20);
}

#[test]
fn empty_trace_never_issues_a_dram_request() {
    let trace = InMemoryTraceReader::new(vec![]);
    let mut core = Core::new(Box::new(trace), 4, 8).unwrap();
    let mut dram = dram();
    assert!(core.is_drained());
    run_to_completion(&mut core, &mut dram, 16);
    assert_eq!(core.insns_retired(), 0);
}

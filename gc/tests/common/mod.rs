//! Shared fixtures for embergc's integration test suite.

use embergc::collector::{Collector, Generation};
use embergc::config::GcConfig;
use embergc_objects::{Integer, List};
use std::cell::Cell;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A collector sized small enough that a handful of allocations reliably
/// cross the incremental/full thresholds within a single test.
pub fn small_collector() -> Collector {
    Collector::new(GcConfig {
        initial_nursery_z: 4096,
        initial_tenured_z: 16384,
        incr_gc_threshold: 1024,
        full_gc_threshold: 2048,
        allow_incremental_gc: true,
        stats_history_z: 32,
        object_stats_flag: false,
        debug_flag: false,
    })
    .expect("small collector config is valid")
}

pub fn make_int(gc: &mut Collector, value: i64) -> embergc::Gc<Integer> {
    Integer::new(gc, value).expect("allocation should succeed in a fresh collector")
}

pub fn make_cons(
    gc: &mut Collector,
    head: embergc::Address,
    tail: embergc::Address,
) -> embergc::Gc<List> {
    List::cons(gc, head, tail).expect("allocation should succeed in a fresh collector")
}

/// Assert every address in `addrs` is distinct.
pub fn assert_all_unique(addrs: &[embergc::Address]) {
    for i in 0..addrs.len() {
        for j in (i + 1)..addrs.len() {
            assert_ne!(addrs[i], addrs[j], "duplicate address at indices {i} and {j}");
        }
    }
}

pub fn root_slot(gc: &mut Collector, slot: &Cell<embergc::Address>) {
    gc.add_gc_root(slot).expect("collector must be idle to add a root");
}

pub fn run_cycle(gc: &mut Collector, upto: Generation) {
    gc.request_gc(upto).expect("collection request should succeed");
}

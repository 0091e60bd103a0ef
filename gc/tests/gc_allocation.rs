//! Allocation tests - bump-pointer invariants: unique addresses,
//! word alignment, monotonic growth within an epoch, and the
//! incremental threshold firing an automatic collection.

mod common;

use common::*;
use embergc::Generation;

#[test]
fn addresses_are_non_null_and_unique() {
    let mut gc = small_collector();
    let addrs: Vec<_> = (0..16).map(|i| make_int(&mut gc, i).addr()).collect();
    assert!(addrs.iter().all(|a| !a.is_null()));
    assert_all_unique(&addrs);
}

#[test]
fn allocation_is_word_aligned() {
    let mut gc = small_collector();
    for i in 0..8 {
        let addr = make_int(&mut gc, i).addr();
        assert_eq!(addr.as_usize() % std::mem::size_of::<usize>(), 0);
    }
}

#[test]
fn bump_pointer_is_monotonic_within_an_epoch() {
    let mut gc = small_collector();
    let mut prev = make_int(&mut gc, 0).addr();
    for i in 1..8 {
        let next = make_int(&mut gc, i).addr();
        assert!(next.as_usize() > prev.as_usize());
        prev = next;
    }
}

#[test]
fn crossing_incremental_threshold_runs_a_nursery_cycle() {
    let mut gc = small_collector();
    assert_eq!(gc.n_gc(Generation::Nursery), 0);
    // Each Integer is small; allocate enough to exceed incr_gc_threshold (1024b).
    for i in 0..200 {
        make_int(&mut gc, i);
    }
    assert!(gc.n_gc(Generation::Nursery) > 0, "threshold crossing should trigger a cycle");
}

#[test]
fn heap_exhausted_poisons_the_collector() {
    let mut gc = small_collector();
    let huge = 1 << 30;
    let err = embergc_objects::Integer::new(&mut gc, 0).map(|_| ());
    assert!(err.is_ok());
    let result = gc.alloc(huge);
    assert!(result.is_err());
    // Further allocation must fail too: the collector is poisoned.
    let second = gc.alloc(8);
    assert!(second.is_err());
}

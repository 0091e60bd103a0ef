//! Scenario tests for the collector's documented behaviors: garbage
//! accounting for unrooted objects, deferred mutation-log entries that
//! later become live, and the capacity-planning guarantee that a
//! collection never fails mid-cycle once it has started.

mod common;

use common::*;
use embergc::{Address, Generation};

#[test]
fn garbage0_equals_new_allocation_when_nothing_is_rooted() {
    let mut gc = small_collector();
    for i in 0..5 {
        make_int(&mut gc, i);
    }
    let new_alloc = gc.nursery_to_allocated();

    run_cycle(&mut gc, Generation::Nursery);

    let cycle = gc.statistics().latest().expect("one cycle ran");
    assert_eq!(cycle.garbage0_z, new_alloc);
    assert_eq!(cycle.survive_z, 0);
}

#[test]
fn garbage0_shrinks_by_exactly_the_survivor_size_when_one_object_is_rooted() {
    let mut gc = small_collector();
    let survivor = make_int(&mut gc, 1);
    root_slot(&mut gc, survivor.slot());
    for i in 0..4 {
        make_int(&mut gc, i);
    }
    let new_alloc = gc.nursery_to_allocated();

    run_cycle(&mut gc, Generation::Nursery);

    let cycle = gc.statistics().latest().expect("one cycle ran");
    assert!(cycle.survive_z > 0);
    assert_eq!(cycle.garbage0_z, new_alloc - cycle.survive_z);
}

#[test]
fn a_mutation_log_entry_whose_parent_is_unreachable_at_forwarding_time_is_deferred_then_resolved() {
    // `grandparent -> parent(tenured) -> child(nursery)` where only
    // `grandparent` is rooted: at the start of the fixpoint loop, `parent`
    // hasn't been reached by root evacuation yet, so the logged entry for
    // `parent -> child` is initially deferred. It resolves once root
    // evacuation (which happens first, within the same cycle) reaches
    // `parent` through `grandparent`.
    let mut gc = small_collector();
    let parent = make_cons(&mut gc, Address::NULL, Address::NULL);
    root_slot(&mut gc, parent.slot());
    run_cycle(&mut gc, Generation::Tenured);
    assert_eq!(
        gc.tospace_generation_of(parent.addr()),
        Some(Generation::Tenured)
    );

    let grandparent = make_cons(&mut gc, parent.addr(), Address::NULL);
    root_slot(&mut gc, grandparent.slot());

    let child = make_int(&mut gc, 42);
    unsafe {
        parent.as_ref().set_head(&mut gc, parent.addr(), child.addr());
    }
    assert!(gc.mlog_size() > 0);

    run_cycle(&mut gc, Generation::Nursery);

    let resolved_child = unsafe { parent.as_ref().head() };
    assert!(!resolved_child.is_null());
    let int: embergc::Gc<embergc_objects::Integer> = embergc::Gc::from_address(resolved_child);
    assert_eq!(unsafe { int.as_ref().value() }, 42);
}

#[test]
fn a_full_cycle_never_fails_once_capacity_planning_has_committed_enough_tenured_space() {
    let mut gc = small_collector();
    let mut roots = Vec::new();
    for i in 0..30 {
        let handle = make_int(&mut gc, i);
        root_slot(&mut gc, handle.slot());
        roots.push(handle);
    }

    run_cycle(&mut gc, Generation::Tenured);

    for (i, handle) in roots.iter().enumerate() {
        assert_eq!(unsafe { handle.as_ref().value() }, i as i64);
    }
}

#[test]
fn promotion_only_happens_for_objects_that_predate_the_current_nursery_checkpoint() {
    let mut gc = small_collector();
    let old = make_int(&mut gc, 1);
    root_slot(&mut gc, old.slot());
    run_cycle(&mut gc, Generation::Nursery);
    assert_eq!(gc.tospace_generation_of(old.addr()), Some(Generation::Nursery));

    let fresh = make_int(&mut gc, 2);
    root_slot(&mut gc, fresh.slot());
    run_cycle(&mut gc, Generation::Nursery);

    // `old` predates this cycle's checkpoint and so is eligible to
    // promote on the next full collection; `fresh` was allocated after
    // the checkpoint and must stay in the nursery through this cycle.
    assert_eq!(gc.tospace_generation_of(fresh.addr()), Some(Generation::Nursery));
}

//! Correctness tests - reachability is preserved, unreachable objects
//! are reclaimed, every slot pointing at a relocated object is updated
//! consistently, and forwarding never double-copies.

mod common;

use common::*;
use embergc::{Address, Generation};
use embergc_objects::Object;

#[test]
fn rooted_object_survives_a_full_cycle() {
    let mut gc = small_collector();
    let handle = make_int(&mut gc, 99);
    root_slot(&mut gc, handle.slot());

    run_cycle(&mut gc, Generation::Tenured);

    assert_eq!(unsafe { handle.as_ref().value() }, 99);
}

#[test]
fn unrooted_object_does_not_survive() {
    let mut gc = small_collector();
    let before = gc.allocated();
    make_int(&mut gc, 1);
    let after_alloc = gc.allocated();
    assert!(after_alloc > before);

    run_cycle(&mut gc, Generation::Tenured);

    // Nothing was rooted, so the tenured generation stays empty.
    assert_eq!(gc.tenured_to_allocated(), 0);
}

#[test]
fn two_slots_pointing_at_the_same_object_see_the_same_new_address() {
    let mut gc = small_collector();
    let shared = make_int(&mut gc, 7);
    let a = make_cons(&mut gc, shared.addr(), Address::NULL);
    let b = make_cons(&mut gc, shared.addr(), Address::NULL);
    root_slot(&mut gc, a.slot());
    root_slot(&mut gc, b.slot());

    run_cycle(&mut gc, Generation::Tenured);

    let head_a = unsafe { a.as_ref().head() };
    let head_b = unsafe { b.as_ref().head() };
    assert_eq!(head_a, head_b);
    assert!(!head_a.is_null());
}

#[test]
fn cyclic_graph_survives_without_infinite_forwarding() {
    let mut gc = small_collector();
    let a = make_cons(&mut gc, Address::NULL, Address::NULL);
    let b = make_cons(&mut gc, a.addr(), Address::NULL);
    unsafe {
        a.as_ref().set_tail(&mut gc, a.addr(), b.addr());
    }
    // Root both ends so each handle's own slot is kept current by the
    // collector; only a root's slot is guaranteed to be rewritten.
    root_slot(&mut gc, a.slot());
    root_slot(&mut gc, b.slot());

    run_cycle(&mut gc, Generation::Tenured);

    let a_tail = unsafe { a.as_ref().tail() };
    let b_head = unsafe { b.as_ref().head() };
    assert_eq!(a_tail, b.addr());
    assert_eq!(b_head, a.addr());
}

#[test]
fn identifying_a_relocated_object_through_its_vtable_still_works() {
    let mut gc = small_collector();
    let handle = make_int(&mut gc, 5);
    root_slot(&mut gc, handle.slot());

    run_cycle(&mut gc, Generation::Tenured);

    let identified = unsafe { Object::from_address(handle.addr()) };
    assert!(matches!(identified, Some(Object::Integer(_))));
}

#[test]
fn repeated_nursery_cycles_keep_a_root_reachable() {
    let mut gc = small_collector();
    let handle = make_int(&mut gc, 3);
    root_slot(&mut gc, handle.slot());

    for _ in 0..5 {
        run_cycle(&mut gc, Generation::Nursery);
        assert_eq!(unsafe { handle.as_ref().value() }, 3);
    }
}

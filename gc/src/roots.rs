//! Roots Module - Pinned Root Slots
//!
//! The collector holds a flat list of slot addresses the mutator has
//! registered as roots. Roots are only ever added or removed while the
//! collector is idle; `Collector` enforces that, not this module.

use crate::address::Address;
use crate::error::{GcError, Result};
use std::cell::Cell;

/// A registered root pin list.
///
/// `remove` is a linear scan with an order-preserving erase; the order
/// of the remaining roots matters, since root processing during a cycle
/// walks them in registration order.
#[derive(Default)]
pub struct RootSet {
    slots: Vec<*const Cell<Address>>,
}

impl RootSet {
    pub fn new() -> Self {
        RootSet { slots: Vec::new() }
    }

    pub fn add(&mut self, slot: *const Cell<Address>) {
        self.slots.push(slot);
    }

    pub fn remove(&mut self, slot: *const Cell<Address>) -> Result<()> {
        match self.slots.iter().position(|&s| s == slot) {
            Some(pos) => {
                self.slots.remove(pos);
                Ok(())
            }
            None => Err(GcError::InvalidRoot),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, *const Cell<Address>> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_unregistered_slot_is_invalid_root() {
        let mut roots = RootSet::new();
        let cell = Cell::new(Address::NULL);
        let err = roots.remove(&cell as *const _).unwrap_err();
        assert!(matches!(err, GcError::InvalidRoot));
    }

    #[test]
    fn remove_preserves_order_of_remaining_roots() {
        let mut roots = RootSet::new();
        let a = Cell::new(Address::from_usize(1));
        let b = Cell::new(Address::from_usize(2));
        let c = Cell::new(Address::from_usize(3));
        roots.add(&a);
        roots.add(&b);
        roots.add(&c);
        roots.remove(&b).unwrap();
        let remaining: Vec<_> = roots.iter().cloned().collect();
        assert_eq!(remaining, vec![&a as *const _, &c as *const _]);
    }
}

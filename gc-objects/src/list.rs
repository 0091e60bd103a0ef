//! Cons-cell list - a two-pointer `GcObject`, the minimal shape that
//! exercises `forward_children` visiting more than one slot and the
//! mutation log (via [`List::set_head`] / [`List::set_tail`] going
//! through the write barrier instead of a raw `Cell::set`).

use embergc::address::Address;
use embergc::collector::Collector;
use embergc::object::{GcObject, Header, Relocator, VTable};
use embergc::{Gc, Result};
use std::cell::Cell;

pub(crate) static LIST_VTABLE: VTable = VTable::of::<List>();

#[repr(C)]
pub struct List {
    header: Header,
    head: Cell<Address>,
    tail: Cell<Address>,
}

impl List {
    pub fn cons(gc: &mut Collector, head: Address, tail: Address) -> Result<Gc<List>> {
        let addr = gc.alloc(std::mem::size_of::<List>())?;
        unsafe {
            std::ptr::write(
                addr.as_usize() as *mut List,
                List {
                    header: Header::new(&LIST_VTABLE),
                    head: Cell::new(head),
                    tail: Cell::new(tail),
                },
            );
        }
        Ok(Gc::from_address(addr))
    }

    pub fn head(&self) -> Address {
        self.head.get()
    }

    pub fn tail(&self) -> Address {
        self.tail.get()
    }

    /// Store through the write barrier so the mutation log stays correct
    /// if `this` is tenured or nursery-G₁ and `value` is nursery.
    pub fn set_head(&self, gc: &mut Collector, this: Address, value: Address) {
        gc.assign_member(this, &self.head, value);
    }

    pub fn set_tail(&self, gc: &mut Collector, this: Address, value: Address) {
        gc.assign_member(this, &self.tail, value);
    }
}

impl GcObject for List {
    const NAME: &'static str = "List";

    fn header(&self) -> &Header {
        &self.header
    }

    fn forward_children(&self, relocator: &mut dyn Relocator) {
        relocator.relocate(&self.head);
        relocator.relocate(&self.tail);
    }
}

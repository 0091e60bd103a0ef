//! Boxed 64-bit integer - the simplest possible `GcObject`: a header
//! plus one scalar field, no children to forward.

use embergc::collector::Collector;
use embergc::object::{GcObject, Header, Relocator, VTable};
use embergc::{Gc, Result};

pub(crate) static INTEGER_VTABLE: VTable = VTable::of::<Integer>();

#[repr(C)]
pub struct Integer {
    header: Header,
    value: i64,
}

impl Integer {
    pub fn new(gc: &mut Collector, value: i64) -> Result<Gc<Integer>> {
        let addr = gc.alloc(std::mem::size_of::<Integer>())?;
        unsafe {
            std::ptr::write(
                addr.as_usize() as *mut Integer,
                Integer {
                    header: Header::new(&INTEGER_VTABLE),
                    value,
                },
            );
        }
        Ok(Gc::from_address(addr))
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl GcObject for Integer {
    const NAME: &'static str = "Integer";

    fn header(&self) -> &Header {
        &self.header
    }

    fn forward_children(&self, _relocator: &mut dyn Relocator) {}
}

//! Interned-style string - a leaf `GcObject` with a variable-length
//! inline tail, exercising the one case where `shallow_size` cannot
//! default to `size_of::<Self>()`: a type with a variable-length payload
//! must override it.
//!
//! The UTF-8 bytes live immediately after the fixed `{header, len}`
//! prefix in the same allocation; `UniqueString` itself only ever
//! borrows those bytes through raw pointer arithmetic, never as a Rust
//! field, since their length isn't known until construction.

use embergc::collector::Collector;
use embergc::object::{GcObject, Header, Relocator, VTable};
use embergc::{Gc, Result};

pub(crate) static UNIQUE_STRING_VTABLE: VTable = VTable::of::<UniqueString>();

#[repr(C)]
pub struct UniqueString {
    header: Header,
    len: usize,
}

impl UniqueString {
    pub fn new(gc: &mut Collector, s: &str) -> Result<Gc<UniqueString>> {
        let total = std::mem::size_of::<UniqueString>() + s.len();
        let addr = gc.alloc(total)?;
        unsafe {
            std::ptr::write(
                addr.as_usize() as *mut UniqueString,
                UniqueString {
                    header: Header::new(&UNIQUE_STRING_VTABLE),
                    len: s.len(),
                },
            );
            std::ptr::copy_nonoverlapping(
                s.as_ptr(),
                (addr.as_usize() + std::mem::size_of::<UniqueString>()) as *mut u8,
                s.len(),
            );
        }
        Ok(Gc::from_address(addr))
    }

    pub fn as_str(&self) -> &str {
        unsafe {
            let base = (self as *const Self as *const u8).add(std::mem::size_of::<Self>());
            let bytes = std::slice::from_raw_parts(base, self.len);
            std::str::from_utf8_unchecked(bytes)
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl GcObject for UniqueString {
    const NAME: &'static str = "UniqueString";

    fn header(&self) -> &Header {
        &self.header
    }

    fn shallow_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.len
    }

    fn forward_children(&self, _relocator: &mut dyn Relocator) {}
}

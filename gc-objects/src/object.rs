//! Tagged union over the three concrete types, for code that wants to
//! inspect a heterogeneous slot (a `List` cell's `head`/`tail`, for
//! instance) without knowing its type ahead of time. Dispatch is by
//! vtable identity, the same mechanism the collector itself uses to
//! find a `shallow_copy`/`forward_children` pair.

use crate::integer::{Integer, INTEGER_VTABLE};
use crate::list::{List, LIST_VTABLE};
use crate::unique_string::{UniqueString, UNIQUE_STRING_VTABLE};
use embergc::address::Address;
use embergc::object::{Gc, Header};

pub enum Object {
    Integer(Gc<Integer>),
    List(Gc<List>),
    UniqueString(Gc<UniqueString>),
}

impl Object {
    /// Identify the concrete type stored at `addr` by its header's
    /// vtable and wrap it in the matching `Gc<T>` handle.
    ///
    /// # Safety
    /// `addr` must be null or point at a live object allocated by one of
    /// this crate's constructors.
    pub unsafe fn from_address(addr: Address) -> Option<Object> {
        if addr.is_null() {
            return None;
        }
        let header = &*(addr.as_usize() as *const Header);
        let vtable = header.vtable();
        if std::ptr::eq(vtable, &INTEGER_VTABLE) {
            Some(Object::Integer(Gc::from_address(addr)))
        } else if std::ptr::eq(vtable, &LIST_VTABLE) {
            Some(Object::List(Gc::from_address(addr)))
        } else if std::ptr::eq(vtable, &UNIQUE_STRING_VTABLE) {
            Some(Object::UniqueString(Gc::from_address(addr)))
        } else {
            None
        }
    }

    pub fn addr(&self) -> Address {
        match self {
            Object::Integer(g) => g.addr(),
            Object::List(g) => g.addr(),
            Object::UniqueString(g) => g.addr(),
        }
    }
}

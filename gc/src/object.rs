//! Object Module - Per-Type Interface Consumed By The Collector
//!
//! Every GC-managed type embeds a [`Header`] as its first field. The
//! header is a single tagged machine word: live objects store a pointer
//! to their type's [`VTable`] there; forwarded objects store their
//! destination [`Address`] with the low bit set. This removes any need
//! for an auxiliary side-table during evacuation.
//!
//! The collector never sees a concrete object type: it dispatches
//! through the four function pointers in `VTable`, found by reading the
//! live tag out of an object's header. Each type's `VTable` is built once
//! and referenced by every instance of that type, standing in for a
//! runtime type registry.

use crate::address::Address;
use std::cell::Cell;
use std::marker::PhantomData;

const FORWARDED_TAG: usize = 1;

/// The leading word of every GC-managed object.
///
/// Single-threaded by design (no concurrent mutator), so this is a plain
/// [`Cell`] rather than an atomic, unlike a concurrent collector's mark
/// word.
#[repr(transparent)]
pub struct Header {
    word: Cell<usize>,
}

impl Header {
    /// Construct a live header pointing at `vtable`.
    pub fn new(vtable: &'static VTable) -> Self {
        let raw = vtable as *const VTable as usize;
        debug_assert_eq!(raw & FORWARDED_TAG, 0, "VTable must be word-aligned");
        Header {
            word: Cell::new(raw),
        }
    }

    #[inline]
    pub fn is_forwarded(&self) -> bool {
        self.word.get() & FORWARDED_TAG != 0
    }

    /// Stamp a forwarding address over the header. Calling this twice
    /// within one cycle is a caller bug (the second `shallow_copy` would
    /// double-evacuate), but the header itself never "unforwards" once
    /// tagged.
    pub fn set_forwarded(&self, dest: Address) {
        self.word.set(dest.as_usize() | FORWARDED_TAG);
    }

    /// The address this object was relocated to. Panics (debug) if the
    /// header is not currently forwarded.
    pub fn destination(&self) -> Address {
        debug_assert!(self.is_forwarded());
        Address::from_usize(self.word.get() & !FORWARDED_TAG)
    }

    /// The live type's vtable. Panics (debug) if the header is forwarded.
    pub fn vtable(&self) -> &'static VTable {
        debug_assert!(!self.is_forwarded());
        unsafe { &*(self.word.get() as *const VTable) }
    }
}

/// Receives `relocate` calls from [`GcObject::forward_children`]
/// implementations, without `object` needing to depend on the
/// collector's concrete type.
pub trait Relocator {
    /// Evacuate the object referenced by `slot` (a root or an in-object
    /// pointer field), applying the promotion rule.
    fn relocate(&mut self, slot: &Cell<Address>);
}

/// The four functions every registered type supplies.
///
/// Built once per type via [`VTable::of`] and referenced by every
/// instance's [`Header`] — the set of `'static` `VTable` values a host
/// declares for its types stands in for a runtime type registry.
pub struct VTable {
    pub name: &'static str,
    pub shallow_size: unsafe fn(Address) -> usize,
    pub shallow_copy: unsafe fn(Address, &mut crate::arena::Arena) -> Address,
    pub forward_children: unsafe fn(Address, &mut dyn Relocator) -> usize,
}

impl VTable {
    /// Build the vtable for `T`. Intended to be assigned to a `static` at
    /// the type's definition site:
    ///
    /// ```ignore
    /// static INTEGER_VTABLE: VTable = VTable::of::<Integer>();
    /// ```
    pub const fn of<T: GcObject>() -> VTable {
        VTable {
            name: T::NAME,
            shallow_size: shallow_size_impl::<T>,
            shallow_copy: shallow_copy_impl::<T>,
            forward_children: forward_children_impl::<T>,
        }
    }
}

unsafe fn shallow_size_impl<T: GcObject>(addr: Address) -> usize {
    let obj = &*(addr.as_usize() as *const T);
    obj.shallow_size()
}

unsafe fn shallow_copy_impl<T: GcObject>(
    addr: Address,
    dest_arena: &mut crate::arena::Arena,
) -> Address {
    let obj = &*(addr.as_usize() as *const T);
    let size = obj.shallow_size();
    let dest = dest_arena
        .alloc(size)
        .expect("destination arena sized by capacity planning");
    std::ptr::copy_nonoverlapping(
        addr.as_usize() as *const u8,
        dest.as_usize() as *mut u8,
        size,
    );
    dest
}

unsafe fn forward_children_impl<T: GcObject>(addr: Address, relocator: &mut dyn Relocator) -> usize {
    let obj = &*(addr.as_usize() as *const T);
    obj.forward_children(relocator);
    obj.shallow_size()
}

/// Implemented by every type the collector can allocate and relocate.
///
/// `shallow_size` defaults to `size_of::<Self>()`, which is correct for
/// any fixed-layout type; types with a variable-length tail (e.g. a
/// string's inline bytes) override it. `forward_children` has no useful
/// default and must name every pointer-typed slot, in declaration order.
pub trait GcObject: Sized + 'static {
    /// Used only for the vtable's diagnostic name.
    const NAME: &'static str;

    fn header(&self) -> &Header;

    fn shallow_size(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn forward_children(&self, relocator: &mut dyn Relocator);
}

/// A handle to a `T` allocated through the collector.
///
/// `Gc<T>` is `#[repr(transparent)]` over its single `Cell<Address>` slot
/// so that a reference to one *is* a valid root/mutation-log `lhs`: the
/// collector relocates slots without ever naming `T` (see
/// [`Relocator::relocate`]).
#[repr(transparent)]
pub struct Gc<T> {
    slot: Cell<Address>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Gc<T> {
    /// A null handle (no object).
    pub const fn null() -> Self {
        Gc {
            slot: Cell::new(Address::NULL),
            _marker: PhantomData,
        }
    }

    /// Wrap an already-allocated address.
    pub fn from_address(addr: Address) -> Self {
        Gc {
            slot: Cell::new(addr),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn addr(&self) -> Address {
        self.slot.get()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.slot.get().is_null()
    }

    /// The slot this handle occupies, for passing to
    /// [`Relocator::relocate`] or the write barrier.
    #[inline]
    pub fn slot(&self) -> &Cell<Address> {
        &self.slot
    }

    /// Overwrite the slot directly, bypassing the write barrier. Used
    /// internally by the collector when rewriting pointers during
    /// evacuation; mutator code should go through
    /// `Collector::assign_member` instead.
    #[inline]
    pub fn set_raw(&self, addr: Address) {
        self.slot.set(addr);
    }
}

impl<T: GcObject> Gc<T> {
    /// Dereference the handle. Caller must ensure the address is
    /// currently valid (not stale across a collection the caller didn't
    /// re-resolve the handle through).
    ///
    /// # Safety
    /// The handle must point at a live `T` in one of the collector's
    /// arenas.
    pub unsafe fn as_ref(&self) -> &T {
        &*(self.slot.get().as_usize() as *const T)
    }
}

impl<T> Clone for Gc<T> {
    fn clone(&self) -> Self {
        Gc {
            slot: Cell::new(self.slot.get()),
            _marker: PhantomData,
        }
    }
}

impl<T> Copy for Gc<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf {
        header: Header,
        value: u64,
    }

    static LEAF_VTABLE: VTable = VTable::of::<Leaf>();

    impl GcObject for Leaf {
        const NAME: &'static str = "Leaf";

        fn header(&self) -> &Header {
            &self.header
        }

        fn forward_children(&self, _relocator: &mut dyn Relocator) {}
    }

    #[test]
    fn header_starts_unforwarded_and_reports_vtable() {
        let leaf = Leaf {
            header: Header::new(&LEAF_VTABLE),
            value: 42,
        };
        assert!(!leaf.header().is_forwarded());
        assert_eq!(leaf.header().vtable().name, "Leaf");
    }

    #[test]
    fn set_forwarded_then_destination_roundtrips() {
        let leaf = Leaf {
            header: Header::new(&LEAF_VTABLE),
            value: 7,
        };
        let dest = Address::from_usize(0x4000);
        leaf.header().set_forwarded(dest);
        assert!(leaf.header().is_forwarded());
        assert_eq!(leaf.header().destination(), dest);
    }

    #[test]
    fn gc_handle_is_null_by_default() {
        let handle: Gc<Leaf> = Gc::null();
        assert!(handle.is_null());
    }
}

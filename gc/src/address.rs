//! Address Module - Object and Slot Addressing
//!
//! An [`Address`] is a raw byte offset into one of the collector's four
//! arenas (nursery-from, nursery-to, tenured-from, tenured-to). Addresses
//! are never dereferenced directly by collector code outside `arena` and
//! `object`; everywhere else they are opaque handles compared and copied
//! by value.

use std::fmt;

/// A byte address into one of the collector's arenas, or the null address.
///
/// `Address` is a thin newtype over `usize` rather than a raw pointer so
/// that it can be stored, compared, and logged without `unsafe`; only the
/// arena and object modules convert it to and from real memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(usize);

impl Address {
    /// The null address, used for empty slots and absent parents.
    pub const NULL: Address = Address(0);

    /// Wrap a raw byte address.
    #[inline]
    pub const fn from_usize(raw: usize) -> Self {
        Address(raw)
    }

    /// The underlying byte address.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Offset this address by `delta` bytes.
    #[inline]
    pub fn offset(self, delta: usize) -> Address {
        Address(self.0 + delta)
    }

    /// Byte distance from `base` to `self`; panics if `self < base`.
    #[inline]
    pub fn distance_from(self, base: Address) -> usize {
        self.0 - base.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

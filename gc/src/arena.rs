//! Arena Module - Bump-Pointer Region With Reserve/Commit/Checkpoint
//!
//! An [`Arena`] is a single contiguous, page-aligned region backing one
//! space (from or to) of one generation. It never frees memory piecemeal;
//! the only ways its bump pointer moves backward are [`Arena::reset`]
//! (wholesale reuse of a from-space as the next to-space) and collector
//! bookkeeping that never touches the arena's own state.

use crate::address::Address;
use crate::error::{GcError, Result};
use memmap2::MmapMut;

/// Round `n` up to the nearest multiple of the host page size.
pub fn align_to_page(n: usize) -> usize {
    let page = page_size::get();
    (n + page - 1) & !(page - 1)
}

/// Round `n` up to machine-word alignment (the object alignment every
/// allocation request is rounded to).
pub fn align_to_word(n: usize) -> usize {
    let word = std::mem::size_of::<usize>();
    (n + word - 1) & !(word - 1)
}

/// A contiguous, page-aligned memory region with a bump allocator and a
/// single checkpoint boundary.
pub struct Arena {
    name: &'static str,
    mapping: MmapMut,
    reserved: usize,
    committed: usize,
    free: usize,
    checkpoint: usize,
}

impl Arena {
    /// Reserve a fresh arena of at least `reserved` bytes (rounded up to
    /// the host page size) and commit `initial_committed` bytes of it.
    pub fn new(name: &'static str, reserved: usize, initial_committed: usize) -> Result<Self> {
        let reserved = align_to_page(reserved.max(initial_committed));
        let mapping = MmapMut::map_anon(reserved).map_err(|_| GcError::HeapExhausted {
            arena: name,
            requested: reserved,
            reserved,
        })?;

        let mut arena = Arena {
            name,
            mapping,
            reserved,
            committed: 0,
            free: 0,
            checkpoint: 0,
        };
        arena.commit(initial_committed)?;
        Ok(arena)
    }

    /// Base address of the arena's backing storage.
    #[inline]
    pub fn base(&self) -> Address {
        Address::from_usize(self.mapping.as_ptr() as usize)
    }

    /// Ensure the committed prefix is at least `n` bytes, page-aligned.
    /// `n` must not exceed `reserved`.
    pub fn commit(&mut self, n: usize) -> Result<()> {
        let target = align_to_page(n);
        if target <= self.committed {
            return Ok(());
        }
        if target > self.reserved {
            return Err(GcError::HeapExhausted {
                arena: self.name,
                requested: target,
                reserved: self.reserved,
            });
        }
        self.committed = target;
        Ok(())
    }

    /// Bump-allocate `z` bytes, growing the commit in powers of two if
    /// needed. Returns the pre-bump address.
    pub fn alloc(&mut self, z: usize) -> Result<Address> {
        let z = align_to_word(z);
        let new_free = self.free + z;
        if new_free > self.committed {
            let mut grown = self.committed.max(page_size::get());
            while grown < new_free {
                grown *= 2;
            }
            self.commit(grown)?;
        }
        let addr = self.base().offset(self.free);
        self.free = new_free;
        Ok(addr)
    }

    /// Advance the checkpoint to the current bump pointer.
    pub fn checkpoint(&mut self) {
        self.checkpoint = self.free;
    }

    /// Erase all contents and grow the commit to at least `new_committed`
    /// without shrinking it.
    pub fn reset(&mut self, new_committed: usize) -> Result<()> {
        self.free = 0;
        self.checkpoint = 0;
        self.commit(new_committed.max(self.committed))
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    #[inline]
    pub fn committed(&self) -> usize {
        self.committed
    }

    #[inline]
    pub fn allocated(&self) -> usize {
        self.free
    }

    #[inline]
    pub fn before_checkpoint(&self) -> usize {
        self.checkpoint
    }

    #[inline]
    pub fn after_checkpoint(&self) -> usize {
        self.free - self.checkpoint
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.reserved - self.free
    }

    /// Whether `p` falls within the allocated (not merely reserved) range
    /// of this arena.
    pub fn contains(&self, p: Address) -> bool {
        let base = self.base().as_usize();
        let p = p.as_usize();
        p >= base && p < base + self.free
    }

    /// Byte offset of `p` within this arena. Caller must ensure
    /// `self.contains(p)`.
    pub fn location_of(&self, p: Address) -> usize {
        p.distance_from(self.base())
    }

    /// Whether `p` lies before this arena's checkpoint (nursery-G₁ /
    /// tenured-G₁ membership test).
    pub fn before_checkpoint_contains(&self, p: Address) -> bool {
        self.contains(p) && self.location_of(p) < self.checkpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_bumps_free_by_aligned_size() {
        let mut arena = Arena::new("test", 4096, 4096).unwrap();
        let before = arena.allocated();
        arena.alloc(10).unwrap();
        assert_eq!(arena.allocated(), before + align_to_word(10));
    }

    #[test]
    fn commit_grows_on_demand() {
        let mut arena = Arena::new("test", 1 << 20, page_size::get()).unwrap();
        let committed_before = arena.committed();
        arena.alloc(committed_before + 1).unwrap();
        assert!(arena.committed() > committed_before);
    }

    #[test]
    fn checkpoint_splits_g0_g1() {
        let mut arena = Arena::new("test", 4096, 4096).unwrap();
        arena.alloc(16).unwrap();
        arena.checkpoint();
        assert_eq!(arena.before_checkpoint(), arena.allocated());
        assert_eq!(arena.after_checkpoint(), 0);
        arena.alloc(16).unwrap();
        assert_eq!(arena.after_checkpoint(), align_to_word(16));
    }

    #[test]
    fn reset_clears_free_and_checkpoint() {
        let mut arena = Arena::new("test", 4096, 4096).unwrap();
        arena.alloc(16).unwrap();
        arena.checkpoint();
        arena.reset(4096).unwrap();
        assert_eq!(arena.allocated(), 0);
        assert_eq!(arena.before_checkpoint(), 0);
    }

    #[test]
    fn alloc_exceeding_reserve_is_heap_exhausted() {
        let mut arena = Arena::new("test", 4096, 4096).unwrap();
        let err = arena.alloc(1 << 20).unwrap_err();
        assert!(matches!(err, GcError::HeapExhausted { .. }));
    }

    #[test]
    fn checkpoint_idempotent_without_allocation() {
        let mut arena = Arena::new("test", 4096, 4096).unwrap();
        arena.alloc(16).unwrap();
        arena.checkpoint();
        let cp = arena.before_checkpoint();
        arena.checkpoint();
        assert_eq!(arena.before_checkpoint(), cp);
    }
}

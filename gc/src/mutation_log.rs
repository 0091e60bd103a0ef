//! Mutation Log Module - Write Barrier And Cross-Generation Record
//!
//! A [`MutationLog`] is the append-only record the write barrier produces
//! and the fixpoint loop in `collector::execute` consumes. Classification
//! is kept as a pure function, [`classify_write`], independent of any
//! particular log or collector instance, so the write-barrier decision
//! table is unit-testable on its own.

use crate::address::Address;

/// Where a write's right-hand side currently resides, as seen by the
/// write barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhsLocation {
    Tenured,
    Nursery,
    /// Not a collector-managed address at all (a null slot, or a value
    /// outside any arena).
    External,
}

/// Where the object performing the write currently resides, as seen by
/// the write barrier, consulted only when the right-hand side is in the
/// nursery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLocation {
    NurseryG1,
    NurseryG0,
    Tenured,
    External,
}

/// The write barrier's decision for one `assign_member` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierAction {
    NoLog,
    /// `parent` is nursery-G₁, `rhs` is nursery: a pointer that will
    /// still be live after the next checkpoint advances.
    LogCrossCheckpoint,
    /// `parent` is tenured, `rhs` is nursery: the cross-generational
    /// pointer case that must survive until the next full collection.
    LogCrossGeneration,
}

/// Classify a write. The store itself is always unconditional; this only
/// decides whether to append to the log.
pub fn classify_write(rhs: RhsLocation, parent: ParentLocation) -> BarrierAction {
    match rhs {
        RhsLocation::Tenured | RhsLocation::External => BarrierAction::NoLog,
        RhsLocation::Nursery => match parent {
            ParentLocation::NurseryG1 => BarrierAction::LogCrossCheckpoint,
            ParentLocation::NurseryG0 => BarrierAction::NoLog,
            ParentLocation::Tenured => BarrierAction::LogCrossGeneration,
            ParentLocation::External => BarrierAction::NoLog,
        },
    }
}

/// One `(parent, lhs)` record. The child at any later point is obtained
/// by reading `*lhs` off the (possibly forwarded) `parent`; the log
/// itself never stores the child's address directly.
#[derive(Debug, Clone, Copy)]
pub struct MutationLogEntry {
    pub parent: Address,
    pub lhs: Address,
}

/// An append-only sequence of mutation-log entries. The collector holds
/// one per space role (from/to) plus a third, unrolled-role-free
/// "deferred" log used only during collection.
#[derive(Default)]
pub struct MutationLog {
    entries: Vec<MutationLogEntry>,
}

impl MutationLog {
    pub fn new() -> Self {
        MutationLog {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, parent: Address, lhs: Address) {
        self.entries.push(MutationLogEntry { parent, lhs });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every entry, leaving the log empty.
    pub fn take(&mut self) -> Vec<MutationLogEntry> {
        std::mem::take(&mut self.entries)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MutationLogEntry> {
        self.entries.iter()
    }
}

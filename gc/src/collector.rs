//! Collector Module - Space Roles, Roots, Copy Loop, Promotion
//!
//! [`Collector`] owns every arena, log, root, and callback and implements
//! a small state machine: idle / incremental / full, encoded as
//! `in_progress` + `full_move`, plus the `request_gc` / `disable_gc` /
//! `enable_gc` bracketing that lets a host batch requests while a
//! collection is already running or temporarily suppressed.

use crate::address::Address;
use crate::arena::Arena;
use crate::callback::{CallbackId, CallbackSet, CopyEvent};
use crate::config::GcConfig;
use crate::error::{GcError, Result};
use crate::logging::{log_event, GcEvent};
use crate::mutation_log::{classify_write, BarrierAction, MutationLog, MutationLogEntry, ParentLocation, RhsLocation};
use crate::object::{Header, Relocator};
use crate::roots::RootSet;
use crate::stats::{GcCycleStats, GcStatistics};
use std::cell::Cell;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The two generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Generation {
    Nursery,
    Tenured,
}

/// Which pre-cycle partition an object being relocated came from. Used
/// only to bucket per-cycle statistics; the destination it implies is
/// exactly the promotion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Tenured,
    NurseryG1,
    NurseryG0,
}

fn reserve_size_for(initial_committed: usize) -> usize {
    (initial_committed.max(1) * 64).max(4 * 1024 * 1024)
}

/// Both nursery arenas plus their paired mutation logs — one log per
/// role, swapped in lockstep with the spaces via the shared `to` index
/// below.
struct NurseryState {
    arenas: [Arena; 2],
    logs: [MutationLog; 2],
    to: usize,
}

impl NurseryState {
    fn new(initial_committed: usize) -> Result<Self> {
        let reserved = reserve_size_for(initial_committed);
        Ok(NurseryState {
            arenas: [
                Arena::new("nursery-a", reserved, initial_committed)?,
                Arena::new("nursery-b", reserved, 0)?,
            ],
            logs: [MutationLog::new(), MutationLog::new()],
            to: 0,
        })
    }

    fn to(&self) -> &Arena {
        &self.arenas[self.to]
    }
    fn to_mut(&mut self) -> &mut Arena {
        &mut self.arenas[self.to]
    }
    fn from(&self) -> &Arena {
        &self.arenas[1 - self.to]
    }
    fn from_mut(&mut self) -> &mut Arena {
        &mut self.arenas[1 - self.to]
    }
    fn to_log_mut(&mut self) -> &mut MutationLog {
        &mut self.logs[self.to]
    }
    fn from_log_mut(&mut self) -> &mut MutationLog {
        &mut self.logs[1 - self.to]
    }
    fn swap(&mut self) {
        self.to = 1 - self.to;
    }
}

/// Both tenured arenas. Tenured only swaps on a full collection; on an
/// incremental cycle it is a pure promotion target and nothing here
/// moves; a full cycle clears tenured from-space and swaps tenured
/// roles.
struct TenuredState {
    arenas: [Arena; 2],
    to: usize,
}

impl TenuredState {
    fn new(initial_committed: usize) -> Result<Self> {
        let reserved = reserve_size_for(initial_committed);
        Ok(TenuredState {
            arenas: [
                Arena::new("tenured-a", reserved, initial_committed)?,
                Arena::new("tenured-b", reserved, 0)?,
            ],
            to: 0,
        })
    }

    fn to(&self) -> &Arena {
        &self.arenas[self.to]
    }
    fn to_mut(&mut self) -> &mut Arena {
        &mut self.arenas[self.to]
    }
    fn from(&self) -> &Arena {
        &self.arenas[1 - self.to]
    }
    fn from_mut(&mut self) -> &mut Arena {
        &mut self.arenas[1 - self.to]
    }
    fn swap(&mut self) {
        self.to = 1 - self.to;
    }
}

/// The collector core. One instance owns a complete generational heap;
/// there is no global mutable state, so every allocation, write, and
/// query names a `Collector` explicitly.
pub struct Collector {
    config: GcConfig,
    nursery: NurseryState,
    tenured: TenuredState,
    roots: RootSet,
    callbacks: CallbackSet,
    stats: GcStatistics,
    deferred_log: MutationLog,

    in_progress: bool,
    full_move: bool,
    disable_depth: u32,
    incr_pending: bool,
    full_pending: bool,
    poisoned: bool,

    // Cycle-scoped accumulators, reset at the start of each `execute`.
    cycle_survive_g0_z: usize,
    cycle_promote_from_g1_z: usize,
    cycle_promote_from_tenured_z: usize,
}

impl Collector {
    /// Construct a collector. Rejects an invalid configuration (e.g. an
    /// `incr_gc_threshold` larger than `initial_nursery_z`) instead of
    /// silently normalizing it.
    pub fn new(config: GcConfig) -> Result<Self> {
        config.validate()?;
        let nursery = NurseryState::new(config.initial_nursery_z)?;
        let tenured = TenuredState::new(config.initial_tenured_z)?;
        let stats = GcStatistics::new(config.stats_history_z);
        Ok(Collector {
            config,
            nursery,
            tenured,
            roots: RootSet::new(),
            callbacks: CallbackSet::new(),
            stats,
            deferred_log: MutationLog::new(),
            in_progress: false,
            full_move: false,
            disable_depth: 0,
            incr_pending: false,
            full_pending: false,
            poisoned: false,
            cycle_survive_g0_z: 0,
            cycle_promote_from_g1_z: 0,
            cycle_promote_from_tenured_z: 0,
        })
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    pub fn statistics(&self) -> &GcStatistics {
        &self.stats
    }

    // ---------------------------------------------------------------
    // Allocation
    // ---------------------------------------------------------------

    /// Allocate `bytes` of raw nursery to-space. The caller (a
    /// `GcObject` constructor) writes its own header and fields into the
    /// returned address; the collector never writes object state itself.
    /// Checks the G₀ threshold afterward and may run a collection
    /// synchronously.
    pub fn alloc(&mut self, bytes: usize) -> Result<Address> {
        let addr = self.alloc_raw(bytes)?;
        self.maybe_trigger_incremental()?;
        Ok(addr)
    }

    fn alloc_raw(&mut self, bytes: usize) -> Result<Address> {
        if self.poisoned {
            return Err(GcError::Poisoned);
        }
        match self.nursery.to_mut().alloc(bytes) {
            Ok(addr) => Ok(addr),
            Err(err) => {
                self.poisoned = true;
                if self.config.debug_flag {
                    if let GcError::HeapExhausted {
                        arena,
                        requested,
                        reserved,
                    } = &err
                    {
                        log_event(&GcEvent::HeapExhausted {
                            arena,
                            requested: *requested,
                            reserved: *reserved,
                        });
                    }
                }
                Err(err)
            }
        }
    }

    fn maybe_trigger_incremental(&mut self) -> Result<()> {
        if self.nursery.to().after_checkpoint() >= self.config.incr_gc_threshold {
            self.request_gc(Generation::Nursery)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Write barrier
    // ---------------------------------------------------------------

    /// Store `rhs` into `slot` (owned by `parent`) and, unless the
    /// collector is mid-cycle or incremental GC is disabled, classify
    /// the write for the mutation log.
    pub fn assign_member(&mut self, parent: Address, slot: &Cell<Address>, rhs: Address) {
        let lhs = Address::from_usize(slot as *const Cell<Address> as usize);
        slot.set(rhs);

        if self.in_progress || !self.config.allow_incremental_gc {
            self.stats.record_mutation(false, false, false);
            return;
        }

        let rhs_loc = self.rhs_location(rhs);
        let parent_loc = self.parent_location(parent);
        match classify_write(rhs_loc, parent_loc) {
            BarrierAction::NoLog => self.stats.record_mutation(false, false, false),
            BarrierAction::LogCrossCheckpoint => {
                self.nursery.to_log_mut().push(parent, lhs);
                self.stats.record_mutation(true, false, true);
            }
            BarrierAction::LogCrossGeneration => {
                self.nursery.to_log_mut().push(parent, lhs);
                self.stats.record_mutation(true, true, false);
            }
        }
    }

    fn rhs_location(&self, rhs: Address) -> RhsLocation {
        if rhs.is_null() {
            RhsLocation::External
        } else if self.tenured.to().contains(rhs) {
            RhsLocation::Tenured
        } else if self.nursery.to().contains(rhs) {
            RhsLocation::Nursery
        } else {
            RhsLocation::External
        }
    }

    fn parent_location(&self, parent: Address) -> ParentLocation {
        if self.tenured.to().contains(parent) {
            ParentLocation::Tenured
        } else if self.nursery.to().before_checkpoint_contains(parent) {
            ParentLocation::NurseryG1
        } else if self.nursery.to().contains(parent) {
            ParentLocation::NurseryG0
        } else {
            ParentLocation::External
        }
    }

    // ---------------------------------------------------------------
    // Roots
    // ---------------------------------------------------------------

    pub fn add_gc_root(&mut self, slot: &Cell<Address>) -> Result<()> {
        if self.in_progress {
            return Err(GcError::ReentrantGc);
        }
        self.roots.add(slot as *const Cell<Address>);
        Ok(())
    }

    pub fn remove_gc_root(&mut self, slot: &Cell<Address>) -> Result<()> {
        if self.in_progress {
            return Err(GcError::ReentrantGc);
        }
        self.roots.remove(slot as *const Cell<Address>)
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    // ---------------------------------------------------------------
    // Callbacks
    // ---------------------------------------------------------------

    pub fn add_gc_copy_callback(&mut self, callback: impl FnMut(&CopyEvent) + 'static) -> CallbackId {
        self.callbacks.add(callback)
    }

    pub fn remove_gc_copy_callback(&mut self, id: CallbackId) -> bool {
        self.callbacks.remove(id)
    }

    // ---------------------------------------------------------------
    // GC control
    // ---------------------------------------------------------------

    /// An incremental request is upgraded to full when the tenured
    /// generation has accrued more than its full-GC threshold since the
    /// last full collection, or when incremental GC is disabled.
    fn upgrade(&self, generation: Generation) -> Generation {
        match generation {
            Generation::Tenured => Generation::Tenured,
            Generation::Nursery => {
                if !self.config.allow_incremental_gc
                    || self.tenured.to().after_checkpoint() > self.config.full_gc_threshold
                {
                    Generation::Tenured
                } else {
                    Generation::Nursery
                }
            }
        }
    }

    pub fn request_gc(&mut self, generation: Generation) -> Result<()> {
        if self.poisoned {
            return Err(GcError::Poisoned);
        }
        match self.upgrade(generation) {
            Generation::Nursery => self.incr_pending = true,
            Generation::Tenured => self.full_pending = true,
        }
        if self.disable_depth == 0 {
            self.drain_pending()?;
        }
        Ok(())
    }

    fn drain_pending(&mut self) -> Result<bool> {
        if self.in_progress {
            return Ok(false);
        }
        if self.full_pending {
            self.execute(Generation::Tenured)?;
            Ok(true)
        } else if self.incr_pending {
            self.execute(Generation::Nursery)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn disable_gc(&mut self) {
        self.disable_depth += 1;
    }

    pub fn enable_gc(&mut self) -> Result<()> {
        if self.disable_depth > 0 {
            self.disable_depth -= 1;
        }
        if self.disable_depth == 0 {
            self.drain_pending()?;
        }
        Ok(())
    }

    /// Equivalent to `enable_gc(); disable_gc();`. Returns whether a
    /// pending request actually ran a cycle.
    pub fn enable_gc_once(&mut self) -> Result<bool> {
        let was_disabled = self.disable_depth > 0;
        self.enable_gc()?;
        let ran = was_disabled && self.disable_depth == 0;
        self.disable_gc();
        Ok(ran)
    }

    pub fn is_gc_enabled(&self) -> bool {
        self.disable_depth == 0
    }

    pub fn gc_in_progress(&self) -> bool {
        self.in_progress
    }

    // ---------------------------------------------------------------
    // Cycle outline
    // ---------------------------------------------------------------

    fn execute(&mut self, upto: Generation) -> Result<()> {
        if self.in_progress {
            return Err(GcError::ReentrantGc);
        }
        if self.poisoned {
            return Err(GcError::Poisoned);
        }

        let t0 = Instant::now();
        let seq = self.stats.next_seq();

        // 1. Begin. "Pending" is cleared for the generation(s) this
        // cycle actually collects, not at cycle end (Open Question #1).
        self.incr_pending = false;
        if upto == Generation::Tenured {
            self.full_pending = false;
        }
        let new_alloc = self.nursery.to().after_checkpoint();
        let g1_before = self.nursery.to().before_checkpoint();
        let tenured_before = self.tenured.to().allocated();
        self.in_progress = true;
        self.full_move = upto == Generation::Tenured;
        self.cycle_survive_g0_z = 0;
        self.cycle_promote_from_g1_z = 0;
        self.cycle_promote_from_tenured_z = 0;

        log_event(&GcEvent::CycleStart { seq, upto });

        // 2. Capacity planning.
        let max_promote = self.nursery.to().before_checkpoint();
        let tenured_need = self.tenured.to().allocated() + max_promote + self.config.full_gc_threshold;
        if tenured_need > self.tenured.to().committed() {
            self.tenured.to_mut().commit(tenured_need)?;
        }

        // 3. Swap roles.
        if self.full_move {
            let keep = self.tenured.from().committed();
            self.tenured.from_mut().reset(keep)?;
            self.tenured.swap();
        }
        let nursery_need = self
            .nursery
            .to()
            .allocated()
            .saturating_sub(max_promote)
            + self.config.incr_gc_threshold;
        self.nursery.from_mut().reset(nursery_need)?;
        self.nursery.swap();

        // 4. Evacuate roots.
        self.evacuate_roots();

        // 5. Forward mutation log.
        self.forward_mutation_log();

        // 6. Cleanup.
        let stats = self.cleanup_stats(seq, upto, new_alloc, g1_before, tenured_before, t0.elapsed());
        self.nursery.to_mut().checkpoint();
        self.tenured.to_mut().checkpoint();
        self.stats.record_cycle(stats);
        log_event(&GcEvent::CycleEnd {
            stats: self.stats.latest().expect("just recorded"),
        });

        self.in_progress = false;
        self.full_move = false;
        Ok(())
    }

    fn evacuate_roots(&mut self) {
        let slots: Vec<*const Cell<Address>> = self.roots.iter().copied().collect();
        for slot_ptr in slots {
            let slot = unsafe { &*slot_ptr };
            self.relocate(slot);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn cleanup_stats(
        &self,
        seq: u64,
        upto: Generation,
        new_alloc: usize,
        g1_before: usize,
        tenured_before: usize,
        dt: std::time::Duration,
    ) -> GcCycleStats {
        let survive_z = self.cycle_survive_g0_z;
        let promote_z = self.cycle_promote_from_g1_z;
        let persist_z = if self.full_move {
            self.cycle_promote_from_tenured_z
        } else {
            tenured_before
        };
        let effort_z = survive_z + promote_z + self.cycle_promote_from_tenured_z;
        let garbage0_z = new_alloc.saturating_sub(survive_z);
        let garbage1_z = g1_before.saturating_sub(promote_z);
        let garbage_n_z = if self.full_move {
            tenured_before.saturating_sub(persist_z)
        } else {
            0
        };

        let cumulative_effort = self
            .stats
            .latest()
            .map(|c| c.cumulative_effort)
            .unwrap_or(0)
            + effort_z;
        let cumulative_garbage = self
            .stats
            .latest()
            .map(|c| c.cumulative_garbage)
            .unwrap_or(0)
            + garbage0_z
            + garbage1_z
            + garbage_n_z;

        GcCycleStats {
            seq,
            upto,
            new_alloc_z: new_alloc,
            survive_z,
            promote_z,
            persist_z,
            effort_z,
            garbage0_z,
            garbage1_z,
            garbage_n_z,
            dt,
            cumulative_effort,
            cumulative_garbage,
            completed_at: chrono::Utc::now(),
        }
    }

    // ---------------------------------------------------------------
    // relocate
    // ---------------------------------------------------------------

    fn is_already_in_target_to_space(&self, addr: Address) -> bool {
        self.tenured.to().contains(addr) || self.nursery.to().contains(addr)
    }

    unsafe fn header_ref(&self, addr: Address) -> &Header {
        &*(addr.as_usize() as *const Header)
    }

    fn origin_of(&self, addr: Address) -> Origin {
        if self.tenured.from().contains(addr) {
            Origin::Tenured
        } else if self.nursery.from().before_checkpoint_contains(addr) {
            Origin::NurseryG1
        } else {
            Origin::NurseryG0
        }
    }

    fn generation_of_origin(origin: Origin) -> Generation {
        match origin {
            Origin::Tenured => Generation::Tenured,
            Origin::NurseryG1 | Origin::NurseryG0 => Generation::Nursery,
        }
    }

    // ---------------------------------------------------------------
    // Mutation-log fixpoint forwarding
    // ---------------------------------------------------------------

    fn was_tenured_before_cycle(&self, addr: Address) -> bool {
        if self.full_move {
            self.tenured.from().contains(addr)
        } else {
            self.tenured.to().contains(addr)
        }
    }

    fn current_slot_address(&self, entry: &MutationLogEntry) -> Address {
        let header = unsafe { self.header_ref(entry.parent) };
        if header.is_forwarded() {
            let dest_parent = header.destination();
            dest_parent.offset(entry.lhs.distance_from(entry.parent))
        } else {
            entry.lhs
        }
    }

    fn forward_mutation_log(&mut self) {
        let mut from: Vec<MutationLogEntry> = self.nursery.from_log_mut().take();
        self.deferred_log.clear();
        let mut iteration: u32 = 0;

        loop {
            iteration += 1;
            let mut rescued = 0usize;
            let mut to_append: Vec<MutationLogEntry> = Vec::new();
            let mut deferred: Vec<MutationLogEntry> = Vec::new();

            for entry in from.drain(..) {
                let parent_header = unsafe { self.header_ref(entry.parent) };
                let parent_live = if self.full_move {
                    parent_header.is_forwarded()
                } else {
                    self.was_tenured_before_cycle(entry.parent) || parent_header.is_forwarded()
                };

                if !parent_live {
                    deferred.push(entry);
                    continue;
                }

                let slot_addr = self.current_slot_address(&entry);
                let slot = unsafe { &*(slot_addr.as_usize() as *const Cell<Address>) };
                let child_before = slot.get();
                let child_already_forwarded =
                    !child_before.is_null() && unsafe { self.header_ref(child_before).is_forwarded() };
                if !child_before.is_null() && !child_already_forwarded {
                    rescued += 1;
                }

                self.relocate(slot);

                let dest_parent = {
                    let parent_header = unsafe { self.header_ref(entry.parent) };
                    if parent_header.is_forwarded() {
                        parent_header.destination()
                    } else {
                        entry.parent
                    }
                };

                let child_after = slot.get();
                if !child_after.is_null() && self.nursery.to().contains(child_after) {
                    to_append.push(MutationLogEntry {
                        parent: dest_parent,
                        lhs: slot_addr,
                    });
                }
            }

            for entry in to_append {
                self.nursery.to_log_mut().push(entry.parent, entry.lhs);
            }

            if self.config.debug_flag {
                log_event(&GcEvent::MutationLogFixpoint { iteration, rescued });
            }

            if deferred.is_empty() {
                break;
            }
            if rescued == 0 {
                break;
            }
            from = deferred;
        }
    }
}

impl Relocator for Collector {
    /// Reads `o := slot.get()`. If `o` is null or already in the
    /// appropriate to-space, does nothing; otherwise forwards it (or
    /// follows an existing forwarding pointer) per the promotion rule.
    fn relocate(&mut self, slot: &Cell<Address>) {
        let o = slot.get();
        if o.is_null() {
            return;
        }
        if self.is_already_in_target_to_space(o) {
            return;
        }

        let header = unsafe { self.header_ref(o) };
        if header.is_forwarded() {
            slot.set(header.destination());
            return;
        }

        let origin = self.origin_of(o);
        let src_gen = Self::generation_of_origin(origin);
        let promote = matches!(origin, Origin::Tenured | Origin::NurseryG1);
        let vtable = header.vtable();

        let dest = unsafe {
            let dest_arena = if promote {
                self.tenured.to_mut()
            } else {
                self.nursery.to_mut()
            };
            (vtable.shallow_copy)(o, dest_arena)
        };

        let header = unsafe { self.header_ref(o) };
        header.set_forwarded(dest);
        slot.set(dest);

        let size = unsafe { (vtable.forward_children)(dest, self) };

        match origin {
            Origin::NurseryG0 => self.cycle_survive_g0_z += size,
            Origin::NurseryG1 => self.cycle_promote_from_g1_z += size,
            Origin::Tenured => self.cycle_promote_from_tenured_z += size,
        }

        let dest_gen = if promote {
            Generation::Tenured
        } else {
            Generation::Nursery
        };
        self.callbacks.notify(&CopyEvent {
            size,
            src: o,
            dest,
            src_gen,
            dest_gen,
        });
        if self.config.debug_flag {
            log_event(&GcEvent::Promotion { src: o, dest, size });
        }
    }
}

/// Queries.
impl Collector {
    pub fn size(&self) -> usize {
        self.nursery.arenas.iter().map(Arena::reserved).sum::<usize>()
            + self.tenured.arenas.iter().map(Arena::reserved).sum::<usize>()
    }

    pub fn committed(&self) -> usize {
        self.nursery.arenas.iter().map(Arena::committed).sum::<usize>()
            + self.tenured.arenas.iter().map(Arena::committed).sum::<usize>()
    }

    pub fn allocated(&self) -> usize {
        self.nursery.to().allocated() + self.tenured.to().allocated()
    }

    pub fn available(&self) -> usize {
        self.committed() - self.allocated()
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.nursery.arenas.iter().any(|a| a.contains(addr))
            || self.tenured.arenas.iter().any(|a| a.contains(addr))
    }

    pub fn fromspace_contains(&self, addr: Address) -> bool {
        self.nursery.from().contains(addr) || self.tenured.from().contains(addr)
    }

    pub fn tospace_generation_of(&self, addr: Address) -> Option<Generation> {
        if self.nursery.to().contains(addr) {
            Some(Generation::Nursery)
        } else if self.tenured.to().contains(addr) {
            Some(Generation::Tenured)
        } else {
            None
        }
    }

    pub fn fromspace_generation_of(&self, addr: Address) -> Option<Generation> {
        if self.nursery.from().contains(addr) {
            Some(Generation::Nursery)
        } else if self.tenured.from().contains(addr) {
            Some(Generation::Tenured)
        } else {
            None
        }
    }

    pub fn location_of(&self, addr: Address) -> Option<usize> {
        for arena in self.nursery.arenas.iter().chain(self.tenured.arenas.iter()) {
            if arena.contains(addr) {
                return Some(arena.location_of(addr));
            }
        }
        None
    }

    pub fn nursery_to_reserved(&self) -> usize {
        self.nursery.to().reserved()
    }
    pub fn nursery_to_committed(&self) -> usize {
        self.nursery.to().committed()
    }
    pub fn nursery_to_allocated(&self) -> usize {
        self.nursery.to().allocated()
    }
    pub fn nursery_from_reserved(&self) -> usize {
        self.nursery.from().reserved()
    }
    pub fn nursery_from_committed(&self) -> usize {
        self.nursery.from().committed()
    }
    pub fn nursery_from_allocated(&self) -> usize {
        self.nursery.from().allocated()
    }

    pub fn tenured_to_reserved(&self) -> usize {
        self.tenured.to().reserved()
    }
    pub fn tenured_to_committed(&self) -> usize {
        self.tenured.to().committed()
    }
    pub fn tenured_to_allocated(&self) -> usize {
        self.tenured.to().allocated()
    }
    pub fn tenured_from_reserved(&self) -> usize {
        self.tenured.from().reserved()
    }
    pub fn tenured_from_committed(&self) -> usize {
        self.tenured.from().committed()
    }
    pub fn tenured_from_allocated(&self) -> usize {
        self.tenured.from().allocated()
    }

    pub fn nursery_before_checkpoint(&self) -> usize {
        self.nursery.to().before_checkpoint()
    }
    pub fn nursery_after_checkpoint(&self) -> usize {
        self.nursery.to().after_checkpoint()
    }
    pub fn tenured_before_checkpoint(&self) -> usize {
        self.tenured.to().before_checkpoint()
    }
    pub fn tenured_after_checkpoint(&self) -> usize {
        self.tenured.to().after_checkpoint()
    }

    pub fn mlog_size(&self) -> usize {
        self.nursery.logs[0].len() + self.nursery.logs[1].len() + self.deferred_log.len()
    }

    pub fn n_gc(&self, generation: Generation) -> u64 {
        self.stats.n_gc(generation)
    }
}

//! Statistics Module - Per-Cycle History And Derived Metrics
//!
//! A fixed-capacity ring of per-cycle records, plus the cumulative
//! write-barrier and promotion counters the collector is expected to
//! keep monotonic and mutually consistent. Derived quantities
//! (`efficiency`, `collection_rate`) are computed on read, never cached.

use crate::collector::Generation;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One collection cycle's record.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GcCycleStats {
    pub seq: u64,
    pub upto: Generation,
    pub new_alloc_z: usize,
    pub survive_z: usize,
    pub promote_z: usize,
    pub persist_z: usize,
    pub effort_z: usize,
    pub garbage0_z: usize,
    pub garbage1_z: usize,
    pub garbage_n_z: usize,
    #[cfg_attr(feature = "serde", serde(with = "duration_secs"))]
    pub dt: Duration,
    pub cumulative_effort: usize,
    pub cumulative_garbage: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl GcCycleStats {
    /// Total bytes identified as garbage this cycle, across both
    /// checkpoint partitions and the tenured generation.
    pub fn garbage_z(&self) -> usize {
        self.garbage0_z + self.garbage1_z + self.garbage_n_z
    }

    /// `garbage / (garbage + effort)`; `0.0` when both are zero so a
    /// no-op cycle reports no efficiency rather than `NaN`.
    pub fn efficiency(&self) -> f64 {
        let garbage = self.garbage_z() as f64;
        let denom = garbage + self.effort_z as f64;
        if denom == 0.0 {
            0.0
        } else {
            garbage / denom
        }
    }

    /// `garbage / dt`, in bytes per second; `0.0` for an effectively
    /// instantaneous cycle.
    pub fn collection_rate(&self) -> f64 {
        let secs = self.dt.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.garbage_z() as f64 / secs
        }
    }
}

#[cfg(feature = "serde")]
mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}

/// Cumulative counters and the bounded cycle history.
///
/// The ring capacity is [`crate::config::GcConfig::stats_history_z`];
/// once full, the oldest record is dropped to make room for the newest
/// (`VecDeque`'s natural push-front-pop-back shape, grounded in the same
/// fixed-capacity-history idea as the collector this crate is grown
/// from).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GcStatistics {
    capacity: usize,
    history: std::collections::VecDeque<GcCycleStats>,
    next_seq: u64,

    pub n_gc_nursery: u64,
    pub n_gc_tenured: u64,

    pub n_mutation: u64,
    pub n_logged_mutation: u64,
    pub n_xgen_mutation: u64,
    pub n_xckp_mutation: u64,

    pub total_promoted: u64,
}

impl GcStatistics {
    pub fn new(capacity: usize) -> Self {
        GcStatistics {
            capacity: capacity.max(1),
            history: std::collections::VecDeque::with_capacity(capacity.max(1)),
            next_seq: 0,
            n_gc_nursery: 0,
            n_gc_tenured: 0,
            n_mutation: 0,
            n_logged_mutation: 0,
            n_xgen_mutation: 0,
            n_xckp_mutation: 0,
            total_promoted: 0,
        }
    }

    /// Allocate the next cycle sequence number, without recording a
    /// cycle yet. Used by the collector so a record can carry its own
    /// `seq` before all of its fields are known.
    pub fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Record a completed cycle, evicting the oldest entry if the ring
    /// is full.
    pub fn record_cycle(&mut self, stats: GcCycleStats) {
        match stats.upto {
            Generation::Nursery => self.n_gc_nursery += 1,
            Generation::Tenured => self.n_gc_tenured += 1,
        }
        self.total_promoted = self.total_promoted.saturating_add(stats.promote_z as u64);
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(stats);
    }

    pub fn record_mutation(
        &mut self,
        logged: bool,
        cross_generation: bool,
        cross_checkpoint: bool,
    ) {
        self.n_mutation += 1;
        if logged {
            self.n_logged_mutation += 1;
        }
        if cross_generation {
            self.n_xgen_mutation += 1;
        }
        if cross_checkpoint {
            self.n_xckp_mutation += 1;
        }
    }

    pub fn latest(&self) -> Option<&GcCycleStats> {
        self.history.back()
    }

    pub fn history(&self) -> impl Iterator<Item = &GcCycleStats> {
        self.history.iter()
    }

    pub fn n_gc(&self, generation: Generation) -> u64 {
        match generation {
            Generation::Nursery => self.n_gc_nursery,
            Generation::Tenured => self.n_gc_tenured,
        }
    }
}

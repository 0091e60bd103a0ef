//! Logging Module - Structured Collector Events
//!
//! embergc never initializes a global logger; it only emits through the
//! `log` crate's macros, letting the host choose a backend (`env_logger`
//! in this crate's own tests and benches). `config.debug_flag` gates the
//! `trace!`-level per-relocation line; cycle boundaries are always logged
//! at `info`.

use crate::address::Address;
use crate::collector::Generation;
use crate::stats::GcCycleStats;

/// A structured event a `Collector` may emit during its lifetime.
pub enum GcEvent<'a> {
    CycleStart { seq: u64, upto: Generation },
    CycleEnd { stats: &'a GcCycleStats },
    Promotion { src: Address, dest: Address, size: usize },
    MutationLogFixpoint { iteration: u32, rescued: usize },
    HeapExhausted { arena: &'static str, requested: usize, reserved: usize },
}

/// Dispatch `event` to the appropriate `log` macro.
pub fn log_event(event: &GcEvent<'_>) {
    match event {
        GcEvent::CycleStart { seq, upto } => {
            log::info!("gc cycle {seq} start, upto={upto:?}");
        }
        GcEvent::CycleEnd { stats } => {
            log::info!(
                "gc cycle {} end, upto={:?}, garbage={}b, effort={}b, efficiency={:.3}, dt={:.6}s",
                stats.seq,
                stats.upto,
                stats.garbage_z(),
                stats.effort_z,
                stats.efficiency(),
                stats.dt.as_secs_f64()
            );
        }
        GcEvent::Promotion { src, dest, size } => {
            log::trace!("promote {size}b: {src} -> {dest}");
        }
        GcEvent::MutationLogFixpoint { iteration, rescued } => {
            log::trace!("mutation log fixpoint iteration {iteration}: {rescued} rescued");
        }
        GcEvent::HeapExhausted {
            arena,
            requested,
            reserved,
        } => {
            log::warn!("heap exhausted: {arena} needs {requested}b, reserve is {reserved}b");
        }
    }
}

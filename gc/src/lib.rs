//! embergc - A Generational, Semi-Space Copying Garbage Collector
//!
//! embergc manages a dynamically-typed object graph across two
//! generations, nursery and tenured, each represented as a pair of
//! semi-space [`arena::Arena`]s. Collection is stop-the-world from the
//! mutator's perspective (no concurrent mutation during a cycle) but the
//! *decision* of when to collect is incremental: most cycles only copy
//! the nursery, and a write barrier keeps the cross-generational
//! invariant cheap to maintain between cycles.
//!
//! # Layout
//!
//! - [`address`] - the opaque `Address` newtype used everywhere instead
//!   of raw pointers.
//! - [`arena`] - the bump-pointer, reserve/commit/checkpoint region that
//!   backs one space.
//! - [`object`] - the per-type vtable interface (`GcObject`, `VTable`,
//!   `Header`) and the `Gc<T>` handle.
//! - [`mutation_log`] - the write barrier's classification rule and the
//!   log it appends to.
//! - [`roots`] - the registered root slot set.
//! - [`callback`] - the copy-event observer registry.
//! - [`stats`] - per-cycle history and cumulative counters.
//! - [`logging`] - structured event dispatch through the `log` crate.
//! - [`config`] - tunable thresholds and feature flags.
//! - [`error`] - the crate's error types.
//! - [`collector`] - [`collector::Collector`], which owns everything
//!   above and implements the cycle itself.
//!
//! # Example
//!
//! ```rust
//! use embergc::collector::{Collector, Generation};
//! use embergc::config::GcConfig;
//!
//! let mut gc = Collector::new(GcConfig::default()).unwrap();
//! let root = gc.root_count();
//! gc.request_gc(Generation::Nursery).unwrap();
//! assert_eq!(gc.root_count(), root);
//! ```

pub mod address;
pub mod arena;
pub mod callback;
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod mutation_log;
pub mod object;
pub mod roots;
pub mod stats;

pub use address::Address;
pub use collector::{Collector, Generation};
pub use config::GcConfig;
pub use error::{GcError, Result};
pub use object::{Gc, GcObject, Header, Relocator, VTable};

//! Error Module - Collector Error Types
//!
//! Defines the error types surfaced by [`crate::collector::Collector`] and
//! by [`crate::config::GcConfig`] validation.

use thiserror::Error;

/// Errors raised while validating a [`crate::config::GcConfig`].
///
/// These are construction-time errors: a misconfigured collector is
/// rejected before any arena is reserved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "incr_gc_threshold ({incr_gc_threshold}) must not exceed initial_nursery_z ({initial_nursery_z})"
    )]
    IncrementalThresholdTooLarge {
        incr_gc_threshold: usize,
        initial_nursery_z: usize,
    },

    #[error(
        "initial_nursery_z + full_gc_threshold ({sum}) must not exceed initial_tenured_z ({initial_tenured_z})"
    )]
    FullThresholdTooLarge { sum: usize, initial_tenured_z: usize },

    #[error("stats_history_z must be at least 1")]
    EmptyStatsHistory,
}

/// Main error type for all collector operations.
#[derive(Debug, Error)]
pub enum GcError {
    /// A generation's to-space could not grow its commit past its reserve
    /// during evacuation. Fatal: the cycle is abandoned and the collector
    /// is poisoned.
    #[error("heap exhausted: {arena} needs {requested} bytes but reserve is {reserved}")]
    HeapExhausted {
        arena: &'static str,
        requested: usize,
        reserved: usize,
    },

    /// An attempt was made to begin a collection cycle while one is
    /// already `in_progress`. Internal-only in a correctly bracketed
    /// mutator, but returned rather than panicking so misuse is
    /// observable.
    #[error("collection already in progress")]
    ReentrantGc,

    /// `remove_gc_root` was called with a slot address that was never
    /// registered. Reported but not fatal.
    #[error("attempt to remove an unregistered root")]
    InvalidRoot,

    /// Construction-time configuration error.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(#[from] ConfigError),

    /// The collector suffered a `HeapExhausted` failure in a previous
    /// cycle and is no longer safe to use.
    #[error("collector is poisoned by a previous heap-exhausted failure")]
    Poisoned,
}

impl GcError {
    /// True for errors that leave the collector usable afterwards.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GcError::InvalidRoot | GcError::ReentrantGc)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GcError>;

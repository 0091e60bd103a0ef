//! Configuration Module - Collector Tuning Parameters
//!
//! All sizes are in bytes.

use crate::error::ConfigError;

const KB: usize = 1024;
const MB: usize = 1024 * KB;

/// Configuration for [`crate::collector::Collector::new`].
///
/// # Examples
///
/// ```rust
/// use embergc::config::GcConfig;
///
/// let config = GcConfig::default();
/// assert!(config.validate().is_ok());
///
/// let config = GcConfig {
///     initial_nursery_z: 4 * 1024,
///     incr_gc_threshold: 1024,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcConfig {
    /// Initial commit for each of the two nursery arenas.
    pub initial_nursery_z: usize,

    /// Initial commit for each of the two tenured arenas.
    pub initial_tenured_z: usize,

    /// Nursery-G₀ bytes (allocated since the last nursery checkpoint)
    /// that trigger an incremental collection.
    pub incr_gc_threshold: usize,

    /// Tenured-G₀ bytes that trigger a full collection.
    pub full_gc_threshold: usize,

    /// When `false`, every collection request (even `request_gc(nursery)`)
    /// is upgraded to a full collection, and the write barrier never
    /// appends to the mutation log (no cross-generational pointers can
    /// arise without an intervening incremental collection).
    pub allow_incremental_gc: bool,

    /// Ring capacity for per-cycle statistics history.
    pub stats_history_z: usize,

    /// Enable per-type pre/post scans for object-level statistics.
    pub object_stats_flag: bool,

    /// Enable verbose (`trace`-level) logging of individual relocations.
    pub debug_flag: bool,
}

impl Default for GcConfig {
    /// Balanced defaults for embedding in an interpreter with a modest
    /// live set. Applications with larger heaps should size
    /// `initial_tenured_z` accordingly.
    fn default() -> Self {
        GcConfig {
            initial_nursery_z: MB,
            initial_tenured_z: 4 * MB,
            incr_gc_threshold: 256 * KB,
            full_gc_threshold: MB,
            allow_incremental_gc: true,
            stats_history_z: 64,
            object_stats_flag: false,
            debug_flag: false,
        }
    }
}

impl GcConfig {
    /// Validate configuration, rejecting combinations that would make the
    /// collector unable to ever satisfy an allocation. Does not mutate
    /// the configuration; an oversized threshold is a construction error,
    /// not something to silently normalize.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.incr_gc_threshold > self.initial_nursery_z {
            return Err(ConfigError::IncrementalThresholdTooLarge {
                incr_gc_threshold: self.incr_gc_threshold,
                initial_nursery_z: self.initial_nursery_z,
            });
        }

        let sum = self.initial_nursery_z + self.full_gc_threshold;
        if sum > self.initial_tenured_z {
            return Err(ConfigError::FullThresholdTooLarge {
                sum,
                initial_tenured_z: self.initial_tenured_z,
            });
        }

        if self.stats_history_z == 0 {
            return Err(ConfigError::EmptyStatsHistory);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GcConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_incr_threshold_above_nursery() {
        let config = GcConfig {
            initial_nursery_z: 1024,
            incr_gc_threshold: 2048,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::IncrementalThresholdTooLarge {
                incr_gc_threshold: 2048,
                initial_nursery_z: 1024,
            })
        );
    }

    #[test]
    fn rejects_full_threshold_vs_tenured_sum() {
        let config = GcConfig {
            initial_nursery_z: 2048,
            initial_tenured_z: 2048,
            full_gc_threshold: 1024,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

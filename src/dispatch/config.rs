//! Dispatch configuration.
//!
//! This module contains the [`DispatchConfig`] struct used to construct a
//! [`Dispatcher`](super::Dispatcher): the region table (name and admission
//! ceiling per region), the driver pool capacity, and whether lifecycle
//! events are logged.

// =============================================================================
// Configuration Constants
// =============================================================================

/// Default maximum number of idle drivers the pool will hold.
///
/// `add_driver` fails (without blocking) once the pool holds this many.
pub const DEFAULT_POOL_CAPACITY: usize = 999;

// =============================================================================
// Dispatch Configuration
// =============================================================================

/// Configuration for the dispatcher.
#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// Regions to create at construction: `(name, admission ceiling)`.
    ///
    /// Duplicate names are ignored beyond the first occurrence (first
    /// registration wins, matching `Dispatcher::register_region`).
    pub regions: Vec<(String, usize)>,

    /// Idle driver pool capacity.
    pub pool_capacity: usize,

    /// Whether booking lifecycle events are emitted.
    ///
    /// When false the dispatcher uses a no-op sink and event logging has
    /// zero cost beyond a virtual call.
    pub log_events: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            log_events: false,
        }
    }
}

impl DispatchConfig {
    /// Creates an empty configuration with default pool capacity and
    /// logging disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region with the given admission ceiling.
    pub fn with_region(mut self, name: impl Into<String>, max_simultaneous_jobs: usize) -> Self {
        self.regions.push((name.into(), max_simultaneous_jobs));
        self
    }

    /// Sets the idle driver pool capacity.
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Enables or disables lifecycle event logging.
    pub fn with_logging(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = DispatchConfig::default();
        assert!(config.regions.is_empty());
        assert_eq!(config.pool_capacity, DEFAULT_POOL_CAPACITY);
        assert!(!config.log_events);
    }

    #[test]
    fn test_config_builder() {
        let config = DispatchConfig::new()
            .with_region("north", 4)
            .with_region("south", 2)
            .with_pool_capacity(10)
            .with_logging(true);

        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[0], ("north".to_string(), 4));
        assert_eq!(config.pool_capacity, 10);
        assert!(config.log_events);
    }

    #[test]
    fn test_config_clone() {
        let config = DispatchConfig::new().with_region("north", 4);
        let cloned = config.clone();
        assert_eq!(cloned.regions, config.regions);
    }
}

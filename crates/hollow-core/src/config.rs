//! Store configuration parameters.

use crate::error::ConfigError;

/// Configuration applied to every type arena of a store.
///
/// Validated when a store is built with `with_config`; all values are
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of usable slots each arena reserves up front.
    ///
    /// Default: 0. This is a capacity hint for the backing vectors only;
    /// it does not change what `capacity()` reports.
    pub initial_slots: u32,

    /// Maximum number of usable slots per arena.
    ///
    /// Default: `u32::MAX`, the size of the index space. Once an arena
    /// holds this many slots, creation only succeeds by reusing a hole.
    pub max_slots: u32,
}

impl StoreConfig {
    /// Default up-front reservation.
    pub const DEFAULT_INITIAL_SLOTS: u32 = 0;

    /// Default per-arena slot limit.
    pub const DEFAULT_MAX_SLOTS: u32 = u32::MAX;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            initial_slots: Self::DEFAULT_INITIAL_SLOTS,
            max_slots: Self::DEFAULT_MAX_SLOTS,
        }
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `max_slots` is zero or `initial_slots` is larger
    /// than `max_slots`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_slots == 0 {
            return Err(ConfigError::ZeroMaxSlots);
        }
        if self.initial_slots > self.max_slots {
            return Err(ConfigError::InitialExceedsMax {
                initial: self.initial_slots,
                max: self.max_slots,
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StoreConfig::default();
        assert_eq!(config.max_slots, u32::MAX);
        assert_eq!(config.initial_slots, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_max_slots_rejected() {
        let config = StoreConfig {
            max_slots: 0,
            ..StoreConfig::new()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxSlots));
    }

    #[test]
    fn reservation_above_limit_rejected() {
        let config = StoreConfig {
            initial_slots: 64,
            max_slots: 16,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialExceedsMax {
                initial: 64,
                max: 16
            })
        );
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn valid_iff_nonzero_and_ordered(initial in 0u32..1000, max in 0u32..1000) {
                let config = StoreConfig { initial_slots: initial, max_slots: max };
                prop_assert_eq!(config.validate().is_ok(), max > 0 && initial <= max);
            }
        }
    }
}

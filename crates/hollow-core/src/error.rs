//! Error types for the Hollow object arena.
//!
//! Invalid dereferences have a lenient path (accessors returning `Option`)
//! and a strict path returning [`StoreError`]. Configuration problems are
//! reported as [`ConfigError`] before a store is built.

use std::error::Error;
use std::fmt;

use crate::id::SlotIndex;

/// Errors from object store and type arena operations.
///
/// `kind` is the name of the object type the failing arena stores, as
/// reported by [`std::any::type_name`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The operation needs a live target but was given the empty handle.
    EmptyHandle,
    /// The index refers to a hole, or lies past the end of the arena.
    VacantSlot {
        /// Object kind of the arena.
        kind: &'static str,
        /// The index that did not hold an object.
        index: SlotIndex,
    },
    /// The handle was issued by a different store instance.
    ForeignHandle {
        /// Object kind of the arena.
        kind: &'static str,
        /// Index carried by the foreign handle.
        index: SlotIndex,
    },
    /// The arena's slot storage is held by an outstanding object guard.
    ArenaBorrowed {
        /// Object kind of the arena.
        kind: &'static str,
    },
    /// No hole is free and the arena already holds `max_slots` slots.
    CapacityExceeded {
        /// Object kind of the arena.
        kind: &'static str,
        /// The configured slot limit.
        max_slots: u32,
    },
    /// Registering one more reference would overflow the slot counter.
    ReferenceOverflow {
        /// Object kind of the arena.
        kind: &'static str,
        /// The saturated slot.
        index: SlotIndex,
    },
    /// Deregistering a reference from a counter that is already zero.
    ReferenceUnderflow {
        /// Object kind of the arena.
        kind: &'static str,
        /// The slot whose counter was zero.
        index: SlotIndex,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "operation on an empty handle"),
            Self::VacantSlot { kind, index } => {
                write!(f, "slot {index} of {kind} does not hold an object")
            }
            Self::ForeignHandle { kind, index } => {
                write!(f, "handle {kind}#{index} belongs to a different store")
            }
            Self::ArenaBorrowed { kind } => {
                write!(f, "arena for {kind} is borrowed by an outstanding guard")
            }
            Self::CapacityExceeded { kind, max_slots } => {
                write!(f, "arena for {kind} is full: {max_slots} slots in use")
            }
            Self::ReferenceOverflow { kind, index } => {
                write!(f, "reference count overflow on {kind}#{index}")
            }
            Self::ReferenceUnderflow { kind, index } => {
                write!(f, "reference count underflow on {kind}#{index}")
            }
        }
    }
}

impl Error for StoreError {}

/// Errors detected by [`StoreConfig::validate()`](crate::StoreConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_slots` is zero, so no object could ever be created.
    ZeroMaxSlots,
    /// `initial_slots` reserves more slots than `max_slots` allows.
    InitialExceedsMax {
        /// The configured reservation.
        initial: u32,
        /// The configured limit.
        max: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxSlots => write!(f, "max_slots must be at least 1"),
            Self::InitialExceedsMax { initial, max } => {
                write!(f, "initial_slots {initial} exceeds max_slots {max}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_kind_and_index() {
        let err = StoreError::VacantSlot {
            kind: "Point",
            index: SlotIndex(4),
        };
        assert_eq!(err.to_string(), "slot 4 of Point does not hold an object");
    }

    #[test]
    fn capacity_message_includes_limit() {
        let err = StoreError::CapacityExceeded {
            kind: "f64",
            max_slots: 8,
        };
        assert!(err.to_string().contains("8 slots"));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InitialExceedsMax { initial: 10, max: 5 };
        assert_eq!(err.to_string(), "initial_slots 10 exceeds max_slots 5");
    }
}

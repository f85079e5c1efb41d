//! Slot storage cells and live-reference counters.
//!
//! A slot is the pair of a [`Slot`] entry (object data or free-list link)
//! and a [`RefCounter`]. The arena stores the two in parallel vectors so
//! counters stay writable while an object guard is held.

use std::cell::Cell;

use hollow_core::{RefCount, SlotIndex};

/// Contents of one arena slot: a free-list link or a stored object.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot<T> {
    /// Free slot, linked into the arena's free list.
    Hole {
        /// Next hole in the free list. The sentinel index terminates the list.
        next_hole: SlotIndex,
    },
    /// Occupied slot. May be live or awaiting reclamation.
    Object(T),
}

impl<T> Slot<T> {
    /// A hole linking to `next_hole`.
    pub fn hole(next_hole: SlotIndex) -> Self {
        Self::Hole { next_hole }
    }

    /// Whether this slot stores an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// The stored object, if any.
    pub fn object(&self) -> Option<&T> {
        match self {
            Self::Object(value) => Some(value),
            Self::Hole { .. } => None,
        }
    }

    /// The stored object, mutably, if any.
    pub fn object_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Object(value) => Some(value),
            Self::Hole { .. } => None,
        }
    }

    /// The free-list link, if this slot is a hole.
    pub fn next_hole(&self) -> Option<SlotIndex> {
        match self {
            Self::Hole { next_hole } => Some(*next_hole),
            Self::Object(_) => None,
        }
    }
}

/// Live-reference counter of one slot, plus whether the slot holds an object.
///
/// Mutated through `&self` so that handles, which only borrow their store,
/// can register and deregister references. Occupancy is mirrored here so
/// that counter updates can refuse holes without touching the entry column.
#[derive(Debug, Default)]
pub struct RefCounter {
    count: Cell<RefCount>,
    occupied: Cell<bool>,
}

impl RefCounter {
    /// A vacant counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of live references.
    pub fn get(&self) -> RefCount {
        self.count.get()
    }

    /// Whether the slot currently stores an object.
    pub fn is_occupied(&self) -> bool {
        self.occupied.get()
    }

    /// Add one reference. Returns the new count, or `None` on overflow
    /// (the counter is left unchanged).
    pub fn increment(&self) -> Option<RefCount> {
        let next = self.count.get().checked_add(1)?;
        self.count.set(next);
        Some(next)
    }

    /// Remove one reference. Returns the new count, or `None` if the
    /// counter was already zero (the counter is left unchanged).
    pub fn decrement(&self) -> Option<RefCount> {
        let next = self.count.get().checked_sub(1)?;
        self.count.set(next);
        Some(next)
    }

    /// Mark the slot occupied with a count of exactly one, for a freshly
    /// allocated object.
    pub fn occupy(&self) {
        self.count.set(1);
        self.occupied.set(true);
    }

    /// Mark the slot as a hole with a count of zero.
    pub fn vacate(&self) {
        self.count.set(0);
        self.occupied.set(false);
    }
}

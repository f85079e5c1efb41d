//! Strongly-typed slot identifiers and the [`RefCount`] type alias.

use std::fmt;

/// Identifies a slot within one type arena.
///
/// Index 0 is reserved: in an arena it is the free-list sentinel, and in a
/// handle it marks the empty handle. Real objects always live at index 1 or
/// above, so "is this handle non-empty" is a single comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub u32);

impl SlotIndex {
    /// The reserved index 0.
    pub const SENTINEL: SlotIndex = SlotIndex(0);

    /// Whether this is the reserved index 0.
    pub fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    /// The raw index value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The index as a `usize`, for addressing slot vectors.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Width of a slot's live-reference counter.
pub type RefCount = u16;

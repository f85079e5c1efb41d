//! Occupancy statistics and sweep reports.
//!
//! [`ArenaStats`] describes one type arena at a point in time,
//! [`StoreStats`] collects them for every registered kind, and
//! [`SweepReport`] records what a single sweep reclaimed.

use indexmap::IndexMap;
use smallvec::SmallVec;

/// Occupancy of one type arena.
///
/// `capacity == free + live + pending` always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Object kind stored by the arena.
    pub kind: &'static str,
    /// Usable slots (the sentinel excluded).
    pub capacity: u32,
    /// Slots on the free list.
    pub free: u32,
    /// Object slots with at least one live reference.
    pub live: u32,
    /// Object slots with no references, awaiting the next sweep.
    pub pending: u32,
    /// Sum of all slot counters.
    pub references: u64,
}

/// Occupancy of every arena in a store, in registration order.
#[derive(Clone, Debug, Default)]
pub struct StoreStats {
    /// Per-kind statistics keyed by kind name.
    pub arenas: IndexMap<&'static str, ArenaStats>,
}

impl StoreStats {
    /// Sum of usable slots over all arenas.
    pub fn total_capacity(&self) -> u64 {
        self.arenas.values().map(|a| u64::from(a.capacity)).sum()
    }

    /// Sum of live objects over all arenas.
    pub fn total_live(&self) -> u64 {
        self.arenas.values().map(|a| u64::from(a.live)).sum()
    }

    /// Sum of free slots over all arenas.
    pub fn total_free(&self) -> u64 {
        self.arenas.values().map(|a| u64::from(a.free)).sum()
    }

    /// Statistics for one kind.
    pub fn get(&self, kind: &str) -> Option<&ArenaStats> {
        self.arenas.get(kind)
    }
}

/// Slots reclaimed by one sweep, per kind.
///
/// Kinds are listed in registration order; kinds with nothing to reclaim
/// are included with a count of zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// `(kind, reclaimed)` pairs.
    pub reclaimed: SmallVec<[(&'static str, u32); 4]>,
}

impl SweepReport {
    /// Record the result of one arena's reclamation pass.
    pub fn record(&mut self, kind: &'static str, reclaimed: u32) {
        self.reclaimed.push((kind, reclaimed));
    }

    /// Total slots reclaimed across all kinds.
    pub fn total(&self) -> u64 {
        self.reclaimed.iter().map(|&(_, n)| u64::from(n)).sum()
    }

    /// Slots reclaimed for one kind, or `None` if the kind was not swept.
    pub fn for_kind(&self, kind: &str) -> Option<u32> {
        self.reclaimed
            .iter()
            .find(|(name, _)| *name == kind)
            .map(|&(_, n)| n)
    }
}

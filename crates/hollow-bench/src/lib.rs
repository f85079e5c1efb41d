//! Benchmark profiles and utilities for the Hollow object arena.
//!
//! - [`ChurnProfile`]: how many objects to create and what share to drop
//!   before each sweep
//! - [`doomed_positions`]: deterministic choice of which handles to drop
//! - [`fill_points`]: create a batch of `Point` objects in a [`TestStore`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use hollow_arena::{Handle, ObjectStore};
use hollow_test_utils::{Point, TestStore};

/// Shape of a create/drop/sweep workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChurnProfile {
    /// Objects created per round.
    pub objects: u32,
    /// Objects dropped per round, before the sweep.
    pub dropped: u32,
    /// Seed for [`doomed_positions`].
    pub seed: u64,
}

impl ChurnProfile {
    /// 10K objects, a quarter of them garbage each round.
    pub fn reference(seed: u64) -> Self {
        Self {
            objects: 10_000,
            dropped: 2_500,
            seed,
        }
    }

    /// 100K objects, half of them garbage each round.
    pub fn stress(seed: u64) -> Self {
        Self {
            objects: 100_000,
            dropped: 50_000,
            seed,
        }
    }

    /// Positions (into a batch of `objects` handles) to drop each round.
    pub fn doomed(&self) -> Vec<usize> {
        doomed_positions(self.objects as usize, self.dropped as usize, self.seed)
    }
}

/// Pick `n` distinct positions in `0..len`, sorted descending.
///
/// Descending order lets callers `swap_remove` each position in turn
/// without disturbing the ones still to come.
pub fn doomed_positions(len: usize, n: usize, seed: u64) -> Vec<usize> {
    let n = n.min(len);
    let mut taken = vec![false; len];
    let mut positions = Vec::with_capacity(n);

    for i in 0..n {
        let mut pos = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add((i as u64).wrapping_mul(1442695040888963407))
            % len as u64) as usize;

        // Linear probe past positions already chosen.
        while taken[pos] {
            pos = (pos + 1) % len;
        }
        taken[pos] = true;
        positions.push(pos);
    }

    positions.sort_unstable_by(|a, b| b.cmp(a));
    positions
}

/// Create `n` points in `store`, stopping at the first refusal.
pub fn fill_points(store: &TestStore, n: u32) -> Vec<Handle<'_, Point, TestStore>> {
    let mut handles = Vec::with_capacity(n as usize);
    for i in 0..n as i32 {
        match store.create(Point::new(i, -i)) {
            Ok(h) => handles.push(h),
            Err(_) => break,
        }
    }
    handles
}

/// Drop the handles at `positions` (descending, as from [`doomed_positions`]).
pub fn drop_positions<T, S>(handles: &mut Vec<Handle<'_, T, S>>, positions: &[usize])
where
    S: hollow_arena::Holds<T>,
{
    for &pos in positions {
        if pos < handles.len() {
            drop(handles.swap_remove(pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doomed_positions_are_unique_and_descending() {
        let positions = doomed_positions(100, 10, 42);
        assert_eq!(positions.len(), 10);
        assert!(positions.windows(2).all(|w| w[0] > w[1]));
        for &pos in &positions {
            assert!(pos < 100, "position {pos} out of bounds");
        }
    }

    #[test]
    fn doomed_positions_handle_large_requests() {
        let positions = doomed_positions(200, 50, 3);
        assert_eq!(positions.len(), 50);
        let unique: std::collections::HashSet<usize> = positions.iter().copied().collect();
        assert_eq!(unique.len(), 50, "all positions should be unique");

        let all = doomed_positions(10_000, 10_000, 42);
        assert_eq!(all, (0..10_000).rev().collect::<Vec<_>>());
    }

    #[test]
    fn doomed_positions_deterministic() {
        assert_eq!(doomed_positions(1000, 5, 7), doomed_positions(1000, 5, 7));
    }

    #[test]
    fn doomed_positions_clamped_to_len() {
        let positions = doomed_positions(3, 10, 1);
        assert_eq!(positions, vec![2, 1, 0]);
        assert!(doomed_positions(0, 4, 1).is_empty());
    }

    #[test]
    fn churn_round_frees_exactly_the_dropped_share() {
        let profile = ChurnProfile {
            objects: 200,
            dropped: 50,
            seed: 3,
        };
        let store = TestStore::new();
        let mut handles = fill_points(&store, profile.objects);
        drop_positions(&mut handles, &profile.doomed());
        assert_eq!(handles.len(), 150);

        let report = store.sweep().unwrap();
        assert_eq!(report.total(), 50);
        assert_eq!(store.free_capacity::<Point>(), 50);

        let refill = fill_points(&store, 50);
        assert_eq!(refill.len(), 50);
        assert_eq!(store.capacity::<Point>(), 200);
        assert_eq!(store.free_capacity::<Point>(), 0);
    }

    #[test]
    fn profiles_drop_less_than_they_create() {
        for profile in [ChurnProfile::reference(1), ChurnProfile::stress(1)] {
            assert!(profile.dropped < profile.objects);
        }
    }
}
